//! Git references (HEAD and branches)
//!
//! References are text files under the repository directory holding either
//! a 40-character object id (direct) or `ref: <name>` (symbolic). A freshly
//! initialized repository has a symbolic HEAD pointing at a branch that does
//! not exist yet; the first commit creates the branch file.

use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// How many symbolic refs are followed before giving up, as git does
const MAX_SYMREF_DEPTH: usize = 5;

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory holding `HEAD` and `refs/`
    path: Box<Path>,
}

#[derive(Debug, Clone)]
enum SymRefOrOid {
    SymRef { sym_ref_name: SymRefName },
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {}", path.display()))?;
        let content = content.trim();

        if content.is_empty() {
            anyhow::bail!("empty ref file at {}", path.display());
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        match symref_match {
            Some(symref_match) => Ok(Some(SymRefOrOid::SymRef {
                sym_ref_name: SymRefName::new(symref_match[1].to_string()),
            })),
            None => Ok(Some(SymRefOrOid::Oid(
                ObjectId::try_parse(content)
                    .with_context(|| format!("corrupt ref file at {}", path.display()))?,
            ))),
        }
    }
}

impl Refs {
    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn tags_path(&self) -> Box<Path> {
        self.refs_path().join("tags").into_boxed_path()
    }

    /// Point HEAD at `branch`, which need not exist yet.
    pub fn set_head(&self, branch: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(
            &self.head_path(),
            &format!("ref: {}\n", branch.to_sym_ref_name()),
        )
    }

    /// Name of the ref HEAD ultimately resolves to, e.g. `refs/heads/main`.
    ///
    /// A detached HEAD resolves to `HEAD` itself.
    pub fn current_ref(&self) -> anyhow::Result<SymRefName> {
        let mut current = SymRefName::new(HEAD_REF_NAME.to_string());

        for _ in 0..MAX_SYMREF_DEPTH {
            match SymRefOrOid::read_symref_or_oid(&self.path.join(current.as_ref_path()))? {
                Some(SymRefOrOid::SymRef { sym_ref_name }) => current = sym_ref_name,
                Some(SymRefOrOid::Oid(_)) | None => return Ok(current),
            }
        }

        anyhow::bail!("symbolic ref chain starting at HEAD is too deep")
    }

    /// Commit HEAD points at, or `None` for a repository without commits.
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        let current = self.current_ref()?;

        match SymRefOrOid::read_symref_or_oid(&self.path.join(current.as_ref_path()))? {
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            Some(SymRefOrOid::SymRef { .. }) | None => Ok(None),
        }
    }

    /// Move whatever HEAD resolves to onto `oid`.
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let current = self.current_ref()?;

        self.update_ref_file(
            &self.path.join(current.as_ref_path()),
            &format!("{oid}\n"),
        )
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        let parent = path
            .parent()
            .with_context(|| format!("ref file at {} has no parent", path.display()))?;
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create parent directories for ref file at {}", path.display())
        })?;

        let mut lock_path = path.as_os_str().to_owned();
        lock_path.push(".lock");
        let lock_path = PathBuf::from(lock_path);

        // a stale lock file left by an interrupted write is simply reused
        let mut lock_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("failed to open ref lock file at {}", lock_path.display()))?;
        let mut lock = file_guard::lock(&mut lock_file, Lock::Exclusive, 0, 1)
            .with_context(|| format!("failed to lock ref file at {}", path.display()))?;
        lock.deref_mut()
            .write_all(raw_ref.as_bytes())
            .with_context(|| format!("failed to write ref lock file at {}", lock_path.display()))?;
        lock.deref_mut().sync_all()?;

        // the ref is replaced as a whole, readers never see it half written
        std::fs::rename(&lock_path, path)
            .with_context(|| format!("failed to move ref into place at {}", path.display()))?;

        Ok(())
    }
}
