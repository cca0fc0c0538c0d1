use crate::areas::database::Database;
use crate::areas::refs::{HEAD_REF_NAME, Refs};
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::reference::CommitReference;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::Status;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Raised by [`Repository::open`] when `path` holds no repository.
///
/// Every other open failure means an existing repository could not be read.
#[derive(Debug, thiserror::Error)]
#[error("repository does not exist at {}", path.display())]
pub struct RepositoryNotFound {
    pub path: PathBuf,
}

/// An on-disk object and ref store bound to an in-memory working tree
///
/// The repository is bare: `HEAD`, `objects/` and `refs/` live directly
/// under `path`, which is how the serving side expects to find them.
#[derive(Debug)]
pub struct Repository {
    path: Box<Path>,
    database: Database,
    refs: Refs,
    workspace: Workspace,
}

impl Repository {
    pub fn open(path: &Path, workspace: Workspace) -> anyhow::Result<Self> {
        if !Self::exists(path) {
            return Err(RepositoryNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let database = Database::new(path.join("objects").into_boxed_path());
        if !database.objects_path().is_dir() {
            anyhow::bail!(
                "repository at {} has a HEAD but no object directory",
                path.display()
            );
        }

        let refs = Refs::new(path.to_path_buf().into_boxed_path());
        refs.current_ref()
            .with_context(|| format!("unable to resolve HEAD of {}", path.display()))?;

        Ok(Repository {
            path: path.to_path_buf().into_boxed_path(),
            database,
            refs,
            workspace,
        })
    }

    /// Read-only probe: does `path` hold a repository?
    pub fn exists(path: &Path) -> bool {
        path.join(HEAD_REF_NAME).is_file()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    pub fn status(&'_ self) -> Status<'_> {
        Status::new(self)
    }

    /// HEAD resolved to its branch and commit; `None` before the first commit.
    pub fn head(&self) -> anyhow::Result<Option<CommitReference>> {
        let name = self.refs.current_ref()?;

        Ok(self
            .refs
            .read_head()?
            .map(|oid| CommitReference::new(name, oid)))
    }

    /// Flatten the tree `tree_oid` into `entries`, keyed by file path.
    pub fn parse_tree(
        &self,
        tree_oid: &ObjectId,
        prefix: Option<&Path>,
        entries: &mut BTreeMap<PathBuf, DatabaseEntry>,
    ) -> anyhow::Result<()> {
        let tree = self.database.parse_object_as_tree(tree_oid)?;

        for (name, entry) in tree.entries() {
            let path = match prefix {
                Some(prefix) => prefix.join(name),
                None => PathBuf::from(name),
            };

            if entry.is_tree() {
                self.parse_tree(&entry.oid, Some(&path), entries)?;
            } else {
                entries.insert(path, entry.clone());
            }
        }

        Ok(())
    }
}
