//! Transient in-memory working tree
//!
//! A synchronized repository never checks files out to disk: the working
//! tree lives in memory for the duration of one synchronization and only the
//! objects and refs derived from it are persisted.

use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct Workspace {
    files: BTreeMap<PathBuf, Bytes>,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace::default()
    }

    /// Create `file_path` or truncate it, then write `content` in full.
    ///
    /// Missing parent directories are implied. Writing a file over an
    /// existing directory, or below an existing file, fails.
    pub fn write_file(&mut self, file_path: &Path, content: impl Into<Bytes>) -> anyhow::Result<()> {
        let file_path = Self::normalize(file_path)?;

        if let Some(file) = file_path
            .ancestors()
            .skip(1)
            .find(|ancestor| self.files.contains_key(*ancestor))
        {
            anyhow::bail!("cannot create {}: {} is a file", file_path.display(), file.display());
        }
        if self.is_dir(&file_path) {
            anyhow::bail!("cannot create {}: it is a directory", file_path.display());
        }

        self.files.insert(file_path, content.into());
        Ok(())
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<&Bytes> {
        self.files
            .get(file_path)
            .with_context(|| format!("{} does not exist in the working tree", file_path.display()))
    }

    pub fn parse_blob(&self, file_path: &Path) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?.clone()))
    }

    /// All files in the working tree, in path order.
    pub fn list_files(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        self.files
            .keys()
            .any(|file| file != path && file.starts_with(path))
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn normalize(file_path: &Path) -> anyhow::Result<PathBuf> {
        let mut normalized = PathBuf::new();

        for component in file_path.components() {
            match component {
                Component::Normal(name) => normalized.push(name),
                _ => anyhow::bail!(
                    "{} is not a clean relative path",
                    file_path.display()
                ),
            }
        }

        if normalized.as_os_str().is_empty() {
            anyhow::bail!("empty file path");
        }

        Ok(normalized)
    }
}
