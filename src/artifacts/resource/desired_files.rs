use crate::artifacts::location::category::Category;
use crate::errors::SyncError;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::{Component, Path};

/// Files a repository should contain after synchronization, keyed by their
/// `/`-separated path relative to the repository root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredFiles {
    files: BTreeMap<String, Bytes>,
}

impl DesiredFiles {
    pub fn new() -> Self {
        DesiredFiles::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Bytes>) -> &mut Self {
        self.files.insert(path.into(), content.into());
        self
    }

    pub fn get(&self, path: &str) -> Option<&Bytes> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Bytes)> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Reject anything that cannot be written into a repository of
    /// `category`. Runs before the repository is touched.
    pub fn validate(&self, category: Category) -> Result<(), SyncError> {
        for path in self.files.keys() {
            Self::validate_path(path)?;

            if let Some(parent) = Path::new(path)
                .ancestors()
                .skip(1)
                .find(|ancestor| self.files.contains_key(ancestor.to_string_lossy().as_ref()))
            {
                return Err(SyncError::InvalidPath(format!(
                    "{path} is below the file {}",
                    parent.display()
                )));
            }
        }

        match category.required_entry_point() {
            Some(file) if !self.contains(file) => {
                Err(SyncError::MissingManifest { category, file })
            }
            _ => Ok(()),
        }
    }

    fn validate_path(path: &str) -> Result<(), SyncError> {
        let is_clean = !path.is_empty()
            && !path.contains('\\')
            && path
                .split('/')
                .all(|part| !part.is_empty() && part != "." && part != "..")
            && Path::new(path)
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if is_clean {
            Ok(())
        } else {
            Err(SyncError::InvalidPath(path.to_string()))
        }
    }
}

impl<P, C> FromIterator<(P, C)> for DesiredFiles
where
    P: Into<String>,
    C: Into<Bytes>,
{
    fn from_iter<T: IntoIterator<Item = (P, C)>>(iter: T) -> Self {
        DesiredFiles {
            files: iter
                .into_iter()
                .map(|(path, content)| (path.into(), content.into()))
                .collect(),
        }
    }
}

impl<'f> IntoIterator for &'f DesiredFiles {
    type Item = (&'f String, &'f Bytes);
    type IntoIter = std::collections::btree_map::Iter<'f, String, Bytes>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
