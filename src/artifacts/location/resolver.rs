use crate::artifacts::location::category::Category;
use crate::errors::SyncError;
use derive_new::new;
use std::path::{Component, Path, PathBuf};

/// Suffix appended to URLs when repositories are addressed as bare repos
pub const BARE_SUFFIX: &str = ".git";

/// External address of a repository, e.g. `http://localhost/worktrees/<id>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryUrl {
    scheme: String,
    host: String,
    path: String,
}

impl RepositoryUrl {
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Display for RepositoryUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.host, self.path)
    }
}

/// Maps entities to their repository directory under the project root, and
/// repository directories to the URL the serving process exposes them at.
#[derive(Debug, Clone, new)]
pub struct PathResolver {
    #[new(into)]
    root: PathBuf,
    #[new(into)]
    scheme: String,
    #[new(into)]
    hostname: String,
    bare_suffix: bool,
}

impl PathResolver {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<category>/<id>`; checked before anything touches the disk.
    pub fn resolve(&self, category: Category, id: &str) -> Result<PathBuf, SyncError> {
        if id.is_empty() {
            return Err(SyncError::EmptyIdentifier);
        }

        let mut components = Path::new(id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) if !id.contains(['/', '\\']) => {}
            _ => return Err(SyncError::InvalidPath(id.to_string())),
        }

        Ok(self.root.join(category.as_str()).join(id))
    }

    /// URL of the repository at `path`, relative to the configured root.
    pub fn derive_url(&self, path: &Path) -> Result<RepositoryUrl, SyncError> {
        if self.hostname.is_empty() {
            return Err(SyncError::InvalidConfiguration(
                "repository hostname must not be empty".to_string(),
            ));
        }
        if self.scheme.is_empty() {
            return Err(SyncError::InvalidConfiguration(
                "repository url scheme must not be empty".to_string(),
            ));
        }

        let relative = path.strip_prefix(&self.root).map_err(|_| {
            SyncError::InvalidConfiguration(format!(
                "{} is outside of the project root {}",
                path.display(),
                self.root.display()
            ))
        })?;

        let mut url_path = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(format!("/{}", name.to_string_lossy())),
                _ => None,
            })
            .collect::<String>();
        if self.bare_suffix {
            url_path.push_str(BARE_SUFFIX);
        }

        Ok(RepositoryUrl {
            scheme: self.scheme.clone(),
            host: self.hostname.clone(),
            path: url_path,
        })
    }
}
