use crate::areas::repository::Repository;
use anyhow::Context;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

impl Repository {
    /// Remove the repository at `path` together with everything below it.
    ///
    /// Returns whether anything was removed; a missing repository is not an
    /// error.
    pub fn delete(path: &Path) -> anyhow::Result<bool> {
        if !Repository::exists(path) {
            warn!(path = %path.display(), "deleting non-existing repository");
            return Ok(false);
        }

        match std::fs::remove_dir_all(path) {
            Ok(()) => {
                info!(path = %path.display(), "removed repository");
                Ok(true)
            }
            Err(error) if error.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "repository disappeared before removal");
                Ok(false)
            }
            Err(error) => Err(error)
                .with_context(|| format!("failed to remove repository at {}", path.display())),
        }
    }
}
