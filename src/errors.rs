use crate::artifacts::location::category::Category;

/// Errors returned to the caller of a synchronization or deletion.
///
/// Only [`SyncError::RepositoryIo`] is worth retrying as is; every other
/// variant needs the caller to change its input or configuration first.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("entity identifier must not be empty")]
    EmptyIdentifier,

    #[error("no {file} file provided for {category}")]
    MissingManifest { category: Category, file: &'static str },

    #[error("unsupported category {0:?}")]
    UnknownCategory(String),

    #[error("invalid file path {0:?}")]
    InvalidPath(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("repository i/o failed: {0:#}")]
    RepositoryIo(#[from] anyhow::Error),
}

impl SyncError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::RepositoryIo(_))
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
