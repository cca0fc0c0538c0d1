//! Engine configuration
//!
//! Where repositories live, how they are addressed, and who commits to them.
//! The binary fills this from its command line and environment; embedders
//! build it directly.

use crate::artifacts::objects::commit::Author;
use crate::errors::SyncError;
use chrono::{DateTime, FixedOffset, Local};
use derive_new::new;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_AUTHOR_NAME: &str = "treesync";
pub const DEFAULT_AUTHOR_EMAIL: &str = "git@treesync.local";
pub const DEFAULT_HOSTNAME: &str = "localhost";
pub const DEFAULT_SCHEME: &str = "http";

/// Source of commit timestamps
pub trait Clock: std::fmt::Debug + Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always reports the same instant; commits made with it hash reproducibly.
#[derive(Debug, Clone, Copy, new)]
pub struct FixedClock {
    instant: DateTime<FixedOffset>,
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}

/// Synthetic author and committer of every commit
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Identity {
    #[new(into)]
    pub name: String,
    #[new(into)]
    pub email: String,
}

impl Default for Identity {
    fn default() -> Self {
        Identity::new(DEFAULT_AUTHOR_NAME, DEFAULT_AUTHOR_EMAIL)
    }
}

impl Identity {
    /// `GIT_AUTHOR_NAME` and `GIT_AUTHOR_EMAIL`, each falling back to the
    /// default identity when unset or blank.
    pub fn from_env() -> Self {
        let read = |key: &str, default: &str| {
            std::env::var(key)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Identity::new(
            read("GIT_AUTHOR_NAME", DEFAULT_AUTHOR_NAME),
            read("GIT_AUTHOR_EMAIL", DEFAULT_AUTHOR_EMAIL),
        )
    }

    /// Names and emails end up verbatim in commit headers; anything that
    /// would break the `name <email>` line is refused.
    pub fn validate(&self) -> Result<(), SyncError> {
        for (field, value) in [("name", &self.name), ("email", &self.email)] {
            if value.contains(['\n', '\r', '\0', '<', '>']) {
                return Err(SyncError::InvalidConfiguration(format!(
                    "author {field} {value:?} contains characters not allowed in a signature"
                )));
            }
        }

        Ok(())
    }

    pub fn sign(&self, timestamp: DateTime<FixedOffset>) -> Author {
        Author::new(self.name.clone(), self.email.clone(), timestamp)
    }
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Directory holding the `deployments/` and `worktrees/` trees
    pub project_root: PathBuf,
    pub hostname: String,
    pub scheme: String,
    /// Append `.git` to repository URLs
    pub bare_suffix: bool,
    pub identity: Identity,
    pub clock: Arc<dyn Clock>,
}

impl SyncConfig {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        SyncConfig {
            project_root: project_root.into(),
            hostname: DEFAULT_HOSTNAME.to_string(),
            scheme: DEFAULT_SCHEME.to_string(),
            bare_suffix: false,
            identity: Identity::default(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_bare_suffix(mut self, bare_suffix: bool) -> Self {
        self.bare_suffix = bare_suffix;
        self
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }
}
