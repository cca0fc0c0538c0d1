//! Keep bare git repositories in step with externally described file sets.
//!
//! Every entity gets a repository at `<root>/<category>/<id>`. Synchronizing
//! writes the desired files into an in-memory working tree and commits them
//! on the `main` branch when they differ from HEAD; deleting removes the
//! repository again. The repositories are meant to be served read-only by a
//! separate git server.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod engine;
pub mod errors;

pub use artifacts::branch::reference::CommitReference;
pub use artifacts::location::category::Category;
pub use artifacts::location::resolver::{PathResolver, RepositoryUrl};
pub use artifacts::resource::Resource;
pub use artifacts::resource::desired_files::DesiredFiles;
pub use config::{Clock, FixedClock, Identity, SyncConfig, SystemClock};
pub use engine::{Engine, Synchronized};
pub use errors::SyncError;
