//! Git data structures and the values the engine passes around
//!
//! - `branch`: Branch names and commit references
//! - `database`: Database entry types
//! - `index`: Entry modes shared by trees and the staging area
//! - `location`: Categories, repository paths and URLs
//! - `objects`: Git object types (blob, tree, commit)
//! - `resource`: Resource kinds and the desired file sets built from them
//! - `status`: Working tree status inspection

pub mod branch;
pub mod database;
pub mod index;
pub mod location;
pub mod objects;
pub mod resource;
pub mod status;
