//! Working tree status inspection
//!
//! Status compares the in-memory working tree against the HEAD tree (or the
//! empty tree for a repository without commits). Only paths present in the
//! working tree are inspected: a committed file the working tree does not
//! mention is left alone rather than reported as deleted.
//!
//! - `file_change`: the kinds of change a path can carry
//! - `inspector`: the per-path comparison
//! - `status_info`: the aggregated result

pub mod file_change;
pub mod inspector;
pub mod status_info;
