//! Staging data shared by the in-memory index and tree objects
//!
//! Synchronized repositories never persist an index file; staging happens
//! in memory between reading HEAD and writing the next commit. What remains
//! here is the entry mode vocabulary both sides agree on.

pub mod entry_mode;
