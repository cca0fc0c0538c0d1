//! Database entry types
//!
//! A `DatabaseEntry` is what a tree records for each name: the object it
//! points at and the mode it is checked out with.

pub mod database_entry;
