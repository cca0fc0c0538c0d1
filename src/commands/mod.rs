//! Repository operations
//!
//! Each command is an `impl Repository` block in its own file:
//!
//! - `init`: create a bare repository, and open-or-create one
//! - `commit`: turn a staged index into a commit on the current branch
//! - `synchronize`: apply a desired file set and commit only when it differs
//! - `delete`: remove a repository from disk

pub mod porcelain;
