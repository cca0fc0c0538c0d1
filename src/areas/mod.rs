//! Core repository components
//!
//! - `database`: loose object database for blobs, trees and commits
//! - `index`: in-memory staging area seeded from HEAD
//! - `refs`: HEAD and branch references
//! - `repository`: an open repository and its collaborators
//! - `workspace`: the transient in-memory working tree

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
