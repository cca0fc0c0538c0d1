//! Git object types and operations
//!
//! Every piece of content a synchronized repository holds is stored as a git
//! object identified by the SHA-1 of its encoding:
//!
//! - **Blob**: raw file content
//! - **Tree**: directory listing (names, modes and object IDs)
//! - **Commit**: snapshot with metadata (author, message, parents, tree)
//!
//! All objects share the loose object framing `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes, as written inside tree entries
pub const OBJECT_ID_RAW_LENGTH: usize = OBJECT_ID_LENGTH / 2;
