//! Where repositories live on disk and how they are addressed remotely
//!
//! - `category`: the kinds of repository kept side by side under the root
//! - `resolver`: `(category, id)` to path, and path to URL

pub mod category;
pub mod resolver;
