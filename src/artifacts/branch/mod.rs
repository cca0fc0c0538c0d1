//! Branch names, symbolic ref names and resolved commit references

pub mod branch_name;
pub mod reference;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// The single branch every synchronized repository carries.
pub const DEFAULT_BRANCH: &str = "main";
