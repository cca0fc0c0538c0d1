use crate::errors::SyncError;
use std::str::FromStr;

/// Entry point every deployment repository must carry.
pub const KUSTOMIZATION_FILE: &str = "kustomization.yaml";

/// Top-level directory a repository is kept under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Manifest-style repositories rendered from deployments
    Deployments,
    /// Raw file repositories mirroring a worktree resource
    Worktrees,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Deployments, Category::Worktrees];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Deployments => "deployments",
            Category::Worktrees => "worktrees",
        }
    }

    /// File a desired file set must contain before it is synchronized.
    pub fn required_entry_point(&self) -> Option<&'static str> {
        match self {
            Category::Deployments => Some(KUSTOMIZATION_FILE),
            Category::Worktrees => None,
        }
    }

    /// Commit message for the first commit, or for a later one.
    pub fn commit_message(&self, first_commit: bool) -> &'static str {
        match (self, first_commit) {
            (Category::Deployments, true) => "Add deployment files",
            (Category::Deployments, false) => "Update deployment files",
            (Category::Worktrees, true) => "Add worktree files",
            (Category::Worktrees, false) => "Update worktree files",
        }
    }
}

impl FromStr for Category {
    type Err = SyncError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| SyncError::UnknownCategory(value.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("deployments", Category::Deployments)]
    #[case("worktrees", Category::Worktrees)]
    fn categories_parse_from_their_directory_name(#[case] raw: &str, #[case] expected: Category) {
        assert_eq!(raw.parse::<Category>().unwrap(), expected);
        assert_eq!(expected.to_string(), raw);
    }

    #[rstest]
    #[case("")]
    #[case("Worktrees")]
    #[case("containerimagedeployments")]
    fn other_names_are_unknown(#[case] raw: &str) {
        assert!(matches!(
            raw.parse::<Category>(),
            Err(SyncError::UnknownCategory(name)) if name == raw
        ));
    }

    #[test]
    fn only_deployments_require_an_entry_point() {
        assert_eq!(Category::Deployments.required_entry_point(), Some("kustomization.yaml"));
        assert_eq!(Category::Worktrees.required_entry_point(), None);
    }
}
