use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::reference::CommitReference;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::tree::Tree;
use tracing::info;

impl Repository {
    /// Write the tree built from `index` and commit it on top of HEAD.
    ///
    /// Blobs referenced by the index must already be in the database.
    pub fn commit(&self, index: &Index, author: Author, message: &str) -> anyhow::Result<CommitReference> {
        let tree = Tree::build(index.entries())?;
        let tree_id = tree.object_id()?;
        tree.traverse(&mut |tree: &Tree| self.database().store(tree).map(|_| ()))?;

        let parent = self.refs().read_head()?;
        let is_root = parent.is_none();
        let message = format!("{}\n", message.trim());

        let commit = Commit::new(parent.into_iter().collect(), tree_id, author, message);
        let commit_id = self.database().store(&commit)?;
        self.refs().update_head(&commit_id)?;

        info!(
            path = %self.path().display(),
            commit = %commit_id,
            root = is_root,
            "[{}] {}",
            commit_id.to_short_oid(),
            commit.short_message()
        );

        Ok(CommitReference::new(self.refs().current_ref()?, commit_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::areas::workspace::Workspace;
    use crate::artifacts::database::database_entry::DatabaseEntry;
    use crate::artifacts::index::entry_mode::EntryMode;
    use crate::artifacts::objects::blob::Blob;
    use assert_fs::TempDir;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn author() -> Author {
        Author::new(
            "treesync".to_string(),
            "git@treesync.local".to_string(),
            DateTime::parse_from_rfc3339("2024-05-01T08:30:00+02:00").unwrap(),
        )
    }

    fn stage(repository: &Repository, index: &mut Index, path: &str, content: &'static str) {
        let oid = repository.database().store(&Blob::new(content)).unwrap();
        index.add(PathBuf::from(path), DatabaseEntry::new(oid, EntryMode::default()));
    }

    #[test]
    fn first_commit_has_no_parent_and_moves_the_branch() {
        let dir = TempDir::new().unwrap();
        let repository = Repository::open_or_init(dir.path(), Workspace::new()).unwrap();
        let mut index = Index::default();
        stage(&repository, &mut index, "a/b/c", "data");

        let reference = repository.commit(&index, author(), "Add worktree files").unwrap();

        assert_eq!(reference.name().as_ref_path(), "refs/heads/main");
        let commit = repository.database().parse_object_as_commit(reference.oid()).unwrap();
        assert_eq!(commit.parent(), None);
        assert_eq!(commit.message(), "Add worktree files\n");
        assert_eq!(repository.refs().read_head().unwrap().as_ref(), Some(reference.oid()));
    }

    #[test]
    fn nested_trees_are_stored_before_the_commit() {
        let dir = TempDir::new().unwrap();
        let repository = Repository::open_or_init(dir.path(), Workspace::new()).unwrap();
        let mut index = Index::default();
        stage(&repository, &mut index, "a/b/c", "data");

        let reference = repository.commit(&index, author(), "Add worktree files").unwrap();

        let commit = repository.database().parse_object_as_commit(reference.oid()).unwrap();
        let mut files = std::collections::BTreeMap::new();
        repository.parse_tree(commit.tree_oid(), None, &mut files).unwrap();
        assert_eq!(files.keys().collect::<Vec<_>>(), vec![&PathBuf::from("a/b/c")]);
    }

    #[test]
    fn later_commits_point_at_the_previous_head() {
        let dir = TempDir::new().unwrap();
        let repository = Repository::open_or_init(dir.path(), Workspace::new()).unwrap();
        let mut index = Index::default();
        stage(&repository, &mut index, "test", "qwfp");
        let first = repository.commit(&index, author(), "Add worktree files").unwrap();

        stage(&repository, &mut index, "test", "arst");
        let second = repository.commit(&index, author(), "Update worktree files").unwrap();

        let commit = repository.database().parse_object_as_commit(second.oid()).unwrap();
        assert_eq!(commit.parent(), Some(first.oid()));
    }
}
