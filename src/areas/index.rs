//! In-memory staging area
//!
//! The index starts out as a flat copy of the HEAD tree and receives the
//! entries staged from the working tree. The next commit's tree is built from
//! it, so anything committed earlier and not restaged carries over unchanged.

use crate::artifacts::database::database_entry::DatabaseEntry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct Index {
    entries: BTreeMap<PathBuf, DatabaseEntry>,
}

impl Index {
    /// Seed the index with the flattened entries of a commit's tree.
    pub fn from_head_tree(head_tree: BTreeMap<PathBuf, DatabaseEntry>) -> Self {
        Index { entries: head_tree }
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&DatabaseEntry> {
        self.entries.get(path)
    }

    /// Stage `entry` at `path`, replacing whatever it conflicts with: a
    /// file standing where one of its parent directories should be, or
    /// files below a directory it replaces.
    pub fn add(&mut self, path: PathBuf, entry: DatabaseEntry) {
        self.discard_conflicts(&path);
        self.entries.insert(path, entry);
    }

    fn discard_conflicts(&mut self, path: &Path) {
        for parent in path.ancestors().skip(1) {
            self.entries.remove(parent);
        }
        self.entries
            .retain(|entry_path, _| entry_path == path || !entry_path.starts_with(path));
    }

    pub fn entries(&self) -> impl Iterator<Item = (&PathBuf, &DatabaseEntry)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::index::entry_mode::EntryMode;
    use crate::artifacts::objects::object_id::ObjectId;
    use pretty_assertions::assert_eq;

    fn entry() -> DatabaseEntry {
        DatabaseEntry::new(
            ObjectId::try_parse("e69de29bb2d1d6434b8b29ae775ad8c2e48c5391").unwrap(),
            EntryMode::default(),
        )
    }

    #[test]
    fn head_entries_survive_unrelated_additions() {
        let head_tree = BTreeMap::from([(PathBuf::from("kept"), entry())]);
        let mut index = Index::from_head_tree(head_tree);

        index.add(PathBuf::from("added"), entry());

        let paths = index.entries().map(|(path, _)| path.clone()).collect::<Vec<_>>();
        assert_eq!(paths, vec![PathBuf::from("added"), PathBuf::from("kept")]);
    }

    #[test]
    fn file_replacing_a_directory_drops_its_children() {
        let head_tree = BTreeMap::from([
            (PathBuf::from("a/b"), entry()),
            (PathBuf::from("a/c"), entry()),
            (PathBuf::from("ab"), entry()),
        ]);
        let mut index = Index::from_head_tree(head_tree);

        index.add(PathBuf::from("a"), entry());

        let paths = index.entries().map(|(path, _)| path.clone()).collect::<Vec<_>>();
        assert_eq!(paths, vec![PathBuf::from("a"), PathBuf::from("ab")]);
    }

    #[test]
    fn directory_replacing_a_file_drops_the_file() {
        let head_tree = BTreeMap::from([(PathBuf::from("a"), entry())]);
        let mut index = Index::from_head_tree(head_tree);

        index.add(PathBuf::from("a/b"), entry());

        assert!(index.entry_by_path(Path::new("a")).is_none());
        assert_eq!(index.entries().count(), 1);
    }
}
