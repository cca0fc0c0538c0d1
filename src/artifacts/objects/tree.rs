//! Git tree object
//!
//! Trees are directory snapshots: an ordered list of `<mode> <name>\0<20-byte
//! sha1>` entries pointing at blobs (files) and other trees (directories).
//!
//! A tree is either *read* from the database, in which case only its direct
//! entries are known, or *built* from a flat path listing, in which case the
//! nested subtrees are held in memory until they are stored.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::{Component, Path};

#[derive(Debug, Clone)]
enum TreeEntry {
    File(DatabaseEntry),
    Directory(Tree),
}

impl TreeEntry {
    fn mode(&self) -> EntryMode {
        match self {
            TreeEntry::File(entry) => entry.mode,
            TreeEntry::Directory(_) => EntryMode::Directory,
        }
    }

    fn oid(&self) -> anyhow::Result<ObjectId> {
        match self {
            TreeEntry::File(entry) => Ok(entry.oid.clone()),
            TreeEntry::Directory(tree) => tree.object_id(),
        }
    }
}

/// Git tree object representing a directory snapshot
///
/// Written entries are keyed with a trailing `/` for directories, which makes
/// the `BTreeMap` iteration order match the order git sorts tree entries in.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    readable_entries: BTreeMap<String, DatabaseEntry>,
    writeable_entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    /// Build a nested tree from a flat listing of file paths.
    ///
    /// Paths are relative with `/`-separated components; a path may not be
    /// both a file and the parent of another entry.
    pub fn build<'e, P>(entries: impl IntoIterator<Item = (P, &'e DatabaseEntry)>) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let mut root = Self::default();

        for (path, entry) in entries {
            let components = path
                .as_ref()
                .components()
                .map(|component| match component {
                    Component::Normal(name) => name
                        .to_str()
                        .with_context(|| format!("non utf-8 path {:?}", path.as_ref())),
                    _ => Err(anyhow::anyhow!(
                        "tree entry {:?} is not a clean relative path",
                        path.as_ref()
                    )),
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            root.add_entry(&components, entry)?;
        }

        Ok(root)
    }

    fn add_entry(&mut self, components: &[&str], entry: &DatabaseEntry) -> anyhow::Result<()> {
        match components {
            [] => anyhow::bail!("empty tree entry path"),
            [name] => {
                if self.writeable_entries.contains_key(&format!("{name}/")) {
                    anyhow::bail!("{name} is already a directory");
                }
                self.writeable_entries
                    .insert(name.to_string(), TreeEntry::File(entry.clone()));
            }
            [dir, rest @ ..] => {
                if self.writeable_entries.contains_key(*dir) {
                    anyhow::bail!("{dir} is already a file");
                }
                let subtree = self
                    .writeable_entries
                    .entry(format!("{dir}/"))
                    .or_insert_with(|| TreeEntry::Directory(Tree::default()));

                match subtree {
                    TreeEntry::Directory(tree) => tree.add_entry(rest, entry)?,
                    TreeEntry::File(_) => unreachable!("directory keys always hold trees"),
                }
            }
        }

        Ok(())
    }

    /// Visit every built subtree, children before parents, so that a tree is
    /// only handed out once everything it points at has been seen.
    pub fn traverse<F>(&self, func: &mut F) -> anyhow::Result<()>
    where
        F: FnMut(&Tree) -> anyhow::Result<()>,
    {
        for entry in self.writeable_entries.values() {
            if let TreeEntry::Directory(tree) = entry {
                tree.traverse(func)?;
            }
        }

        func(self)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &DatabaseEntry)> {
        self.readable_entries.iter()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut body = Vec::new();

        for (name, entry) in &self.writeable_entries {
            let name = name.trim_end_matches('/');

            write!(body, "{} {}\0", entry.mode(), name)?;
            entry.oid()?.write_raw_to(&mut body)?;
        }

        Ok(self.object_type().frame(&body).into())
    }
}

impl Unpackable for Tree {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut entries = BTreeMap::new();
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            if reader.read_until(b' ', &mut mode_bytes)? == 0 {
                break;
            }
            if mode_bytes.pop() != Some(b' ') {
                anyhow::bail!("unexpected end of tree in entry mode");
            }
            let mode = EntryMode::from_octal_str(std::str::from_utf8(&mode_bytes)?)?;

            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                anyhow::bail!("unexpected end of tree in entry name");
            }
            let name = String::from_utf8(name_bytes.clone())?;

            let oid = ObjectId::read_raw_from(&mut reader)
                .context("unexpected end of tree in object id")?;

            entries.insert(name, DatabaseEntry::new(oid, mode));
        }

        Ok(Tree {
            readable_entries: entries,
            writeable_entries: BTreeMap::new(),
        })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::index::entry_mode::FileMode;
    use crate::artifacts::objects::blob::Blob;
    use pretty_assertions::assert_eq;

    fn file_entry(content: &'static [u8]) -> DatabaseEntry {
        let oid = Blob::new(Bytes::from_static(content)).object_id().unwrap();
        DatabaseEntry::new(oid, EntryMode::File(FileMode::Regular))
    }

    #[test]
    fn empty_tree_matches_git() {
        let tree = Tree::build(Vec::<(&str, &DatabaseEntry)>::new()).unwrap();

        assert_eq!(
            tree.object_id().unwrap().as_ref(),
            "4b825dc642cb6eb9a060e54bf8d69288fbee4904"
        );
    }

    #[test]
    fn single_empty_file_tree_matches_git() {
        // `git mktree` with a single empty blob named "test"
        let entry = file_entry(b"");
        let tree = Tree::build([("test", &entry)]).unwrap();

        let serialized = tree.serialize().unwrap();
        let mut expected = b"tree 32\x00100644 test\x00".to_vec();
        entry.oid.write_raw_to(&mut expected).unwrap();

        assert_eq!(serialized.as_ref(), expected.as_slice());
    }

    #[test]
    fn directories_sort_as_if_suffixed_with_a_slash() {
        let entry = file_entry(b"x");
        let tree = Tree::build([("a.txt", &entry), ("a/b", &entry), ("a-c", &entry)]).unwrap();

        let names = tree.writeable_entries.keys().cloned().collect::<Vec<_>>();

        assert_eq!(names, vec!["a-c", "a.txt", "a/"]);
    }

    #[test]
    fn nested_trees_are_traversed_before_their_parents() {
        let entry = file_entry(b"data");
        let tree = Tree::build([("a/b/c", &entry), ("d", &entry)]).unwrap();

        let mut sizes = Vec::new();
        tree.traverse(&mut |tree: &Tree| {
            sizes.push(tree.writeable_entries.len());
            Ok(())
        })
        .unwrap();

        // a/b, a, root
        assert_eq!(sizes, vec![1, 1, 2]);
    }

    #[test]
    fn file_and_directory_with_the_same_name_conflict() {
        let entry = file_entry(b"data");

        assert!(Tree::build([("a", &entry), ("a/b", &entry)]).is_err());
        assert!(Tree::build([("a/b", &entry), ("a", &entry)]).is_err());
    }

    #[test]
    fn serialized_tree_reads_back_its_entries() {
        let entry = file_entry(b"data");
        let tree = Tree::build([("a/b", &entry), ("c", &entry)]).unwrap();
        let serialized = tree.serialize().unwrap();

        let mut reader = serialized.as_ref();
        ObjectType::parse_header(&mut reader).unwrap();
        let read = Tree::deserialize(reader).unwrap();

        let entries = read
            .entries()
            .map(|(name, entry)| (name.as_str(), entry.is_tree()))
            .collect::<Vec<_>>();
        assert_eq!(entries, vec![("a", true), ("c", false)]);
    }
}
