#![allow(dead_code)]

pub mod command;
pub mod file;

use assert_fs::TempDir;
use chrono::DateTime;
use rstest::fixture;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use treesync::areas::repository::Repository;
use treesync::areas::workspace::Workspace;
use treesync::artifacts::objects::commit::Commit;
use treesync::artifacts::objects::object_id::ObjectId;
use treesync::{CommitReference, DesiredFiles, Engine, FixedClock, SyncConfig};

pub const ENTITY_ID: &str = "502b3517-c21c-4da4-97a5-7b7c49fdb380";

/// A scratch project root together with an engine writing into it
pub struct Project {
    pub root: TempDir,
    pub engine: Engine,
}

impl Project {
    pub fn repository_path(&self, category: &str, id: &str) -> PathBuf {
        self.root.path().join(category).join(id)
    }
}

pub fn fixed_clock() -> FixedClock {
    FixedClock::new(
        DateTime::parse_from_rfc3339("2023-01-01T12:00:00+00:00").expect("valid timestamp"),
    )
}

pub fn project_with(configure: impl FnOnce(SyncConfig) -> SyncConfig) -> Project {
    let root = TempDir::new().expect("Failed to create temp dir");
    let config = configure(SyncConfig::new(root.path()).with_clock(fixed_clock()));

    Project {
        root,
        engine: Engine::new(config),
    }
}

#[fixture]
pub fn project() -> Project {
    project_with(|config| config)
}

pub fn files(entries: &[(&str, &str)]) -> DesiredFiles {
    entries
        .iter()
        .map(|(path, content)| (path.to_string(), content.to_string()))
        .collect()
}

pub fn open(path: &Path) -> Repository {
    Repository::open(path, Workspace::new()).expect("Failed to open repository")
}

pub fn read_commit(path: &Path, oid: &ObjectId) -> Commit {
    open(path)
        .database()
        .parse_object_as_commit(oid)
        .expect("Failed to read commit")
}

/// File contents of the tree committed at `reference`, keyed by path.
pub fn committed_files(path: &Path, reference: &CommitReference) -> BTreeMap<String, String> {
    let repository = open(path);
    let commit = read_commit(path, reference.oid());
    let mut entries = BTreeMap::new();
    repository
        .parse_tree(commit.tree_oid(), None, &mut entries)
        .expect("Failed to read tree");

    entries
        .into_iter()
        .map(|(file, entry)| {
            let blob = repository
                .database()
                .parse_object_as_blob(&entry.oid)
                .expect("Failed to read blob");
            (
                file.to_string_lossy().replace('\\', "/"),
                String::from_utf8_lossy(blob.content()).into_owned(),
            )
        })
        .collect()
}

/// Number of commits reachable from HEAD by following first parents.
pub fn history_length(path: &Path) -> usize {
    let repository = open(path);
    let mut next = repository.refs().read_head().expect("Failed to read HEAD");
    let mut length = 0;

    while let Some(oid) = next {
        length += 1;
        next = read_commit(path, &oid).parent().cloned();
    }

    length
}
