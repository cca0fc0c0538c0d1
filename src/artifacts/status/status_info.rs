use crate::areas::repository::Repository;
use crate::artifacts::branch::reference::CommitReference;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::status::file_change::FileChange;
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub type HeadTree = BTreeMap<PathBuf, DatabaseEntry>;
pub type ChangeSet = BTreeMap<PathBuf, (FileChange, DatabaseEntry)>;

#[derive(Debug, Clone)]
pub struct StatusInfo {
    /// HEAD at the time the status was taken
    pub(crate) head: Option<CommitReference>,
    pub(crate) head_tree: HeadTree,
    /// Changed working tree paths with the entry they would be staged as
    pub(crate) changeset: ChangeSet,
}

impl StatusInfo {
    pub fn is_clean(&self) -> bool {
        self.changeset.is_empty()
    }

    pub fn head(&self) -> Option<&CommitReference> {
        self.head.as_ref()
    }

    pub fn changes(&self) -> impl Iterator<Item = (&PathBuf, FileChange)> {
        self.changeset.iter().map(|(path, (change, _))| (path, *change))
    }

    /// Porcelain-style listing, one `<code> <path>` line per change.
    pub fn porcelain(&self) -> String {
        self.changes()
            .map(|(path, change)| format!("{change} {}\n", path.display()))
            .collect()
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self) -> anyhow::Result<StatusInfo> {
        let head = self.repository.head()?;
        let head_tree = self.load_head_tree(head.as_ref())?;
        let inspector = Inspector::new(self.repository);

        let mut changeset = ChangeSet::new();
        for path in self.repository.workspace().list_files() {
            let workspace_entry = inspector.workspace_entry(path)?;

            if let Some(change) =
                inspector.check_workspace_against_head_tree(&workspace_entry, head_tree.get(path))
            {
                changeset.insert(path.to_path_buf(), (change, workspace_entry));
            }
        }

        Ok(StatusInfo {
            head,
            head_tree,
            changeset,
        })
    }

    fn load_head_tree(&self, head: Option<&CommitReference>) -> anyhow::Result<HeadTree> {
        let mut head_tree = HeadTree::new();

        if let Some(head) = head {
            let commit = self
                .repository
                .database()
                .parse_object_as_commit(head.oid())?;

            self.repository
                .parse_tree(commit.tree_oid(), None, &mut head_tree)?;
        }

        Ok(head_tree)
    }
}
