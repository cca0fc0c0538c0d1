use crate::areas::repository::Repository;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::file_change::FileChange;
use derive_new::new;
use std::path::Path;

#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    /// The entry a working tree file would be committed as.
    pub fn workspace_entry(&self, path: &Path) -> anyhow::Result<DatabaseEntry> {
        let blob = self.repository.workspace().parse_blob(path)?;

        Ok(DatabaseEntry::new(blob.object_id()?, EntryMode::default()))
    }

    pub fn check_workspace_against_head_tree(
        &self,
        workspace_entry: &DatabaseEntry,
        head_entry: Option<&DatabaseEntry>,
    ) -> Option<FileChange> {
        match head_entry {
            None => Some(FileChange::Added),
            Some(head_entry)
                if head_entry.oid != workspace_entry.oid
                    || head_entry.mode != workspace_entry.mode =>
            {
                Some(FileChange::Modified)
            }
            Some(_) => None,
        }
    }
}
