use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::reference::CommitReference;
use crate::artifacts::location::category::Category;
use crate::artifacts::resource::desired_files::DesiredFiles;
use crate::artifacts::status::status_info::StatusInfo;
use crate::config::{Clock, Identity};
use anyhow::Context;
use std::path::Path;
use tracing::debug;

impl Repository {
    /// Write `files` into the working tree and commit them if that changes
    /// anything compared to HEAD.
    ///
    /// Files committed earlier but missing from `files` are kept. Returns
    /// HEAD after the call, which is `None` only while the repository has no
    /// commits at all.
    pub fn synchronize(
        &mut self,
        category: Category,
        files: &DesiredFiles,
        identity: &Identity,
        clock: &dyn Clock,
    ) -> anyhow::Result<Option<CommitReference>> {
        for (path, content) in files {
            self.workspace_mut()
                .write_file(Path::new(path), content.clone())
                .with_context(|| format!("unable to write {path} into the working tree"))?;
        }

        let status = self.status().initialize()?;

        if status.is_clean() {
            debug!(
                path = %self.path().display(),
                commit = ?status.head().map(|head| head.oid().to_string()),
                "working tree is clean, nothing to commit"
            );
            return Ok(status.head().cloned());
        }

        debug!(
            path = %self.path().display(),
            changes = %status.porcelain().trim_end(),
            "working tree differs from HEAD"
        );

        let StatusInfo {
            head,
            head_tree,
            changeset,
        } = status;

        let mut index = Index::from_head_tree(head_tree);
        for (path, (change, entry)) in changeset {
            let blob = self.workspace().parse_blob(&path)?;
            self.database().store(&blob)?;

            debug!(path = %path.display(), %change, "staging");
            index.add(path, entry);
        }

        let message = category.commit_message(head.is_none());
        self.commit(&index, identity.sign(clock.now()), message)?;

        self.head()
    }
}
