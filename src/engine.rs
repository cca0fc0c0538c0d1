//! Entry point for callers
//!
//! [`Engine`] resolves where an entity's repository lives, validates the
//! input, and drives the repository commands. Everything that can be checked
//! without touching the disk is checked first.

use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::reference::CommitReference;
use crate::artifacts::location::category::Category;
use crate::artifacts::location::resolver::{PathResolver, RepositoryUrl};
use crate::artifacts::resource::Resource;
use crate::artifacts::resource::desired_files::DesiredFiles;
use crate::config::SyncConfig;
use crate::errors::Result;
use tracing::debug;

/// Outcome of a synchronization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synchronized {
    pub url: RepositoryUrl,
    /// HEAD after the call; `None` when nothing was ever committed
    pub reference: Option<CommitReference>,
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: SyncConfig,
    resolver: PathResolver,
}

impl Engine {
    pub fn new(config: SyncConfig) -> Self {
        let resolver = PathResolver::new(
            config.project_root.clone(),
            config.scheme.clone(),
            config.hostname.clone(),
            config.bare_suffix,
        );

        Engine { config, resolver }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Make the repository of `(category, id)` hold `files`, creating it on
    /// first use. A commit is only made when the content changes.
    pub fn synchronize(&self, category: Category, id: &str, files: &DesiredFiles) -> Result<Synchronized> {
        let path = self.resolver.resolve(category, id)?;
        files.validate(category)?;
        self.config.identity.validate()?;
        let url = self.resolver.derive_url(&path)?;

        debug!(%category, id, path = %path.display(), files = files.len(), "synchronizing");

        let mut repository = Repository::open_or_init(&path, Workspace::new())?;
        let reference = repository.synchronize(
            category,
            files,
            &self.config.identity,
            self.config.clock.as_ref(),
        )?;

        Ok(Synchronized { url, reference })
    }

    /// Build the desired files of `resource` and synchronize them.
    pub fn reconcile(&self, resource: &Resource) -> Result<Synchronized> {
        self.synchronize(resource.category(), resource.id(), &resource.desired_files())
    }

    /// Remove the deployment repository of `id`, if there is one.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.delete_in(Category::Deployments, id)
    }

    pub fn delete_in(&self, category: Category, id: &str) -> Result<()> {
        let path = self.resolver.resolve(category, id)?;

        debug!(%category, id, path = %path.display(), "deleting");
        Repository::delete(&path)?;

        Ok(())
    }

    pub fn repository_url(&self, category: Category, id: &str) -> Result<RepositoryUrl> {
        let path = self.resolver.resolve(category, id)?;

        self.resolver.derive_url(&path)
    }
}
