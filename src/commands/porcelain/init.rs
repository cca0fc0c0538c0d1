use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::repository::{Repository, RepositoryNotFound};
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::branch::branch_name::BranchName;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::debug;

const CONFIG_FILE: &str = "config";
const DESCRIPTION_FILE: &str = "description";

const BARE_CONFIG: &str = "[core]\n\
    \trepositoryformatversion = 0\n\
    \tfilemode = true\n\
    \tbare = true\n";

const DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

impl Repository {
    /// Lay out a bare repository at `path` with HEAD on `branch`.
    ///
    /// HEAD is written last: until it exists the directory does not count
    /// as a repository and a later call starts over.
    pub fn init(path: &Path, branch: &BranchName) -> anyhow::Result<()> {
        let database = Database::new(path.join("objects").into_boxed_path());
        let refs = Refs::new(path.to_path_buf().into_boxed_path());

        fs::create_dir_all(database.objects_path())
            .with_context(|| format!("failed to create {}", database.objects_path().display()))?;
        fs::create_dir_all(refs.heads_path())
            .with_context(|| format!("failed to create {}", refs.heads_path().display()))?;
        fs::create_dir_all(refs.tags_path())
            .with_context(|| format!("failed to create {}", refs.tags_path().display()))?;

        for (name, content) in [(CONFIG_FILE, BARE_CONFIG), (DESCRIPTION_FILE, DESCRIPTION)] {
            let file = path.join(name);
            if !file.exists() {
                fs::write(&file, content)
                    .with_context(|| format!("failed to write {}", file.display()))?;
            }
        }

        refs.set_head(branch)
            .context("failed to create initial HEAD reference")?;

        debug!(path = %path.display(), %branch, "initialized empty repository");

        Ok(())
    }

    /// Open the repository at `path`, creating it first if there is none.
    ///
    /// Any failure other than a missing repository is returned as is, so an
    /// existing repository is never initialized over.
    pub fn open_or_init(path: &Path, workspace: Workspace) -> anyhow::Result<Self> {
        match Repository::open(path, workspace.clone()) {
            Ok(repository) => {
                debug!(path = %path.display(), "opened existing repository");
                Ok(repository)
            }
            Err(error) if error.downcast_ref::<RepositoryNotFound>().is_some() => {
                debug!(path = %path.display(), "no repository found, initializing");

                let branch = BranchName::try_parse(DEFAULT_BRANCH)?;
                Repository::init(path, &branch)?;

                Repository::open(path, workspace)
            }
            Err(error) => Err(error),
        }
    }
}
