use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use treesync::{Category, DesiredFiles, Engine, Identity, SyncConfig};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(
    name = "treesync",
    version,
    author = "Sami Barbut-Dica",
    about = "Keep bare git repositories in step with desired file sets",
    long_about = "Synchronizes file sets into bare git repositories laid out as \
    <root>/<category>/<id>, committing only when the content changes, \
    and removes those repositories again.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    #[arg(long, global = true, env = "TREESYNC_ROOT", help = "Directory holding the repositories")]
    root: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "TREESYNC_HOSTNAME",
        default_value = treesync::config::DEFAULT_HOSTNAME,
        help = "Host repositories are served from"
    )]
    hostname: String,
    #[arg(
        long,
        global = true,
        env = "TREESYNC_SCHEME",
        default_value = treesync::config::DEFAULT_SCHEME,
        help = "URL scheme repositories are served with"
    )]
    scheme: String,
    #[arg(long, global = true, help = "Append .git to repository URLs")]
    bare_suffix: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "sync",
        about = "Synchronize files into a repository",
        long_about = "Writes the given files into the repository of the entity and commits them \
        if they differ from HEAD. Files committed earlier are kept."
    )]
    Sync {
        #[arg(long, help = "Repository category (deployments or worktrees)")]
        category: String,
        #[arg(long, help = "Entity identifier")]
        id: String,
        #[arg(long = "file", value_name = "REPO_PATH=LOCAL_FILE", help = "File to synchronize")]
        files: Vec<String>,
        #[arg(long, help = "Synchronize every file below this directory")]
        from_dir: Option<PathBuf>,
    },
    #[command(name = "delete", about = "Remove the repository of an entity")]
    Delete {
        #[arg(long, help = "Entity identifier")]
        id: String,
        #[arg(long, default_value = "deployments", help = "Repository category")]
        category: String,
    },
    #[command(name = "url", about = "Print the URL a repository is served at")]
    Url {
        #[arg(long, help = "Repository category (deployments or worktrees)")]
        category: String,
        #[arg(long, help = "Entity identifier")]
        id: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = Engine::new(build_config(&cli.global)?);

    match cli.command {
        Commands::Sync {
            category,
            id,
            files,
            from_dir,
        } => {
            let category = category.parse::<Category>()?;
            let mut desired = DesiredFiles::new();
            if let Some(dir) = from_dir {
                collect_dir(&dir, &mut desired)?;
            }
            for file in &files {
                collect_file(file, &mut desired)?;
            }

            let synchronized = engine.synchronize(category, &id, &desired)?;

            println!("url {}", synchronized.url);
            match synchronized.reference {
                Some(reference) => {
                    println!("reference {}", reference.name());
                    println!("commit {}", reference.oid());
                }
                None => {
                    println!("reference none");
                    println!("commit none");
                }
            }
        }
        Commands::Delete { id, category } => {
            let category = category.parse::<Category>()?;
            engine.delete_in(category, &id)?;
        }
        Commands::Url { category, id } => {
            let category = category.parse::<Category>()?;
            println!("{}", engine.repository_url(category, &id)?);
        }
    }

    Ok(())
}

fn build_config(global: &GlobalArgs) -> Result<SyncConfig> {
    let root = match &global.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("unable to determine the current directory")?,
    };

    Ok(SyncConfig::new(root)
        .with_hostname(global.hostname.clone())
        .with_scheme(global.scheme.clone())
        .with_bare_suffix(global.bare_suffix)
        .with_identity(Identity::from_env()))
}

/// `repo/path=local/file`
fn collect_file(argument: &str, desired: &mut DesiredFiles) -> Result<()> {
    let (repo_path, local_path) = argument
        .split_once('=')
        .with_context(|| format!("expected REPO_PATH=LOCAL_FILE, got {argument:?}"))?;
    let content = std::fs::read(local_path)
        .with_context(|| format!("unable to read {local_path}"))?;

    desired.insert(repo_path, content);
    Ok(())
}

fn collect_dir(dir: &Path, desired: &mut DesiredFiles) -> Result<()> {
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("unable to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(dir)?;
        let repo_path = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let content = std::fs::read(entry.path())
            .with_context(|| format!("unable to read {}", entry.path().display()))?;

        desired.insert(repo_path, content);
    }

    Ok(())
}
