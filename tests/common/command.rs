use assert_cmd::Command;
use std::path::Path;

pub fn run_treesync_command(root: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("treesync").expect("Failed to find treesync binary");
    cmd.env("TREESYNC_ROOT", root);
    cmd.env_remove("TREESYNC_HOSTNAME");
    cmd.env_remove("TREESYNC_SCHEME");
    cmd.env("RUST_LOG", "warn");
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn run_git_command(git_dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("--git-dir").arg(git_dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Value of the `<key> <value>` line `key` in treesync's output.
pub fn output_field(stdout: &[u8], key: &str) -> Option<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .find_map(|line| line.strip_prefix(&format!("{key} ")).map(str::to_string))
}
