use assert_fs::TempDir;
use common::ENTITY_ID;
use common::command::{output_field, run_treesync_command};
use common::file::{FileSpec, write_file, write_tree};
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;

mod common;

#[test]
fn sync_prints_url_reference_and_commit() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;
    let input = TempDir::new()?;
    let test_file = FileSpec::new(input.path().join("test"), "qwfp".to_string());
    write_file(&test_file);
    let file_arg = format!("test={}", test_file.path.display());

    run_treesync_command(
        root.path(),
        &["sync", "--category", "worktrees", "--id", ENTITY_ID, "--file", &file_arg],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains(format!(
        "url http://localhost/worktrees/{ENTITY_ID}\n"
    )))
    .stdout(predicate::str::contains("reference refs/heads/main\n"))
    .stdout(predicate::str::is_match(r"(?m)^commit [0-9a-f]{40}$")?);

    assert!(root.path().join("worktrees").join(ENTITY_ID).join("HEAD").is_file());

    Ok(())
}

#[test]
fn repeated_sync_reports_the_same_commit() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;
    let input = TempDir::new()?;
    write_tree(input.path(), &[("a/b/c", "data"), ("test", "qwfp")]);
    let dir_arg = input.path().display().to_string();
    let args = ["sync", "--category", "worktrees", "--id", ENTITY_ID, "--from-dir", dir_arg.as_str()];

    let first = run_treesync_command(root.path(), &args).output()?;
    let second = run_treesync_command(root.path(), &args).output()?;

    assert!(first.status.success());
    assert!(second.status.success());
    assert!(output_field(&first.stdout, "commit").is_some());
    assert_eq!(
        output_field(&first.stdout, "commit"),
        output_field(&second.stdout, "commit")
    );

    Ok(())
}

#[test]
fn deployments_without_kustomization_fail() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;
    let input = TempDir::new()?;
    write_tree(input.path(), &[("deployment.yaml", "kind: Deployment\n")]);
    let dir_arg = input.path().display().to_string();

    run_treesync_command(
        root.path(),
        &["sync", "--category", "deployments", "--id", ENTITY_ID, "--from-dir", &dir_arg],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("kustomization.yaml"));

    assert!(!root.path().join("deployments").exists());

    Ok(())
}

#[test]
fn unknown_categories_are_reported() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;

    run_treesync_command(root.path(), &["url", "--category", "pods", "--id", ENTITY_ID])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported category \"pods\""));

    Ok(())
}

#[test]
fn url_follows_the_configured_hostname() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;

    run_treesync_command(
        root.path(),
        &["url", "--category", "deployments", "--id", ENTITY_ID, "--bare-suffix"],
    )
    .env("TREESYNC_HOSTNAME", "git.example.com")
    .assert()
    .success()
    .stdout(format!("http://git.example.com/deployments/{ENTITY_ID}.git\n"));

    Ok(())
}

#[test]
fn delete_removes_a_synchronized_repository() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;
    let input = TempDir::new()?;
    write_tree(input.path(), &[("kustomization.yaml", "resources: []\n")]);
    let dir_arg = input.path().display().to_string();

    run_treesync_command(
        root.path(),
        &["sync", "--category", "deployments", "--id", ENTITY_ID, "--from-dir", &dir_arg],
    )
    .assert()
    .success();

    run_treesync_command(root.path(), &["delete", "--id", ENTITY_ID])
        .assert()
        .success();

    assert!(!root.path().join("deployments").join(ENTITY_ID).exists());

    Ok(())
}

#[test]
fn deleting_a_missing_repository_succeeds() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;

    run_treesync_command(root.path(), &["delete", "--id", ENTITY_ID, "--category", "worktrees"])
        .assert()
        .success();

    Ok(())
}

#[test]
fn malformed_file_arguments_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let root = TempDir::new()?;

    run_treesync_command(
        root.path(),
        &["sync", "--category", "worktrees", "--id", ENTITY_ID, "--file", "no-separator"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("REPO_PATH=LOCAL_FILE"));

    Ok(())
}
