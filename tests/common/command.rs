use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;
use ugit::areas::repository::Repository;
use ugit::artifacts::objects::object_id::ObjectId;

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// An initialized repository with one commit over `1.txt`, `a/2.txt` and `a/b/3.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_ugit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    ugit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_ugit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("ugit").expect("Failed to find ugit binary");
    cmd.envs(vec![("NO_COLOR", "1"), ("CLICOLOR", "0")]);
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn ugit_commit(dir: &Path, message: &str) -> Command {
    run_ugit_command(dir, &["commit", "-m", message])
}

/// Run `ugit commit` and return the printed commit id
pub fn ugit_commit_oid(dir: &Path, message: &str) -> String {
    let output = ugit_commit(dir, message)
        .output()
        .expect("Failed to run ugit commit");
    assert!(output.status.success(), "ugit commit failed: {output:?}");

    String::from_utf8(output.stdout)
        .expect("commit output is not utf-8")
        .trim()
        .to_string()
}

/// Library handle on a repository that discards command output
pub fn open_repository(dir: &Path) -> Repository {
    Repository::new(dir, Box::new(std::io::sink())).expect("Failed to create repository handle")
}

/// Library handle on a freshly initialized repository
pub fn init_repository(dir: &Path) -> Repository {
    let repository = open_repository(dir);
    repository.init().expect("Failed to initialize repository");
    repository
}

pub fn read_head(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".ugit").join("HEAD")).expect("Failed to read HEAD")
}

pub fn read_ref(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(".ugit").join(name))
        .unwrap_or_else(|e| panic!("Failed to read ref {name}: {e}"))
}

pub fn oid(value: &str) -> ObjectId {
    ObjectId::try_parse(value.to_string()).expect("Invalid object id")
}
