use crate::common::command::{
    init_repository, read_head, read_ref, repository_dir, run_ugit_command, ugit_commit_oid,
};
use crate::common::file::{FileSpec, read_workspace, workspace_of, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

mod common;

#[rstest]
fn first_commit_has_no_parent(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hi".to_string(),
    ));

    let commit_oid = repository.commit("first").unwrap();

    let commit = repository.get_commit(&commit_oid).unwrap();
    assert_eq!(commit.parent(), None);
    assert_eq!(commit.message(), "first");

    let files = repository
        .database()
        .read_tree_flat(commit.tree_oid(), Path::new(""))
        .unwrap();
    let blob_oid = files.get(&PathBuf::from("a.txt")).unwrap();
    let blob = repository.database().parse_object_as_blob(blob_oid).unwrap();
    assert_eq!(blob.content().as_ref(), b"hi");
}

#[rstest]
fn commit_advances_attached_branch(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hi".to_string(),
    ));

    let first = repository.commit("first").unwrap();
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "bye".to_string(),
    ));
    let second = repository.commit("second").unwrap();

    assert_eq!(
        repository.get_commit(&second).unwrap().parent(),
        Some(&first)
    );
    assert_eq!(read_head(repository_dir.path()), "ref: refs/heads/master");
    assert_eq!(
        read_ref(repository_dir.path(), "refs/heads/master"),
        second.to_string()
    );
}

#[rstest]
fn checkout_restores_each_commit(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hi".to_string(),
    ));
    let first = repository.commit("first").unwrap();
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "bye".to_string(),
    ));
    let second = repository.commit("second").unwrap();

    repository.checkout(first.as_ref()).unwrap();
    assert_eq!(
        read_workspace(repository_dir.path()),
        workspace_of(&[("a.txt", "hi")])
    );

    repository.checkout(second.as_ref()).unwrap();
    assert_eq!(
        read_workspace(repository_dir.path()),
        workspace_of(&[("a.txt", "bye")])
    );
}

#[rstest]
#[case(1)]
#[case(5)]
fn ancestry_walk_visits_every_commit_once(repository_dir: TempDir, #[case] commits: usize) {
    let repository = init_repository(repository_dir.path());

    let created = (0..commits)
        .map(|index| {
            write_file(FileSpec::new(
                repository_dir.path().join("counter.txt"),
                index.to_string(),
            ));
            repository.commit(&format!("commit {index}")).unwrap()
        })
        .collect::<Vec<_>>();

    let head = repository.refs().read_head().unwrap();
    let walked = repository
        .iter_commits_and_parents([head])
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(walked.len(), commits);
    assert_eq!(walked.iter().collect::<HashSet<_>>().len(), commits);
    assert_eq!(walked.first(), created.last());
    let last = walked.last().unwrap();
    assert_eq!(repository.get_commit(last).unwrap().parent(), None);
}

#[rstest]
fn commit_on_detached_head_leaves_branch(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hi".to_string(),
    ));
    let first = repository.commit("first").unwrap();
    repository.checkout(first.as_ref()).unwrap();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "detached".to_string(),
    ));
    let detached = repository.commit("detached").unwrap();

    assert_eq!(read_head(repository_dir.path()), detached.to_string());
    assert_eq!(
        read_ref(repository_dir.path(), "refs/heads/master"),
        first.to_string()
    );
}

#[rstest]
fn multi_line_message_is_kept(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hi".to_string(),
    ));

    let commit_oid = repository.commit("subject\n\nbody line\n").unwrap();

    let commit = repository.get_commit(&commit_oid).unwrap();
    assert_eq!(commit.message(), "subject\n\nbody line\n");
    assert_eq!(commit.short_message(), "subject");
}

#[rstest]
fn commit_through_cli_prints_commit_id(repository_dir: TempDir) {
    run_ugit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hi".to_string(),
    ));

    let commit_oid = ugit_commit_oid(repository_dir.path(), "first");

    assert_eq!(commit_oid.len(), 40);
    assert_eq!(
        read_ref(repository_dir.path(), "refs/heads/master"),
        commit_oid
    );
    run_ugit_command(repository_dir.path(), &["cat-file", &commit_oid])
        .assert()
        .success()
        .stdout("tree 2eda226045258a5925aba8486c1f1ae7ab6a07a2\n\nfirst");
}
