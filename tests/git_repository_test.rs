// tests/git_repository_test.rs
use git2::{Oid, Repository, Signature};
use git_mkversion::boundary::BoundaryWarning;
use git_mkversion::cli::orchestration::{run_version_workflow, VersionWorkflowArgs};
use git_mkversion::config::Config;
use git_mkversion::git::{Git2Repository, Repository as _};
use git_mkversion::VersionCoordinator;
use serial_test::serial;
use std::env;
use tempfile::TempDir;

fn commit(repo: &Repository, message: &str, parents: &[Oid]) -> Oid {
    let sig = Signature::now("Test User", "test@example.com").expect("Could not create signature");
    let tree_id = repo
        .treebuilder(None)
        .and_then(|builder| builder.write())
        .expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let parents: Vec<_> = parents
        .iter()
        .map(|oid| repo.find_commit(*oid).expect("Could not find parent"))
        .collect();
    let parent_refs: Vec<_> = parents.iter().collect();

    repo.commit(None, &sig, &sig, message, &tree, &parent_refs)
        .expect("Could not create commit")
}

fn remote_branch(repo: &Repository, name: &str, oid: Oid) {
    repo.reference(&format!("refs/remotes/origin/{}", name), oid, true, "test setup")
        .expect("Could not create remote branch");
}

fn tag(repo: &Repository, name: &str, oid: Oid) {
    let object = repo.find_object(oid, None).unwrap();
    repo.tag_lightweight(name, &object, false)
        .expect("Could not create tag");
}

/// Checks out a local branch at `oid` that tracks `origin/<upstream>`.
fn checkout_tracking(repo: &Repository, local: &str, oid: Oid, upstream: &str) {
    let target = repo.find_commit(oid).unwrap();
    let mut branch = repo.branch(local, &target, true).unwrap();
    branch
        .set_upstream(Some(&format!("origin/{}", upstream)))
        .expect("Could not set upstream");
    repo.set_head(&format!("refs/heads/{}", local)).unwrap();
}

// History:
//
//   m1 -- m2                 origin/master
//    \
//     s1 -- s2               origin/1.8.next   (v1.8.0GA on s1)
//            \
//             f1 -- f2       origin/feature
fn setup_test_repo() -> (TempDir, Repository, Oid) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");
    repo.remote("origin", "https://example.invalid/project.git")
        .expect("Could not add remote");

    let m1 = commit(&repo, "initial", &[]);
    let m2 = commit(&repo, "trunk work", &[m1]);
    let s1 = commit(&repo, "series work", &[m1]);
    let s2 = commit(&repo, "more series work", &[s1]);
    let f1 = commit(&repo, "feature", &[s2]);
    let f2 = commit(&repo, "more feature", &[f1]);

    remote_branch(&repo, "master", m2);
    remote_branch(&repo, "1.8.next", s2);
    remote_branch(&repo, "feature", f2);
    tag(&repo, "v1.8.0GA", s1);
    tag(&repo, "not-a-release", m2);

    (temp_dir, repo, f2)
}

#[test]
fn test_lists_remote_branches_and_tags() {
    let (dir, _repo, _) = setup_test_repo();
    let repo = Git2Repository::open(dir.path()).unwrap();

    let mut branches = repo.list_remote_branches().unwrap();
    branches.sort();
    assert_eq!(
        branches,
        vec!["origin/1.8.next", "origin/feature", "origin/master"]
    );

    let mut tags = repo.list_tags().unwrap();
    tags.sort();
    assert_eq!(tags, vec!["not-a-release", "v1.8.0GA"]);
}

#[test]
fn test_commit_distance_counts_missing_commits() {
    let (dir, _repo, _) = setup_test_repo();
    let repo = Git2Repository::open(dir.path()).unwrap();

    assert_eq!(
        repo.commit_distance("origin/master", "origin/feature", None)
            .unwrap(),
        Some(4)
    );
    assert_eq!(
        repo.commit_distance("origin/1.8.next", "origin/feature", None)
            .unwrap(),
        Some(2)
    );
    assert_eq!(
        repo.commit_distance("origin/master", "origin/feature", Some(3))
            .unwrap(),
        Some(3)
    );
    assert_eq!(
        repo.commit_distance("origin/gone", "origin/feature", None)
            .unwrap(),
        None
    );
}

#[test]
fn test_tracking_branch_from_upstream() {
    let (dir, repo, f2) = setup_test_repo();
    checkout_tracking(&repo, "work", f2, "feature");

    let repo = Git2Repository::open(dir.path()).unwrap();
    assert_eq!(repo.tracking_branch_name().unwrap(), "origin/feature");
}

#[test]
fn test_local_upstream_is_matched_by_distance() {
    let (dir, repo, f2) = setup_test_repo();
    let s2 = repo
        .find_reference("refs/remotes/origin/1.8.next")
        .unwrap()
        .target()
        .unwrap();
    repo.branch("base", &repo.find_commit(s2).unwrap(), true)
        .unwrap();
    let mut work = repo
        .branch("work", &repo.find_commit(f2).unwrap(), true)
        .unwrap();
    work.set_upstream(Some("base"))
        .expect("Could not set local upstream");
    repo.set_head("refs/heads/work").unwrap();

    let repo = Git2Repository::open(dir.path()).unwrap();
    assert_eq!(repo.tracking_branch_name().unwrap(), "base");

    let computed = VersionCoordinator::new(&Config::default())
        .unwrap()
        .compute(&repo)
        .unwrap();
    assert_eq!(computed.tracking_branch, "base");
    assert_eq!(computed.active_branch_name(), Some("origin/1.8.next"));
    assert_eq!(computed.version, "1.8.1");
}

#[test]
fn test_detached_head_reports_head() {
    let (dir, repo, f2) = setup_test_repo();
    repo.set_head_detached(f2).unwrap();

    let repo = Git2Repository::open(dir.path()).unwrap();
    assert_eq!(repo.tracking_branch_name().unwrap(), "HEAD");
}

#[test]
fn test_version_on_series_branch() {
    let (dir, repo, _) = setup_test_repo();
    let s2 = repo
        .find_reference("refs/remotes/origin/1.8.next")
        .unwrap()
        .target()
        .unwrap();
    checkout_tracking(&repo, "1.8.next", s2, "1.8.next");

    let repo = Git2Repository::open(dir.path()).unwrap();
    let computed = VersionCoordinator::new(&Config::default())
        .unwrap()
        .compute(&repo)
        .unwrap();

    assert_eq!(computed.active_branch_name(), Some("origin/1.8.next"));
    assert_eq!(computed.version, "1.8.1");
}

#[test]
fn test_version_on_feature_branch_uses_nearest_series() {
    let (dir, repo, f2) = setup_test_repo();
    checkout_tracking(&repo, "work", f2, "feature");

    let repo = Git2Repository::open(dir.path()).unwrap();
    let computed = VersionCoordinator::new(&Config::default())
        .unwrap()
        .compute(&repo)
        .unwrap();

    assert_eq!(computed.tracking_branch, "origin/feature");
    assert_eq!(computed.active_branch_name(), Some("origin/1.8.next"));
    assert_eq!(computed.version, "1.8.1");
}

#[test]
fn test_detached_checkout_measures_from_head() {
    let (dir, repo, f2) = setup_test_repo();
    repo.set_head_detached(f2).unwrap();

    let args = VersionWorkflowArgs {
        repo_path: Some(dir.path().to_string_lossy().into_owned()),
        ..VersionWorkflowArgs::default()
    };
    let result = run_version_workflow(&args, &Config::default()).unwrap();

    assert_eq!(result.computed.tracking_branch, "HEAD");
    assert_eq!(result.computed.active_branch_name(), Some("origin/1.8.next"));
    assert_eq!(result.version, "1.8.1");
    assert_eq!(result.warnings, vec![BoundaryWarning::UntrackedCheckout]);
}

#[test]
fn test_unborn_checkout_is_unknown() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    let m1 = commit(&repo, "initial", &[]);
    remote_branch(&repo, "master", m1);

    let repo = Git2Repository::open(dir.path()).unwrap();
    let computed = VersionCoordinator::new(&Config::default())
        .unwrap()
        .compute(&repo)
        .unwrap();

    assert!(computed.is_unknown());
    assert_eq!(computed.version, "unknown");
}

#[test]
fn test_branch_override_for_trunk() {
    let (dir, _repo, _) = setup_test_repo();

    let args = VersionWorkflowArgs {
        repo_path: Some(dir.path().to_string_lossy().into_owned()),
        branch: Some("origin/master".to_string()),
        pad: true,
        ..VersionWorkflowArgs::default()
    };
    let result = run_version_workflow(&args, &Config::default()).unwrap();

    assert_eq!(result.version, "2.0.0.0");
    assert!(result.warnings.is_empty());
}

#[test]
#[serial]
fn test_workflow_discovers_repository_from_cwd() {
    let (dir, repo, f2) = setup_test_repo();
    checkout_tracking(&repo, "work", f2, "feature");
    let original_dir = env::current_dir().unwrap();

    env::set_current_dir(dir.path()).expect("Could not change to temp dir");
    let result = run_version_workflow(&VersionWorkflowArgs::default(), &Config::default());
    env::set_current_dir(original_dir).unwrap();

    let result = result.expect("workflow should succeed inside a repository");
    assert_eq!(result.version, "1.8.1");
}

#[test]
fn test_workflow_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    let args = VersionWorkflowArgs {
        repo_path: Some(dir.path().join("missing").to_string_lossy().into_owned()),
        ..VersionWorkflowArgs::default()
    };

    let err = run_version_workflow(&args, &Config::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("Not in a git repository"));
}
