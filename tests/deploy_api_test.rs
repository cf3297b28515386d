//! Integration tests for the deployment API.

use std::fs;
use std::path::{Path, PathBuf};

use modfarm::deploy::DeploymentManager;
use modfarm::paths::Roots;
use modfarm::tree::ModuleTree;
use modfarm::ModfarmError;
use tempfile::TempDir;

fn setup(leaves: &[&str]) -> (TempDir, Roots) {
    let temp = TempDir::new().unwrap();
    let roots = Roots::new(temp.path());
    for leaf in leaves {
        let path = roots.available.join(leaf);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("# {} module", leaf)).unwrap();
    }
    (temp, roots)
}

fn deployed_leaves(roots: &Roots) -> Vec<PathBuf> {
    ModuleTree::scan(&roots.deployed).unwrap().leaves_under(None)
}

#[test]
fn auto_deploy_deploys_only_the_difference() {
    let (_temp, roots) = setup(&["gcc/12", "clang/15"]);

    let mut manager = DeploymentManager::new(roots.clone()).unwrap();
    manager.deploy(Path::new("gcc/12")).unwrap();

    // Fresh manager, as a second command invocation would build.
    let mut manager = DeploymentManager::new(roots.clone()).unwrap();
    let report = manager.auto_deploy();

    assert!(report.ok());
    assert_eq!(report.affected, vec![PathBuf::from("clang/15")]);
    assert_eq!(
        deployed_leaves(&roots),
        vec![PathBuf::from("clang/15"), PathBuf::from("gcc/12")]
    );
}

#[test]
fn group_deploy_covers_every_version() {
    let (_temp, roots) = setup(&["gcc/11", "gcc/12"]);

    let mut manager = DeploymentManager::new(roots.clone()).unwrap();
    let deployed = manager.deploy(Path::new("gcc")).unwrap();

    assert_eq!(
        deployed,
        vec![PathBuf::from("gcc/11"), PathBuf::from("gcc/12")]
    );
    assert_eq!(deployed_leaves(&roots).len(), 2);
}

#[test]
fn deploy_withdraw_round_trip_restores_leaf_set() {
    let (_temp, roots) = setup(&["gcc/12", "clang/15"]);

    let mut manager = DeploymentManager::new(roots.clone()).unwrap();
    manager.deploy(Path::new("clang/15")).unwrap();
    let before = deployed_leaves(&roots);

    manager.deploy(Path::new("gcc/12")).unwrap();
    manager.withdraw(Path::new("gcc/12")).unwrap();

    assert_eq!(deployed_leaves(&roots), before);
}

#[test]
fn double_deploy_creates_no_duplicates() {
    let (_temp, roots) = setup(&["gcc/12"]);

    let mut manager = DeploymentManager::new(roots.clone()).unwrap();
    manager.deploy(Path::new("gcc/12")).unwrap();
    let after_once = deployed_leaves(&roots);

    manager.deploy(Path::new("gcc/12")).unwrap();
    assert_eq!(deployed_leaves(&roots), after_once);
}

#[test]
fn withdraw_of_never_deployed_path_is_noop() {
    let (_temp, roots) = setup(&["gcc/12"]);

    let mut manager = DeploymentManager::new(roots.clone()).unwrap();
    let withdrawn = manager.withdraw(Path::new("gcc/12")).unwrap();

    assert!(withdrawn.is_empty());
    assert!(deployed_leaves(&roots).is_empty());
}

#[test]
fn withdraw_refuses_to_delete_plain_files() {
    let (_temp, roots) = setup(&["gcc/12"]);
    let planted = roots.deployed.join("gcc/12");
    fs::create_dir_all(planted.parent().unwrap()).unwrap();
    fs::write(&planted, "precious data").unwrap();

    let mut manager = DeploymentManager::new(roots).unwrap();
    let err = manager.withdraw(Path::new("gcc/12")).unwrap_err();

    assert!(matches!(err, ModfarmError::InvariantViolation { .. }));
    assert_eq!(fs::read_to_string(&planted).unwrap(), "precious data");
}

#[test]
fn interrupted_deploy_is_repaired_by_rerun() {
    let (_temp, roots) = setup(&["clang/15", "gcc/11", "gcc/12"]);

    let mut manager = DeploymentManager::new(roots.clone()).unwrap();
    manager.auto_deploy();
    // Simulate a partial state left by an interrupted run.
    fs::remove_file(roots.deployed.join("gcc/11")).unwrap();

    let mut manager = DeploymentManager::new(roots.clone()).unwrap();
    let report = manager.auto_deploy();

    assert!(report.ok());
    assert_eq!(report.affected, vec![PathBuf::from("gcc/11")]);
    assert_eq!(deployed_leaves(&roots).len(), 3);
}
