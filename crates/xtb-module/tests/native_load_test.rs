//! Loads the built Xtb cdylib through the native registry.
//!
//! Run after `cargo build -p xtb-module`; the artifact is copied under its
//! install name into a temporary bindings layout.

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::PathBuf;
use std::sync::Arc;

use xtb_runtime::{
    module_filename, LoadError, LoadOutcome, ModuleLocator, ModuleRegistry, NativeModuleRegistry,
    SearchPlan,
};

fn built_artifact() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../target/debug")
        .join(format!("{DLL_PREFIX}xtb_module{DLL_SUFFIX}"))
}

fn install_into(dir: &std::path::Path) -> PathBuf {
    let target = dir.join(module_filename("Xtb"));
    std::fs::copy(built_artifact(), &target).unwrap();
    target
}

#[test]
#[ignore] // Requires the xtb-module cdylib to be built
fn test_locate_and_register_built_module() {
    let dir = tempfile::tempdir().unwrap();
    let installed = install_into(dir.path());

    let registry = Arc::new(NativeModuleRegistry::new());
    let locator = ModuleLocator::new(registry.clone(), SearchPlan::new(dir.path()));

    let outcome = locator.ensure_loaded("Xtb").unwrap();
    assert_eq!(outcome, LoadOutcome::LoadedFrom(installed.clone()));
    assert_eq!(locator.ensure_loaded("Xtb").unwrap(), LoadOutcome::AlreadyLoaded);

    let handle = registry.get("Xtb").unwrap();
    assert!(handle.module().has("calculator", "GFN2"));
    assert_eq!(registry.list()[0].path, installed);
}

#[test]
#[ignore] // Requires the xtb-module cdylib to be built
fn test_second_artifact_for_same_name_rejected() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let a = install_into(first.path());
    let b = install_into(second.path());

    let registry = NativeModuleRegistry::new();
    registry.load(&a).unwrap();
    let err = registry.load(&b).unwrap_err();
    assert_eq!(
        err,
        LoadError::AlreadyRegistered {
            name: "Xtb".into()
        }
    );
    assert_eq!(registry.list().len(), 1);

    registry.unload("Xtb").unwrap();
    assert!(!registry.is_loaded("Xtb"));
}

#[test]
#[ignore] // Requires the xtb-module cdylib to be built
fn test_same_artifact_twice_rejected_by_path() {
    let dir = tempfile::tempdir().unwrap();
    let installed = install_into(dir.path());

    let registry = NativeModuleRegistry::new();
    registry.load(&installed).unwrap();
    assert_eq!(registry.registered_from(&installed).as_deref(), Some("Xtb"));
    assert_eq!(
        registry.load(&installed).unwrap_err(),
        LoadError::AlreadyRegistered {
            name: "Xtb".into()
        }
    );
}
