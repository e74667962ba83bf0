use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use xtb_runtime::{
    LoadOutcome, LoaderConfig, ModuleLocator, ModuleRecord, NativeModuleRegistry, SearchPlan,
};

use super::{capabilities, print_capabilities, print_json, Capabilities};

#[derive(Debug, Serialize)]
pub struct LoadReport {
    pub module: ModuleRecord,
    pub already_loaded: bool,
    pub capabilities: Vec<Capabilities>,
}

pub fn execute(name: Option<String>, json: bool, config: &LoaderConfig) -> Result<()> {
    let module = name.unwrap_or_else(|| config.module.name.clone());
    let plan = SearchPlan::from_config(config)?;
    let registry = Arc::new(NativeModuleRegistry::new());
    let locator = ModuleLocator::new(registry.clone(), plan);

    let outcome = locator.ensure_loaded(&module)?;
    let handle = registry
        .get(&module)
        .with_context(|| format!("Module '{}' loaded but not registered under that name", module))?;
    let record = registry
        .list()
        .into_iter()
        .find(|r| r.name == module)
        .with_context(|| format!("Module '{}' missing from registry listing", module))?;

    let report = LoadReport {
        already_loaded: outcome == LoadOutcome::AlreadyLoaded,
        capabilities: capabilities(handle.module()),
        module: record,
    };
    info!(module = %report.module.name, path = ?report.module.path, "Module ready");

    if json {
        return print_json(&report);
    }

    println!(
        "Module '{}' ({}) loaded from {}",
        report.module.name,
        report.module.version,
        report.module.path.display()
    );
    print_capabilities(&report.capabilities);
    Ok(())
}
