use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use xtb_runtime::NativeModuleRegistry;

use super::{capabilities, print_capabilities, print_json, Capabilities};

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub path: PathBuf,
    pub name: String,
    pub version: String,
    pub api_version: u32,
    pub capabilities: Vec<Capabilities>,
}

pub fn execute(path: &Path, json: bool) -> Result<()> {
    let registry = NativeModuleRegistry::new();
    let handle = registry
        .register(path)
        .with_context(|| format!("Failed to inspect {}", path.display()))?;
    let module = handle.module();

    let report = InspectReport {
        path: handle.path().to_path_buf(),
        name: module.name().to_string(),
        version: module.version().to_string(),
        api_version: module.api_version(),
        capabilities: capabilities(module),
    };

    if json {
        return print_json(&report);
    }

    println!(
        "{}: module '{}' {} (API v{})",
        report.path.display(),
        report.name,
        report.version,
        report.api_version
    );
    print_capabilities(&report.capabilities);
    Ok(())
}
