use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;
use xtb_runtime::{ArtifactProbe, FsProbe, LoaderConfig, SearchPlan};

use super::print_json;

#[derive(Debug, Serialize)]
pub struct LocateReport {
    pub module: String,
    pub filename: String,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
pub struct Candidate {
    pub dir: PathBuf,
    pub path: PathBuf,
    pub present: bool,
}

impl LocateReport {
    /// First candidate with an artifact on disk
    pub fn first_present(&self) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.present)
    }
}

/// Candidate paths for `module` in search order, with presence on disk
pub fn build_report(module: &str, plan: &SearchPlan, probe: &impl ArtifactProbe) -> LocateReport {
    let filename = plan.filename_for(module);
    let candidates = plan
        .candidate_dirs()
        .into_iter()
        .map(|dir| {
            let path = dir.join(&filename);
            Candidate {
                present: probe.probe(&path),
                dir,
                path,
            }
        })
        .collect();

    LocateReport {
        module: module.to_string(),
        filename,
        candidates,
    }
}

pub fn execute(name: Option<String>, json: bool, config: &LoaderConfig) -> Result<()> {
    let module = name.unwrap_or_else(|| config.module.name.clone());
    let plan = SearchPlan::from_config(config)?;
    let report = build_report(&module, &plan, &FsProbe);
    debug!(module = %report.module, filename = %report.filename, "Resolved search plan");

    if json {
        return print_json(&report);
    }

    println!("Module '{}' -> {}", report.module, report.filename);
    for (i, c) in report.candidates.iter().enumerate() {
        let mark = if c.present { "found" } else { "missing" };
        println!("  {}. {} [{}]", i + 1, c.dir.display(), mark);
    }
    match report.first_present() {
        Some(c) => println!("Would load: {}", c.path.display()),
        None => println!("No candidate directory contains {}", report.filename),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xtb_runtime::module_filename;

    #[test]
    fn test_report_marks_present_candidates() {
        let root = tempfile::tempdir().unwrap();
        let anchor = root.path().join("a").join("b").join("c");
        std::fs::create_dir_all(&anchor).unwrap();
        std::fs::write(root.path().join(module_filename("Xtb")), b"fake").unwrap();

        let report = build_report("Xtb", &SearchPlan::new(&anchor), &FsProbe);
        assert_eq!(report.filename, module_filename("Xtb"));
        assert_eq!(report.candidates.len(), 2);
        assert!(!report.candidates[0].present);
        assert!(report.candidates[1].present);
        assert_eq!(report.candidates[1].dir, root.path());
        assert_eq!(
            report.first_present().unwrap().path,
            root.path().join(module_filename("Xtb"))
        );
    }
}
