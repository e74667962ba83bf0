//! Locate a module's shared library on disk and register it exactly once.
//!
//! The locator holds no "loaded" state of its own. Every call asks the
//! registry first, then probes an ordered list of candidate directories and
//! stops at the first artifact the registry accepts.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::LoaderConfig;
use crate::error::{LoadError, LocateError};
use crate::naming::module_filename;
use crate::registry::{ArtifactProbe, FsProbe, ModuleRegistry};

/// Successful result of [`ModuleLocator::ensure_loaded`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The registry already had the module; nothing was probed.
    AlreadyLoaded,
    /// The module was registered from this artifact path.
    LoadedFrom(PathBuf),
}

/// Where to look for module artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPlan {
    /// Directory holding the bindings artifact
    pub anchor: PathBuf,
    /// How many levels above `anchor` the second candidate lives
    pub ascend_levels: usize,
    /// Searched after the two default candidates
    pub extra_dirs: Vec<PathBuf>,
    /// Overrides the module name when building the artifact filename
    pub file_stem: Option<String>,
}

impl SearchPlan {
    pub fn new(anchor: impl Into<PathBuf>) -> Self {
        Self {
            anchor: anchor.into(),
            ascend_levels: 3,
            extra_dirs: Vec::new(),
            file_stem: None,
        }
    }

    /// Plan anchored at the running executable's directory.
    pub fn from_current_exe() -> Result<Self> {
        Ok(Self::new(current_exe_dir()?))
    }

    /// Plan built from config; falls back to the running executable's
    /// directory when no anchor is configured.
    pub fn from_config(config: &LoaderConfig) -> Result<Self> {
        let anchor = match config.search.expanded_anchor()? {
            Some(anchor) => anchor,
            None => current_exe_dir()?,
        };
        Ok(Self {
            anchor,
            ascend_levels: config.search.ascend_levels,
            extra_dirs: config.search.expanded_extra_dirs()?,
            file_stem: config.module.file_stem.clone(),
        })
    }

    /// Artifact filename for `name` on this platform
    pub fn filename_for(&self, name: &str) -> String {
        module_filename(self.file_stem.as_deref().unwrap_or(name))
    }

    /// Ordered candidate directories: the anchor, the directory
    /// `ascend_levels` above it, then the extra dirs. Duplicates keep their
    /// first position.
    pub fn candidate_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::with_capacity(2 + self.extra_dirs.len());
        let defaults = [
            self.anchor.clone(),
            ascend(&self.anchor, self.ascend_levels),
        ];
        for dir in defaults.into_iter().chain(self.extra_dirs.iter().cloned()) {
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
        dirs
    }
}

/// Walk `levels` parents up, stopping at the filesystem root.
fn ascend(dir: &Path, levels: usize) -> PathBuf {
    let mut current = dir;
    for _ in 0..levels {
        match current.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => current = parent,
            _ => break,
        }
    }
    current.to_path_buf()
}

fn current_exe_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to resolve current executable")?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent()
        .map(Path::to_path_buf)
        .context("Current executable has no parent directory")
}

/// Finds and registers module artifacts through a shared registry handle.
pub struct ModuleLocator<R: ModuleRegistry + ?Sized, P: ArtifactProbe = FsProbe> {
    registry: Arc<R>,
    probe: P,
    plan: SearchPlan,
}

impl<R: ModuleRegistry + ?Sized> ModuleLocator<R> {
    pub fn new(registry: Arc<R>, plan: SearchPlan) -> Self {
        Self::with_probe(registry, FsProbe, plan)
    }
}

impl<R: ModuleRegistry + ?Sized, P: ArtifactProbe> ModuleLocator<R, P> {
    pub fn with_probe(registry: Arc<R>, probe: P, plan: SearchPlan) -> Self {
        Self {
            registry,
            probe,
            plan,
        }
    }

    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    pub fn plan(&self) -> &SearchPlan {
        &self.plan
    }

    /// Make sure module `name` is registered, loading it from disk if needed.
    ///
    /// Per-candidate load failures are logged and skipped; only running out
    /// of candidates is an error. A load that the registry accepts but that
    /// leaves `name` unregistered counts as a failure.
    pub fn ensure_loaded(&self, name: &str) -> Result<LoadOutcome, LocateError> {
        if name.is_empty() {
            return Err(LocateError::EmptyName);
        }

        if self.registry.is_loaded(name) {
            debug!(module = name, "Module already loaded");
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        let filename = self.plan.filename_for(name);
        let searched = self.plan.candidate_dirs();
        let mut failures: Vec<(PathBuf, LoadError)> = Vec::new();

        for dir in &searched {
            let path = dir.join(&filename);
            if !self.probe.probe(&path) {
                debug!(module = name, path = ?path, "No artifact at candidate");
                continue;
            }

            // The registry, not the load result, decides whether `name` is loaded.
            let error = match self.registry.load(&path) {
                Ok(()) if self.registry.is_loaded(name) => {
                    info!(module = name, path = ?path, "Module loaded");
                    return Ok(LoadOutcome::LoadedFrom(path));
                }
                Ok(()) => LoadError::NameMismatch {
                    requested: name.to_string(),
                    path: path.clone(),
                },
                Err(_) if self.registry.is_loaded(name) => {
                    debug!(module = name, path = ?path, "Module registered by a concurrent load");
                    return Ok(LoadOutcome::AlreadyLoaded);
                }
                Err(e) => e,
            };
            warn!(module = name, path = ?path, error = %error, "Could not load module artifact");
            failures.push((path, error));
        }

        if failures.is_empty() {
            Err(LocateError::NotFound { filename, searched })
        } else {
            Err(LocateError::Exhausted {
                filename,
                searched,
                failures,
            })
        }
    }
}
