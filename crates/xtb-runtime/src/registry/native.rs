use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tracing::{info, warn};

use super::ffi_bridge::ModuleHandle;
use super::ModuleRegistry;
use crate::error::LoadError;
use crate::module::MODULE_API_VERSION;

/// Summary of a registered module
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ModuleRecord {
    pub name: String,
    pub version: String,
    pub path: PathBuf,
    pub loaded_at: DateTime<Utc>,
}

struct Entry {
    handle: Arc<ModuleHandle>,
    loaded_at: DateTime<Utc>,
}

impl Entry {
    fn record(&self) -> ModuleRecord {
        let module = self.handle.module();
        ModuleRecord {
            name: module.name().to_string(),
            version: module.version().to_string(),
            path: self.handle.path().to_path_buf(),
            loaded_at: self.loaded_at,
        }
    }
}

/// Registry that loads modules from shared libraries on disk.
///
/// Share it as `Arc<NativeModuleRegistry>`; every consumer in the process
/// should go through the same instance.
pub struct NativeModuleRegistry {
    modules: DashMap<String, Entry>,
    // Serializes open+insert so two racing loads register a name once.
    load_lock: Mutex<()>,
}

impl NativeModuleRegistry {
    pub fn new() -> Self {
        Self {
            modules: DashMap::new(),
            load_lock: Mutex::new(()),
        }
    }

    /// Open the library at `path`, validate it, and register its module.
    pub fn register(&self, path: &Path) -> Result<Arc<ModuleHandle>, LoadError> {
        let _guard = self
            .load_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Same artifact already mapped: reject without running its factory again.
        if let Some(name) = self.registered_from(path) {
            return Err(LoadError::AlreadyRegistered { name });
        }

        let handle = ModuleHandle::open(path)?;
        let module = handle.module();
        let name = module.name().to_string();

        if module.api_version() != MODULE_API_VERSION {
            return Err(LoadError::ApiVersionMismatch {
                name,
                found: module.api_version(),
                expected: MODULE_API_VERSION,
            });
        }

        if self.modules.contains_key(&name) {
            warn!(module = %name, path = ?path, "Module already registered, ignoring new artifact");
            return Err(LoadError::AlreadyRegistered { name });
        }

        let handle = Arc::new(handle);
        self.modules.insert(
            name.clone(),
            Entry {
                handle: handle.clone(),
                loaded_at: Utc::now(),
            },
        );

        info!(module = %name, path = ?path, "Module registered");
        Ok(handle)
    }

    /// Name of the module registered from `path`, if any
    pub fn registered_from(&self, path: &Path) -> Option<String> {
        let wanted = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.modules
            .iter()
            .find(|e| {
                let p = e.handle.path();
                p == path || p.canonicalize().map(|c| c == wanted).unwrap_or(false)
            })
            .map(|e| e.key().clone())
    }

    /// Handle for a registered module
    pub fn get(&self, name: &str) -> Option<Arc<ModuleHandle>> {
        self.modules.get(name).map(|e| e.handle.clone())
    }

    /// All registered modules, sorted by name
    pub fn list(&self) -> Vec<ModuleRecord> {
        let mut records: Vec<ModuleRecord> = self.modules.iter().map(|e| e.record()).collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }

    /// Remove a module from the registry.
    ///
    /// The library is closed once the last outstanding handle is dropped.
    pub fn unload(&self, name: &str) -> Option<ModuleRecord> {
        let (_, entry) = self.modules.remove(name)?;
        info!(module = name, "Module unregistered");
        Some(entry.record())
    }
}

impl Default for NativeModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleRegistry for NativeModuleRegistry {
    fn is_loaded(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    fn load(&self, path: &Path) -> Result<(), LoadError> {
        self.register(path).map(|_| ())
    }
}
