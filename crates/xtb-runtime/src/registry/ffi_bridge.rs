//! FFI bridge for loading native modules (.so/.dylib/.dll) via libloading.
//!
//! Uses double-boxing pattern: `Box<Box<dyn Module>>` → thin `*mut c_void`
//! to avoid passing fat pointers over `extern "C"` boundary.
//!
//! **Constraint:** Module and host must share the same Rust compiler version.

use std::ffi::c_void;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use libloading::Library;

use crate::error::LoadError;
use crate::module::Module;

/// Exported symbol every module library must provide.
pub const FACTORY_SYMBOL: &str = "_xtb_module_factory";

/// Symbol type for `_xtb_module_factory() -> *mut c_void`
type FactoryFn = extern "C" fn() -> *mut c_void;

/// A dynamically loaded module together with the library backing it.
///
/// Registries share handles as `Arc<ModuleHandle>` so the library stays
/// mapped for as long as anyone holds the module.
///
/// Drop order matters: `module` must be dropped before `_library`
/// (Rust drops fields in declaration order).
pub struct ModuleHandle {
    module: Box<dyn Module>,
    path: PathBuf,
    _library: Library,
}

impl std::fmt::Debug for ModuleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleHandle")
            .field("module_name", &self.module.name())
            .field("path", &self.path)
            .finish()
    }
}

impl ModuleHandle {
    /// Open the shared library at `path` and construct its module.
    ///
    /// Calls the factory with panic isolation, reconstructs the
    /// double-boxed `Box<dyn Module>` from the returned thin pointer.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let lib = unsafe { Library::new(path) }.map_err(|e| LoadError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let factory = unsafe { lib.get::<FactoryFn>(FACTORY_SYMBOL.as_bytes()) }.map_err(|_| {
            LoadError::MissingSymbol {
                path: path.to_path_buf(),
                symbol: FACTORY_SYMBOL,
            }
        })?;

        let raw = catch_unwind(AssertUnwindSafe(|| factory())).map_err(|_| {
            LoadError::FactoryPanicked {
                path: path.to_path_buf(),
            }
        })?;

        if raw.is_null() {
            return Err(LoadError::NullModule {
                path: path.to_path_buf(),
            });
        }

        // SAFETY: the factory contract (see `declare_module!`) hands over a
        // `Box<Box<dyn Module>>` leaked into a thin pointer. No fallible ops
        // between from_raw and return. Host and module must share an allocator.
        let module: Box<dyn Module> = unsafe { *Box::from_raw(raw as *mut Box<dyn Module>) };

        Ok(Self {
            module,
            path: path.to_path_buf(),
            _library: lib,
        })
    }

    pub fn module(&self) -> &dyn Module {
        &*self.module
    }

    /// Path the library was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_nonexistent_library() {
        let result = ModuleHandle::open(Path::new("/nonexistent/Xtb.module.so"));
        assert!(matches!(result, Err(LoadError::Open { .. })));
    }

    #[test]
    fn test_open_invalid_library() {
        // A file that is not a valid shared library
        let dir = tempfile::tempdir().unwrap();
        let fake_lib = dir.path().join("Xtb.module.so");
        std::fs::write(&fake_lib, b"not a real library").unwrap();

        let err = ModuleHandle::open(&fake_lib).unwrap_err();
        assert!(err.to_string().contains("Xtb.module.so"));
    }
}
