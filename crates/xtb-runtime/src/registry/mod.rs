pub mod ffi_bridge;
pub mod native;

use std::path::Path;

use crate::error::LoadError;

pub use ffi_bridge::ModuleHandle;
pub use native::{ModuleRecord, NativeModuleRegistry};

/// The host framework's table of loaded modules.
///
/// Implementations are the sole arbiter of "loaded": they must register a
/// given name at most once, and a second `load` for a registered name must
/// be a no-op or a well-defined error.
pub trait ModuleRegistry: Send + Sync {
    fn is_loaded(&self, name: &str) -> bool;

    fn load(&self, path: &Path) -> Result<(), LoadError>;
}

/// Existence check for a candidate artifact path.
pub trait ArtifactProbe {
    fn probe(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl ArtifactProbe for FsProbe {
    fn probe(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_probe() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Xtb.module.so");
        assert!(!FsProbe.probe(&file));

        std::fs::write(&file, b"fake").unwrap();
        assert!(FsProbe.probe(&file));

        // directories are not artifacts
        assert!(!FsProbe.probe(dir.path()));
    }
}
