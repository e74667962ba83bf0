pub mod config;
pub mod error;
pub mod locator;
pub mod module;
pub mod naming;
pub mod registry;

use std::sync::Arc;

pub use config::{load_config, LoaderConfig, ModuleConfig, SearchConfig};
pub use error::{LoadError, LocateError};
pub use locator::{LoadOutcome, ModuleLocator, SearchPlan};
pub use module::{Module, MODULE_API_VERSION};
pub use naming::module_filename;
pub use registry::{
    ArtifactProbe, FsProbe, ModuleHandle, ModuleRecord, ModuleRegistry, NativeModuleRegistry,
};

/// Name the xtb module registers under
pub const XTB_MODULE_NAME: &str = "Xtb";

/// Make sure the xtb module is registered, searching next to the running executable.
pub fn ensure_xtb<R: ModuleRegistry + ?Sized>(registry: Arc<R>) -> anyhow::Result<LoadOutcome> {
    let locator = ModuleLocator::new(registry, SearchPlan::from_current_exe()?);
    Ok(locator.ensure_loaded(XTB_MODULE_NAME)?)
}

/// Initialize structured JSON logging on stderr, keeping stdout for reports
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .json()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}
