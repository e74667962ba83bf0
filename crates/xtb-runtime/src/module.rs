//! Core Module trait — defined here in xtb-runtime so the FFI bridge can reference it
//! without circular dependencies. Re-exported by xtb-module-sdk for module authors.

/// Current module API version. Modules built against another version are rejected at load.
pub const MODULE_API_VERSION: u32 = 1;

/// A native framework module: a named bundle of interface/model implementations.
///
/// Module authors implement this trait and use `declare_module!` to export it.
pub trait Module: Send + Sync {
    /// Module name (unique within a registry)
    fn name(&self) -> &str;

    /// Module version (semver)
    fn version(&self) -> &str;

    /// API version this module was built against
    fn api_version(&self) -> u32;

    /// Whether `model` is provided for `interface`
    fn has(&self, interface: &str, model: &str) -> bool;

    /// Interfaces this module implements
    fn announce_interfaces(&self) -> Vec<String>;

    /// Models available for `interface`; empty if the interface is unknown
    fn announce_models(&self, interface: &str) -> Vec<String>;
}
