//! xtb Module SDK
//!
//! Re-exports the runtime's module contract and adds the pieces a module
//! crate needs: a static interface/model table and the export macro.

pub use xtb_runtime::module::{Module, MODULE_API_VERSION};
pub use xtb_runtime::registry::ffi_bridge::FACTORY_SYMBOL;

/// Static table of interfaces and the models implementing each.
///
/// Lookups are case-sensitive; order is preserved in announcements.
#[derive(Debug, Clone, Copy)]
pub struct ModelMap {
    entries: &'static [(&'static str, &'static [&'static str])],
}

impl ModelMap {
    pub const fn new(entries: &'static [(&'static str, &'static [&'static str])]) -> Self {
        Self { entries }
    }

    pub fn has(&self, interface: &str, model: &str) -> bool {
        self.models_of(interface)
            .map(|models| models.contains(&model))
            .unwrap_or(false)
    }

    pub fn interfaces(&self) -> Vec<String> {
        self.entries.iter().map(|(i, _)| i.to_string()).collect()
    }

    pub fn models(&self, interface: &str) -> Vec<String> {
        self.models_of(interface)
            .map(|models| models.iter().map(|m| m.to_string()).collect())
            .unwrap_or_default()
    }

    fn models_of(&self, interface: &str) -> Option<&'static [&'static str]> {
        self.entries
            .iter()
            .find(|(i, _)| *i == interface)
            .map(|(_, models)| *models)
    }
}

/// Macro for the module entry point. Use in a `cdylib` module crate:
/// ```ignore
/// use xtb_module_sdk::*;
///
/// #[derive(Default)]
/// struct MyModule;
/// impl Module for MyModule { ... }
///
/// declare_module!(MyModule);
/// ```
///
/// The exported factory hands the host a `Box<Box<dyn Module>>` as a thin
/// pointer, or null if construction panicked.
#[macro_export]
macro_rules! declare_module {
    ($module_type:ty) => {
        #[no_mangle]
        pub extern "C" fn _xtb_module_factory() -> *mut ::std::ffi::c_void {
            let created = ::std::panic::catch_unwind(|| {
                let module: ::std::boxed::Box<dyn $crate::Module> =
                    ::std::boxed::Box::new(<$module_type>::default());
                module
            });
            match created {
                Ok(module) => ::std::boxed::Box::into_raw(::std::boxed::Box::new(module))
                    as *mut ::std::ffi::c_void,
                Err(_) => ::std::ptr::null_mut(),
            }
        }
    };
}
