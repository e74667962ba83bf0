//! The Xtb module.
//!
//! Announces the semiempirical tight-binding calculators wrapped by this
//! package. The artifact built from this crate is installed as
//! `Xtb.module<suffix>` next to the bindings so the locator can find it.

use xtb_module_sdk::{declare_module, Module, ModelMap, MODULE_API_VERSION};

pub const CALCULATOR: &str = "calculator";

const MODELS: ModelMap = ModelMap::new(&[(CALCULATOR, &["GFN0", "GFN1", "GFN2", "GFNFF"])]);

#[derive(Debug, Default)]
pub struct XtbModule;

impl Module for XtbModule {
    fn name(&self) -> &str {
        "Xtb"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn api_version(&self) -> u32 {
        MODULE_API_VERSION
    }

    fn has(&self, interface: &str, model: &str) -> bool {
        MODELS.has(interface, model)
    }

    fn announce_interfaces(&self) -> Vec<String> {
        MODELS.interfaces()
    }

    fn announce_models(&self, interface: &str) -> Vec<String> {
        MODELS.models(interface)
    }
}

declare_module!(XtbModule);
