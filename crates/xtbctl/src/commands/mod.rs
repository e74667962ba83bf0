pub mod init;
pub mod inspect;
pub mod load;
pub mod locate;

use serde::Serialize;
use xtb_runtime::Module;

/// Interfaces and models announced by a loaded module
#[derive(Debug, Serialize)]
pub struct Capabilities {
    pub interface: String,
    pub models: Vec<String>,
}

pub fn capabilities(module: &dyn Module) -> Vec<Capabilities> {
    module
        .announce_interfaces()
        .into_iter()
        .map(|interface| Capabilities {
            models: module.announce_models(&interface),
            interface,
        })
        .collect()
}

pub fn print_capabilities(caps: &[Capabilities]) {
    if caps.is_empty() {
        println!("  (no interfaces announced)");
    }
    for cap in caps {
        println!("  {}: {}", cap.interface, cap.models.join(", "));
    }
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
