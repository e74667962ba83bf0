use std::env::consts::DLL_SUFFIX;

/// Fixed segment between the module stem and the platform suffix.
pub const MODULE_SEGMENT: &str = ".module";

/// Expected artifact filename for a module on this platform:
/// `<stem>.module.so`, `<stem>.module.dylib` or `<stem>.module.dll`.
pub fn module_filename(stem: &str) -> String {
    module_filename_with_suffix(stem, DLL_SUFFIX)
}

/// Same as [`module_filename`] with an explicit dynamic-library suffix.
pub fn module_filename_with_suffix(stem: &str, suffix: &str) -> String {
    format!("{stem}{MODULE_SEGMENT}{suffix}")
}
