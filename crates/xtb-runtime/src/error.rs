use std::fmt::Write as _;
use std::path::PathBuf;

use thiserror::Error;

/// A single load attempt rejected by the registry.
///
/// Recoverable from the locator's point of view: the next candidate
/// directory is tried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("failed to open library '{}': {message}", .path.display())]
    Open { path: PathBuf, message: String },

    #[error("symbol {symbol} not found in '{}'", .path.display())]
    MissingSymbol { path: PathBuf, symbol: &'static str },

    #[error("module factory in '{}' panicked", .path.display())]
    FactoryPanicked { path: PathBuf },

    #[error("module factory in '{}' returned null", .path.display())]
    NullModule { path: PathBuf },

    #[error("module '{name}' was built against API version {found}, runtime expects {expected}")]
    ApiVersionMismatch {
        name: String,
        found: u32,
        expected: u32,
    },

    #[error("module '{name}' is already registered")]
    AlreadyRegistered { name: String },

    #[error("'{}' loaded but no module named '{requested}' was registered", .path.display())]
    NameMismatch { requested: String, path: PathBuf },

    #[error("{0}")]
    Rejected(String),
}

/// Terminal failure of `ModuleLocator::ensure_loaded`.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("module name must not be empty")]
    EmptyName,

    #[error("{filename} could not be located; searched: {}", join_dirs(.searched))]
    NotFound {
        filename: String,
        searched: Vec<PathBuf>,
    },

    #[error(
        "{filename} was found but could not be loaded; searched: {}; failures: {}",
        join_dirs(.searched),
        join_failures(.failures)
    )]
    Exhausted {
        filename: String,
        searched: Vec<PathBuf>,
        failures: Vec<(PathBuf, LoadError)>,
    },
}

impl LocateError {
    /// Directories probed before giving up. Empty for `EmptyName`.
    pub fn searched(&self) -> &[PathBuf] {
        match self {
            LocateError::EmptyName => &[],
            LocateError::NotFound { searched, .. } | LocateError::Exhausted { searched, .. } => {
                searched
            }
        }
    }
}

fn join_dirs(dirs: &[PathBuf]) -> String {
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_failures(failures: &[(PathBuf, LoadError)]) -> String {
    let mut out = String::new();
    for (i, (path, err)) in failures.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        let _ = write!(out, "{}: {}", path.display(), err);
    }
    out
}
