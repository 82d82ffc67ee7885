//! Error types for elmrender-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for elmrender-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can reject a render batch.
///
/// A view whose decoder rejects its model is not an error at this level: the
/// failure is embedded in that view's rendered text instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The host project's manifest is missing or unparseable.
    #[error("failed to load manifest at {}: {reason}", path.display())]
    ManifestLoad { path: PathBuf, reason: String },

    /// The compiler exited with a non-zero status.
    #[error("compilation failed with exit code {}", code.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string()))]
    Compile { code: Option<i32>, stderr: String },

    /// The loaded artifact has no entry point with the expected name.
    #[error("module not found: {0}")]
    ModuleNotFound(String),

    /// Caller supplied a view configuration that cannot be rendered.
    #[error("invalid view configuration: {0}")]
    InvalidConfig(String),

    /// A required external binary could not be located or started.
    #[error("toolchain error: {0}")]
    Toolchain(String),

    /// The runtime process broke the request/response protocol.
    #[error("worker error: {0}")]
    Worker(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Format the error together with a short recovery hint, if one applies.
    pub fn with_hint(&self) -> String {
        let hint = match self {
            Self::ManifestLoad { .. } => {
                Some("run from an Elm project root containing a valid elm-package.json")
            }
            Self::Compile { .. } => Some("check the compiler output above for Elm errors"),
            Self::ModuleNotFound(_) => {
                Some("the compiled artifact is stale; render again without --already-run")
            }
            Self::Toolchain(_) => Some(
                "install elm-make and node, or point ELMRENDER_COMPILER / ELMRENDER_RUNTIME at them",
            ),
            _ => None,
        };

        match hint {
            Some(hint) => format!("{self}\n  hint: {hint}"),
            None => self.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
