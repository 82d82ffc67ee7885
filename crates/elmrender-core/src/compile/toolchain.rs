//! Locating the external binaries the pipeline drives.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// An external program the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// `elm-make`, turns generated modules into `elm.js`.
    Compiler,
    /// `node`, executes `elm.js`.
    Runtime,
}

impl Tool {
    /// Program name looked up in `PATH`.
    pub fn binary_name(self) -> &'static str {
        match self {
            Self::Compiler => "elm-make",
            Self::Runtime => "node",
        }
    }

    /// Environment variable that overrides the `PATH` lookup.
    pub fn env_var(self) -> &'static str {
        match self {
            Self::Compiler => "ELMRENDER_COMPILER",
            Self::Runtime => "ELMRENDER_RUNTIME",
        }
    }
}

/// Find the binary for `tool`.
///
/// Looks in the following order:
/// 1. `explicit`, when the caller supplied a path
/// 2. the tool's environment variable
/// 3. system PATH
pub fn locate(tool: Tool, explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(tool.env_var()) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    which::which(tool.binary_name()).map_err(|_| {
        Error::Toolchain(format!(
            "{} not found in PATH. Set {} or pass its path explicitly.",
            tool.binary_name(),
            tool.env_var()
        ))
    })
}
