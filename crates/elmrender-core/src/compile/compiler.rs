//! Compiler invocation.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;

use tokio::process::Command;

use crate::error::{Error, Result};
use crate::paths::{ARTIFACT_FILE, WorkspaceDirs};

use super::toolchain::{Tool, locate};

/// Compiles every generated module in a workspace into one artifact.
pub struct CompilerInvoker<'a> {
    dirs: &'a WorkspaceDirs,
    compiler_path: Option<&'a Path>,
}

impl<'a> CompilerInvoker<'a> {
    pub fn new(dirs: &'a WorkspaceDirs) -> Self {
        Self {
            dirs,
            compiler_path: None,
        }
    }

    /// Use a specific compiler binary instead of looking one up.
    pub fn with_compiler_path(mut self, path: Option<&'a Path>) -> Self {
        self.compiler_path = path;
        self
    }

    /// Run the compiler and return the artifact path.
    ///
    /// A non-zero exit rejects with [`Error::Compile`] carrying the code.
    pub async fn compile(&self) -> Result<PathBuf> {
        let compiler = locate(Tool::Compiler, self.compiler_path)?;
        // The compiler runs inside the workspace, so it gets bare file names.
        let modules: Vec<_> = self
            .dirs
            .generated_modules()?
            .iter()
            .filter_map(|path| path.file_name().map(|name| name.to_os_string()))
            .collect();

        let mut cmd = Command::new(&compiler);
        cmd.current_dir(&self.dirs.workspace_dir)
            .args(&modules)
            .arg("--output")
            .arg(ARTIFACT_FILE)
            .arg("--yes")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        tracing::debug!(
            "Compiling {} module(s) with {}",
            modules.len(),
            compiler.display()
        );
        let start = Instant::now();

        let output = cmd.output().await.map_err(|e| {
            Error::Toolchain(format!(
                "Failed to run compiler '{}': {}",
                compiler.display(),
                e
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            tracing::error!("Compilation failed ({}): {}", output.status, stderr.trim());
            return Err(Error::Compile {
                code: output.status.code(),
                stderr,
            });
        }

        tracing::info!("Compiled in {}ms", start.elapsed().as_millis());
        Ok(self.dirs.artifact())
    }
}
