//! Runs a compiled artifact in a one-shot runtime process.

use std::path::Path;
use std::process::Stdio;

use rustc_hash::FxHashMap;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::compile::{Tool, locate};
use crate::config::Batch;
use crate::error::{Error, Result};

use super::cache::ArtifactCache;
use super::protocol::{DRIVER, RenderResult, WorkerRequest, WorkerResponse};

/// Executes a batch against the artifact on disk.
pub struct WorkerExecutor<'a> {
    cache: &'a ArtifactCache,
    runtime_path: Option<&'a Path>,
}

impl<'a> WorkerExecutor<'a> {
    pub fn new(cache: &'a ArtifactCache) -> Self {
        Self {
            cache,
            runtime_path: None,
        }
    }

    /// Use a specific runtime binary instead of looking one up.
    pub fn with_runtime_path(mut self, path: Option<&'a Path>) -> Self {
        self.runtime_path = path;
        self
    }

    /// Load the artifact, run the batch's entry point once and collect its
    /// single aggregate result.
    ///
    /// Results come back in batch order, one per descriptor.
    pub async fn execute(&self, artifact_path: &Path, batch: &Batch) -> Result<Vec<RenderResult>> {
        let artifact = self.cache.load(artifact_path).await?;
        let entry = batch.entry_point();
        if !artifact.has_entry_point(&entry) {
            return Err(Error::ModuleNotFound(entry));
        }

        let runtime = locate(Tool::Runtime, self.runtime_path)?;
        let port = batch.port_name();
        let flags = batch.flags();
        let request = serde_json::to_vec(&WorkerRequest {
            artifact: artifact.source(),
            entry: &entry,
            port: &port,
            flags: &flags,
        })?;

        tracing::debug!("Starting {} for {}", runtime.display(), entry);

        let mut cmd = Command::new(&runtime);
        cmd.arg("-e").arg(DRIVER);
        if let Some(dir) = artifact_path.parent() {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit()); // Let runtime stderr pass through for debugging

        let mut child = cmd.spawn().map_err(|e| {
            Error::Toolchain(format!(
                "Failed to spawn runtime '{}': {}",
                runtime.display(),
                e
            ))
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Worker("Failed to get runtime stdin".to_string()))?;
        stdin.write_all(&request).await?;
        stdin.shutdown().await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        let response = match WorkerResponse::parse(&output.stdout) {
            Ok(response) => response,
            Err(_) if !output.status.success() => {
                return Err(Error::Worker(format!("runtime exited with {}", output.status)));
            }
            Err(e) => return Err(e),
        };

        match response {
            WorkerResponse::Rendered { pairs } => collect_results(batch, pairs),
            WorkerResponse::MissingEntry { name } => Err(Error::ModuleNotFound(name)),
            WorkerResponse::Error { message } => Err(Error::Worker(message)),
        }
    }
}

/// Match the published pairs against the batch's output keys.
fn collect_results(batch: &Batch, pairs: Vec<(String, String)>) -> Result<Vec<RenderResult>> {
    let mut by_key: FxHashMap<String, String> = pairs.into_iter().collect();

    batch
        .descriptors
        .iter()
        .map(|view| {
            let rendered_text = by_key.remove(&view.output_key).ok_or_else(|| {
                Error::Worker(format!("no result for output key `{}`", view.output_key))
            })?;
            Ok(RenderResult {
                output_key: view.output_key.clone(),
                rendered_text,
            })
        })
        .collect()
}
