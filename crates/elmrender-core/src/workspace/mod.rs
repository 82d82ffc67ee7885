//! Workspace preparation.
//!
//! Creates the cache directory, writes the patched manifest, the native
//! helper and the generated module, and evicts any cached handle to the
//! artifact those files are about to replace.

mod manifest;

pub use manifest::{ElmPackage, PINNED_DEPENDENCIES};

use std::path::PathBuf;

use crate::codegen;
use crate::config::Batch;
use crate::error::Result;
use crate::execute::ArtifactCache;
use crate::paths::WorkspaceDirs;

/// Prepares the workspace for one batch.
pub struct WorkspaceManager<'a> {
    dirs: &'a WorkspaceDirs,
    cache: &'a ArtifactCache,
}

impl<'a> WorkspaceManager<'a> {
    pub fn new(dirs: &'a WorkspaceDirs, cache: &'a ArtifactCache) -> Self {
        Self { dirs, cache }
    }

    /// Write everything the compiler needs for `batch`.
    ///
    /// The host manifest is loaded first; if that fails nothing is written.
    /// Returns the path of the generated module.
    pub async fn prepare(&self, batch: &Batch) -> Result<PathBuf> {
        let host_manifest_path = self.dirs.host_manifest();
        let host_manifest = ElmPackage::load(&host_manifest_path).await?;
        tracing::debug!("Loaded manifest {}", host_manifest_path.display());

        self.dirs.create();
        self.cache.invalidate(&self.dirs.artifact());

        let patched = host_manifest.patched(&self.dirs.project_dir, &self.dirs.workspace_dir);
        tokio::fs::write(self.dirs.workspace_manifest(), patched.to_json()?).await?;

        let namespace = codegen::project_namespace(host_manifest.repository.as_deref());
        tokio::fs::write(self.dirs.native_module(), codegen::jsonify_source(&namespace)).await?;

        let module_path = self.dirs.module_source(&batch.entry_point());
        tokio::fs::write(&module_path, codegen::generate_source(batch)).await?;
        tracing::info!("Generated {}", module_path.display());

        Ok(module_path)
    }
}
