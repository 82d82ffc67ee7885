//! The public render entry points.
//!
//! Each call runs its stages strictly in order:
//! normalize → prepare workspace → install → compile → execute.
//! With `already_run` only the last stage runs, against whatever artifact
//! the workspace already holds.
//!
//! Nothing here locks the workspace: concurrent calls against one project
//! must be serialized by the caller.

use std::path::{Path, PathBuf};

use crate::compile::{CompilerInvoker, run_install};
use crate::config::{Batch, RenderOptions, RunOptions, ViewConfig};
use crate::error::{Error, Result};
use crate::execute::{ArtifactCache, RenderResult, WorkerExecutor};
use crate::paths::{DEFAULT_CACHE_DIR, WorkspaceDirs};
use crate::workspace::WorkspaceManager;

/// Configuration shared by every batch a [`Pipeline`] runs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Name of the workspace directory inside the project.
    pub cache_dir_name: String,
    /// Path to `elm-make`; looked up when `None`.
    pub compiler_path: Option<PathBuf>,
    /// Path to `node`; looked up when `None`.
    pub runtime_path: Option<PathBuf>,
    /// Shell command run in the workspace before compiling.
    pub install_command: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cache_dir_name: DEFAULT_CACHE_DIR.to_string(),
            compiler_path: None,
            runtime_path: None,
            install_command: None,
        }
    }
}

impl PipelineConfig {
    /// Apply per-call run options on top of this config.
    pub fn with_run_options(mut self, run: &RunOptions) -> Self {
        if run.compiler_path.is_some() {
            self.compiler_path = run.compiler_path.clone();
        }
        if run.install_command.is_some() {
            self.install_command = run.install_command.clone();
        }
        self
    }
}

/// Generate → compile → execute pipeline for one Elm project.
pub struct Pipeline {
    dirs: WorkspaceDirs,
    config: PipelineConfig,
    cache: &'static ArtifactCache,
}

impl Pipeline {
    /// Create a pipeline for the project at `project_dir`.
    pub fn new(project_dir: impl AsRef<Path>, config: PipelineConfig) -> Self {
        Self {
            dirs: WorkspaceDirs::new(project_dir, &config.cache_dir_name),
            config,
            cache: ArtifactCache::global(),
        }
    }

    pub fn dirs(&self) -> &WorkspaceDirs {
        &self.dirs
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run a batch.
    pub async fn run(&self, batch: &Batch, already_run: bool) -> Result<Vec<RenderResult>> {
        let artifact = if already_run {
            tracing::info!("Reusing compiled artifact for {}", batch.entry_point());
            self.dirs.artifact()
        } else {
            self.build(batch).await?
        };

        WorkerExecutor::new(self.cache)
            .with_runtime_path(self.config.runtime_path.as_deref())
            .execute(&artifact, batch)
            .await
    }

    async fn build(&self, batch: &Batch) -> Result<PathBuf> {
        tracing::info!(
            "Building {} ({} view(s))",
            batch.entry_point(),
            batch.descriptors.len()
        );

        WorkspaceManager::new(&self.dirs, self.cache)
            .prepare(batch)
            .await?;

        run_install(self.config.install_command.as_deref(), &self.dirs.workspace_dir).await;

        CompilerInvoker::new(&self.dirs)
            .with_compiler_path(self.config.compiler_path.as_deref())
            .compile()
            .await
    }
}

/// Render one view function to HTML.
pub async fn render(
    root_dir: impl AsRef<Path>,
    view_function: &str,
    options: RenderOptions,
) -> Result<String> {
    let batch = Batch::single(view_function, &options)?;
    let pipeline = Pipeline::new(
        root_dir,
        PipelineConfig::default().with_run_options(&options.run),
    );

    pipeline
        .run(&batch, options.run.already_run)
        .await?
        .into_iter()
        .next()
        .map(|result| result.rendered_text)
        .ok_or_else(|| Error::Worker(format!("no result for {view_function}")))
}

/// Render several views with one generated module and one compile.
pub async fn render_many(
    root_dir: impl AsRef<Path>,
    configs: Vec<ViewConfig>,
    run: RunOptions,
) -> Result<Vec<RenderResult>> {
    let batch = Batch::from_configs(configs)?;
    let pipeline = Pipeline::new(root_dir, PipelineConfig::default().with_run_options(&run));

    pipeline.run(&batch, run.already_run).await
}
