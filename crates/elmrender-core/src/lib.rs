//! Render Elm view functions to static HTML.
//!
//! This crate provides:
//! - Deterministic naming from view-function hashes
//! - Elm module generation (IR + serializer) for batches of views
//! - Workspace setup with a patched `elm-package.json`
//! - `elm-make` invocation and a one-shot `node` executor
//!
//! # Architecture
//!
//! ```text
//! RenderOptions / [ViewConfig]
//!     │
//!     └── Batch ──► WorkspaceManager ──► installer ──► CompilerInvoker ──► elm.js
//!                        │                                                  │
//!                        └── ArtifactCache::invalidate        WorkerExecutor ◄┘
//!                                                                  │
//!                                                           [RenderResult]
//! ```

pub mod codegen;
pub mod compile;
pub mod config;
pub mod error;
pub mod execute;
pub mod hash;
pub mod paths;
pub mod pipeline;
pub mod workspace;

pub use codegen::ERROR_MARKER;
pub use config::{Batch, FormatOptions, RenderOptions, RunOptions, ViewConfig, ViewDescriptor};
pub use error::{Error, Result};
pub use execute::{ArtifactCache, RenderResult};
pub use paths::WorkspaceDirs;
pub use pipeline::{Pipeline, PipelineConfig, render, render_many};
