//! Execution of compiled artifacts.
//!
//! The artifact is loaded through a process-wide [`ArtifactCache`], checked
//! for the batch's entry point, then handed to a one-shot `node` process that
//! reports the batch's single aggregate result.

mod cache;
pub mod protocol;
mod worker;

pub use cache::{ArtifactCache, LoadedArtifact};
pub use protocol::{RenderResult, WorkerRequest, WorkerResponse};
pub use worker::WorkerExecutor;
