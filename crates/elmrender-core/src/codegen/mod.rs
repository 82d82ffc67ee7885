//! Elm source generation.
//!
//! ```text
//! Batch ──► generator::build_module ──► ElmModule (IR) ──► serializer ──► PrivateMain<hash>.elm
//! ```
//!
//! The native helper that forces lazy view nodes is generated separately.

mod generator;
mod ir;
mod native;
mod serializer;

pub use generator::{build_module, generate_source};
pub use ir::{Channel, Dispatch, ElmModule, RenderDef};
pub use native::{jsonify_source, project_namespace};
pub use serializer::{ERROR_MARKER, serialize};
