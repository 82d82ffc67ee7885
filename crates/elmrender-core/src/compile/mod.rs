//! Install and compile steps.
//!
//! ```text
//! workspace ──► installer (optional, status ignored) ──► elm-make PrivateMain*.elm ──► elm.js
//! ```

mod compiler;
mod installer;
mod toolchain;

pub use compiler::CompilerInvoker;
pub use installer::run_install;
pub use toolchain::{Tool, locate};
