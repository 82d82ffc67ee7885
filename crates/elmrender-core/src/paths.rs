//! Workspace directory management.
//!
//! Provides the paths every stage reads and writes, so the workspace
//! manager, compiler and executor agree on one layout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::MODULE_PREFIX;

/// Default name of the cache directory inside the project root.
pub const DEFAULT_CACHE_DIR: &str = ".elm-static-html";

/// Name of the project manifest.
pub const MANIFEST_FILE: &str = "elm-package.json";

/// Name of the compiled artifact.
pub const ARTIFACT_FILE: &str = "elm.js";

/// Directory structure of a render workspace.
///
/// ```text
/// project/
/// ├── elm-package.json        # host manifest (never modified)
/// └── .elm-static-html/
///     ├── elm-package.json    # mutated copy
///     ├── PrivateMain<hash>.elm
///     ├── Native/Jsonify.js
///     └── elm.js              # compiled artifact
/// ```
#[derive(Debug, Clone)]
pub struct WorkspaceDirs {
    /// The project root containing the host manifest.
    pub project_dir: PathBuf,

    /// The cache workspace itself.
    pub workspace_dir: PathBuf,

    /// Directory holding native helper modules.
    pub native_dir: PathBuf,
}

impl WorkspaceDirs {
    /// Describe the workspace for a project without touching the filesystem.
    ///
    /// A relative `project_dir` is resolved against the current directory:
    /// the compiler runs inside the workspace, so every path handed to it
    /// must be absolute.
    pub fn new(project_dir: impl AsRef<Path>, cache_dir_name: &str) -> Self {
        let project_dir = project_dir.as_ref();
        let project_dir =
            std::path::absolute(project_dir).unwrap_or_else(|_| project_dir.to_path_buf());
        let workspace_dir = project_dir.join(cache_dir_name);
        let native_dir = workspace_dir.join("Native");

        Self {
            project_dir,
            workspace_dir,
            native_dir,
        }
    }

    /// Create the workspace directories.
    ///
    /// Failures are logged and otherwise ignored: a directory that already
    /// exists is the normal case, and real problems surface as write errors
    /// in the next step.
    pub fn create(&self) {
        for dir in [&self.workspace_dir, &self.native_dir] {
            if let Err(e) = fs::create_dir_all(dir) {
                tracing::warn!("Could not create {}: {}", dir.display(), e);
            }
        }
    }

    /// The host project's manifest.
    pub fn host_manifest(&self) -> PathBuf {
        self.project_dir.join(MANIFEST_FILE)
    }

    /// The mutated manifest inside the workspace.
    pub fn workspace_manifest(&self) -> PathBuf {
        self.workspace_dir.join(MANIFEST_FILE)
    }

    /// The compiled artifact.
    pub fn artifact(&self) -> PathBuf {
        self.workspace_dir.join(ARTIFACT_FILE)
    }

    /// The native helper module.
    pub fn native_module(&self) -> PathBuf {
        self.native_dir.join("Jsonify.js")
    }

    /// Source file of the generated module with the given name.
    pub fn module_source(&self, module_name: &str) -> PathBuf {
        self.workspace_dir.join(format!("{module_name}.elm"))
    }

    /// Every generated module currently in the workspace, sorted by name.
    pub fn generated_modules(&self) -> io::Result<Vec<PathBuf>> {
        let mut modules = Vec::new();
        for entry in fs::read_dir(&self.workspace_dir)? {
            let path = entry?.path();
            let is_generated = path.is_file()
                && path.extension().is_some_and(|ext| ext == "elm")
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(MODULE_PREFIX));
            if is_generated {
                modules.push(path);
            }
        }
        modules.sort();
        Ok(modules)
    }
}
