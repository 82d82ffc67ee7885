//! Process-wide cache of loaded artifacts.
//!
//! A loaded artifact is the compiled JavaScript plus the set of entry points
//! it defines. Handles are shared until the workspace manager invalidates the
//! path ahead of a rebuild; the next load then reads the file fresh.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::MODULE_PREFIX;
use crate::error::Result;

static GLOBAL: LazyLock<ArtifactCache> = LazyLock::new(ArtifactCache::new);

/// A compiled artifact read from disk.
#[derive(Debug)]
pub struct LoadedArtifact {
    path: PathBuf,
    source: String,
    entry_points: FxHashSet<String>,
}

impl LoadedArtifact {
    /// Read an artifact. A missing file yields an artifact with no entry
    /// points, so lookups fail with "module not found" rather than an IO error.
    pub async fn read(path: &Path) -> Result<Self> {
        let source = match tokio::fs::read_to_string(path).await {
            Ok(source) => source,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No artifact at {}", path.display());
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self::from_source(path.to_path_buf(), source))
    }

    /// Index an artifact's source.
    pub fn from_source(path: PathBuf, source: String) -> Self {
        let entry_points = scan_entry_points(&source);
        Self {
            path,
            source,
            entry_points,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The compiled JavaScript.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the artifact defines the named entry point.
    pub fn has_entry_point(&self, name: &str) -> bool {
        self.entry_points.contains(name)
    }

    pub fn entry_points(&self) -> impl Iterator<Item = &str> {
        self.entry_points.iter().map(String::as_str)
    }
}

/// Cache of loaded artifacts keyed by resolved path.
#[derive(Debug, Default)]
pub struct ArtifactCache {
    entries: Mutex<FxHashMap<PathBuf, Arc<LoadedArtifact>>>,
}

impl ArtifactCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache shared by every pipeline in this process.
    pub fn global() -> &'static ArtifactCache {
        &GLOBAL
    }

    /// Return the cached handle for `path`, reading the file if there is none.
    pub async fn load(&self, path: &Path) -> Result<Arc<LoadedArtifact>> {
        let key = resolve(path);
        if let Some(artifact) = self.lock().get(&key) {
            tracing::debug!("Artifact cache hit: {}", key.display());
            return Ok(Arc::clone(artifact));
        }

        let artifact = Arc::new(LoadedArtifact::read(&key).await?);
        // Missing files are not cached, so a later build is picked up.
        if !artifact.source.is_empty() {
            self.lock().insert(key, Arc::clone(&artifact));
        }
        Ok(artifact)
    }

    /// Drop the cached handle for `path`. Returns whether one was present.
    pub fn invalidate(&self, path: &Path) -> bool {
        let key = resolve(path);
        let removed = self.lock().remove(&key).is_some();
        if removed {
            tracing::debug!("Invalidated cached artifact {}", key.display());
        }
        removed
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.lock().contains_key(&resolve(path))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FxHashMap<PathBuf, Arc<LoadedArtifact>>> {
        // A panic while holding the lock cannot leave the map inconsistent.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Canonical path when the file exists, the given path otherwise.
fn resolve(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Find every `PrivateMain<hex>` identifier in compiled output.
fn scan_entry_points(source: &str) -> FxHashSet<String> {
    let mut found = FxHashSet::default();
    let mut rest = source;
    while let Some(pos) = rest.find(MODULE_PREFIX) {
        let after = &rest[pos + MODULE_PREFIX.len()..];
        let hash_len = after
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(after.len());
        let preceded_by_ident = rest[..pos]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');

        if hash_len > 0 && !preceded_by_ident {
            found.insert(format!("{MODULE_PREFIX}{}", &after[..hash_len]));
        }
        rest = &after[hash_len..];
    }
    found
}
