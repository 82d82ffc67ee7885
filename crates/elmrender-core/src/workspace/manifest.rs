//! `elm-package.json` loading and patching.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Packages the generated module imports, pinned to versions it is written
/// against.
pub const PINNED_DEPENDENCIES: &[(&str, &str)] = &[
    ("eeue56/elm-html-in-elm", "2.0.0 <= v < 3.0.0"),
    ("NoRedInk/elm-decode-pipeline", "3.0.0 <= v < 4.0.0"),
];

/// An Elm 0.18 package manifest.
///
/// Only the fields the workspace touches are typed; everything else is kept
/// verbatim in `rest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElmPackage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    #[serde(rename = "source-directories")]
    pub source_directories: Vec<String>,

    #[serde(rename = "native-modules", default)]
    pub native_modules: bool,

    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl ElmPackage {
    /// Read and parse a manifest. Any failure is a [`Error::ManifestLoad`].
    pub async fn load(path: &Path) -> Result<Self> {
        let load_error = |reason: String| Error::ManifestLoad {
            path: path.to_path_buf(),
            reason,
        };

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| load_error(e.to_string()))?;

        Self::parse(&content).map_err(|e| load_error(e.to_string()))
    }

    /// Parse manifest JSON.
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Produce the copy written into the workspace.
    ///
    /// Relative source directories are rebased onto `project_dir` (the copy
    /// lives elsewhere), `workspace_dir` is appended as a source root, native
    /// modules are enabled and the pinned packages are added.
    pub fn patched(&self, project_dir: &Path, workspace_dir: &Path) -> Self {
        let mut patched = self.clone();

        patched.source_directories = self
            .source_directories
            .iter()
            .map(|dir| {
                let dir = Path::new(dir);
                if dir.is_relative() {
                    project_dir.join(dir).to_string_lossy().to_string()
                } else {
                    dir.to_string_lossy().to_string()
                }
            })
            .collect();
        patched
            .source_directories
            .push(workspace_dir.to_string_lossy().to_string());

        patched.native_modules = true;
        for (name, range) in PINNED_DEPENDENCIES {
            patched
                .dependencies
                .insert((*name).to_string(), (*range).to_string());
        }

        patched
    }

    /// Serialize the manifest.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const HOST: &str = r#"{
        "version": "1.0.0",
        "summary": "test project",
        "repository": "https://github.com/user/project.git",
        "license": "BSD3",
        "source-directories": ["src", "/abs/lib"],
        "exposed-modules": [],
        "dependencies": {
            "elm-lang/core": "5.1.1 <= v < 6.0.0",
            "elm-lang/html": "2.0.0 <= v < 3.0.0"
        },
        "elm-version": "0.18.0 <= v < 0.19.0"
    }"#;

    #[test]
    fn test_parse_keeps_unknown_fields() {
        let manifest = ElmPackage::parse(HOST).unwrap();
        assert_eq!(manifest.rest["elm-version"], "0.18.0 <= v < 0.19.0");
        assert!(!manifest.native_modules);

        let json = manifest.to_json().unwrap();
        assert!(json.contains("\"summary\": \"test project\""));
    }

    #[test]
    fn test_patched_manifest() {
        let manifest = ElmPackage::parse(HOST).unwrap();
        let project = PathBuf::from("/project");
        let workspace = project.join(".elm-static-html");
        let patched = manifest.patched(&project, &workspace);

        assert_eq!(
            patched.source_directories,
            vec![
                "/project/src".to_string(),
                "/abs/lib".to_string(),
                "/project/.elm-static-html".to_string(),
            ]
        );
        assert!(patched.native_modules);
        assert_eq!(
            patched.dependencies["eeue56/elm-html-in-elm"],
            "2.0.0 <= v < 3.0.0"
        );
        assert_eq!(
            patched.dependencies["NoRedInk/elm-decode-pipeline"],
            "3.0.0 <= v < 4.0.0"
        );
        assert_eq!(patched.dependencies["elm-lang/core"], "5.1.1 <= v < 6.0.0");

        // The original value is untouched.
        assert_eq!(manifest.source_directories, vec!["src", "/abs/lib"]);
    }

    #[test]
    fn test_pins_override_host_versions() {
        let mut manifest = ElmPackage::parse(HOST).unwrap();
        manifest
            .dependencies
            .insert("eeue56/elm-html-in-elm".to_string(), "1.0.0 <= v < 2.0.0".to_string());

        let patched = manifest.patched(Path::new("/p"), Path::new("/p/.w"));
        assert_eq!(
            patched.dependencies["eeue56/elm-html-in-elm"],
            "2.0.0 <= v < 3.0.0"
        );
    }

    #[tokio::test]
    async fn test_load_missing_manifest() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("elm-package.json");

        let err = ElmPackage::load(&path).await.unwrap_err();
        assert!(matches!(err, Error::ManifestLoad { .. }));
        assert!(err.to_string().contains("failed to load manifest at"));
    }

    #[tokio::test]
    async fn test_load_unparseable_manifest() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("elm-package.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ElmPackage::load(&path).await.unwrap_err();
        assert!(matches!(err, Error::ManifestLoad { .. }));
    }
}
