//! Caller options and their normalized form.
//!
//! Callers describe what to render with [`RenderOptions`] (one view) or a list
//! of [`ViewConfig`]s (a batch). Both are normalized into a [`Batch`] of
//! [`ViewDescriptor`]s carrying the hashes every later stage names things by.

use std::path::PathBuf;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::hash;

/// Prefix of every generated module name.
pub const MODULE_PREFIX: &str = "PrivateMain";

/// Prefix of the aggregate output port name.
pub const PORT_PREFIX: &str = "htmlOut";

/// How rendered HTML is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOptions {
    /// Spaces per nesting level.
    pub indent_width: u32,
    /// Put each element on its own line.
    pub insert_newlines: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            insert_newlines: true,
        }
    }
}

impl FormatOptions {
    fn from_parts(indent: Option<u32>, new_lines: Option<bool>) -> Self {
        let defaults = Self::default();
        Self {
            indent_width: indent.unwrap_or(defaults.indent_width),
            insert_newlines: new_lines.unwrap_or(defaults.insert_newlines),
        }
    }
}

/// Options that control how a batch is run rather than what it renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunOptions {
    /// Skip generation and compilation, run whatever artifact is on disk.
    pub already_run: bool,
    /// Path to `elm-make`, overriding environment and `PATH` lookup.
    pub compiler_path: Option<PathBuf>,
    /// Shell command installing packages into the workspace before compiling.
    pub install_command: Option<String>,
}

/// Options for rendering a single view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Value passed to the decoder. Ignored when there is no decoder.
    pub model: Option<Value>,
    /// Fully qualified decoder, e.g. `Show.decodeModel`.
    #[serde(alias = "decoderId")]
    pub decoder: Option<String>,
    #[serde(alias = "indentWidth")]
    pub indent: Option<u32>,
    #[serde(alias = "insertNewlines")]
    pub new_lines: Option<bool>,
    #[serde(flatten)]
    pub run: RunOptions,
}

/// One entry of a multi-view batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    /// Fully qualified view function, e.g. `Show.page`.
    #[serde(alias = "viewFunctionId")]
    pub view_function: String,
    /// Key the rendered text is reported under.
    pub output_key: String,
    #[serde(default)]
    pub model: Option<Value>,
    #[serde(default, alias = "decoderId")]
    pub decoder: Option<String>,
    #[serde(default, alias = "indentWidth")]
    pub indent: Option<u32>,
    #[serde(default, alias = "insertNewlines")]
    pub new_lines: Option<bool>,
}

impl ViewConfig {
    /// Create a config with default formatting and no decoder.
    pub fn new(view_function: impl Into<String>, output_key: impl Into<String>) -> Self {
        Self {
            view_function: view_function.into(),
            output_key: output_key.into(),
            model: None,
            decoder: None,
            indent: None,
            new_lines: None,
        }
    }

    /// Set the decoder and the model it decodes.
    pub fn with_decoder(mut self, decoder: impl Into<String>, model: Value) -> Self {
        self.decoder = Some(decoder.into());
        self.model = Some(model);
        self
    }
}

/// A normalized view: everything the generator and executor need.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDescriptor {
    pub view_function: String,
    pub decoder: Option<String>,
    /// Opaque model, `null` when the caller supplied none.
    pub model: Value,
    pub format: FormatOptions,
    pub output_key: String,
    /// Hash of `view_function` alone.
    pub view_hash: String,
}

impl ViewDescriptor {
    fn from_config(config: ViewConfig) -> Result<Self> {
        validate_qualified(&config.view_function, "view function")?;
        if let Some(decoder) = &config.decoder {
            validate_qualified(decoder, "decoder")?;
        }

        Ok(Self {
            view_hash: hash::hash(&config.view_function),
            format: FormatOptions::from_parts(config.indent, config.new_lines),
            model: config.model.unwrap_or(Value::Null),
            view_function: config.view_function,
            decoder: config.decoder,
            output_key: config.output_key,
        })
    }
}

/// An ordered set of views compiled into one module and one artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Hash of the concatenated view-function identifiers, in order.
    pub module_hash: String,
    pub descriptors: Vec<ViewDescriptor>,
}

impl Batch {
    /// Normalize a list of view configs.
    pub fn from_configs(configs: Vec<ViewConfig>) -> Result<Self> {
        if configs.is_empty() {
            return Err(Error::InvalidConfig("a batch needs at least one view".to_string()));
        }

        let mut seen_keys = FxHashSet::default();
        for config in &configs {
            if !seen_keys.insert(config.output_key.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "duplicate output key `{}`",
                    config.output_key
                )));
            }
        }

        let descriptors = configs
            .into_iter()
            .map(ViewDescriptor::from_config)
            .collect::<Result<Vec<_>>>()?;

        let module_hash = hash::hash_all(descriptors.iter().map(|d| d.view_function.as_str()));

        Ok(Self {
            module_hash,
            descriptors,
        })
    }

    /// Normalize a single-view call. The output key defaults to the view
    /// function's identifier.
    pub fn single(view_function: &str, options: &RenderOptions) -> Result<Self> {
        Self::from_configs(vec![ViewConfig {
            view_function: view_function.to_string(),
            output_key: view_function.to_string(),
            model: options.model.clone(),
            decoder: options.decoder.clone(),
            indent: options.indent,
            new_lines: options.new_lines,
        }])
    }

    /// Name of the generated module and of the artifact's entry point.
    pub fn entry_point(&self) -> String {
        format!("{MODULE_PREFIX}{}", self.module_hash)
    }

    /// Name of the aggregate output port.
    pub fn port_name(&self) -> String {
        format!("{PORT_PREFIX}{}", self.module_hash)
    }

    /// Descriptors with distinct view hashes, first occurrence wins.
    ///
    /// A later descriptor of the same view with another decoder or format
    /// is rendered with the first one's.
    pub fn unique_views(&self) -> Vec<&ViewDescriptor> {
        let mut seen = FxHashSet::default();
        self.descriptors
            .iter()
            .filter(|d| seen.insert(d.view_hash.as_str()))
            .collect()
    }

    /// Ordered `(output_key, model)` pairs handed to the entry point.
    pub fn flags(&self) -> Vec<(String, Value)> {
        self.descriptors
            .iter()
            .map(|d| (d.output_key.clone(), d.model.clone()))
            .collect()
    }
}

/// Check that an identifier names a value inside a module (`Module.value`).
fn validate_qualified(id: &str, what: &str) -> Result<()> {
    match id.rsplit_once('.') {
        Some((module, name)) if !module.is_empty() && !name.is_empty() => Ok(()),
        _ => Err(Error::InvalidConfig(format!(
            "{what} `{id}` must be qualified with its module, e.g. `Main.view`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_defaults() {
        let batch = Batch::single("Show.page", &RenderOptions::default()).unwrap();
        assert_eq!(batch.descriptors.len(), 1);

        let view = &batch.descriptors[0];
        assert_eq!(view.output_key, "Show.page");
        assert_eq!(view.model, Value::Null);
        assert_eq!(view.format, FormatOptions::default());
        assert_eq!(view.view_hash, hash::hash("Show.page"));
        assert_eq!(batch.module_hash, hash::hash("Show.page"));
    }

    #[test]
    fn test_module_hash_ignores_models_and_formatting() {
        let a = Batch::from_configs(vec![
            ViewConfig::new("Show.page", "a").with_decoder("Show.decodeModel", json!({"age": 1})),
            ViewConfig::new("Show.other", "b"),
        ])
        .unwrap();

        let mut other = ViewConfig::new("Show.other", "b");
        other.indent = Some(2);
        other.new_lines = Some(false);
        let b = Batch::from_configs(vec![
            ViewConfig::new("Show.page", "a").with_decoder("Show.decodeModel", json!({"age": 99})),
            other,
        ])
        .unwrap();

        assert_eq!(a.module_hash, b.module_hash);
    }

    #[test]
    fn test_module_hash_tracks_order() {
        let a = Batch::from_configs(vec![
            ViewConfig::new("Show.page", "a"),
            ViewConfig::new("Show.other", "b"),
        ])
        .unwrap();
        let b = Batch::from_configs(vec![
            ViewConfig::new("Show.other", "b"),
            ViewConfig::new("Show.page", "a"),
        ])
        .unwrap();

        assert_ne!(a.module_hash, b.module_hash);
    }

    #[test]
    fn test_unique_views_first_wins() {
        let batch = Batch::from_configs(vec![
            ViewConfig::new("Show.page", "first").with_decoder("Show.decodeModel", json!(1)),
            ViewConfig::new("Show.other", "second"),
            ViewConfig::new("Show.page", "third").with_decoder("Show.decodeModel", json!(2)),
        ])
        .unwrap();

        let unique = batch.unique_views();
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].output_key, "first");
        assert_eq!(unique[1].output_key, "second");

        let flags = batch.flags();
        assert_eq!(flags.len(), 3);
        assert_eq!(flags[2], ("third".to_string(), json!(2)));
    }

    #[test]
    fn test_names_derive_from_module_hash() {
        let batch = Batch::single("Show.page", &RenderOptions::default()).unwrap();
        assert_eq!(batch.entry_point(), format!("PrivateMain{}", batch.module_hash));
        assert_eq!(batch.port_name(), format!("htmlOut{}", batch.module_hash));
    }

    #[test]
    fn test_rejects_unqualified_view() {
        let err = Batch::single("page", &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_empty_and_duplicate_keys() {
        assert!(Batch::from_configs(Vec::new()).is_err());

        let err = Batch::from_configs(vec![
            ViewConfig::new("Show.page", "same"),
            ViewConfig::new("Show.other", "same"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate output key"));
    }

    #[test]
    fn test_view_config_json_shape() {
        let configs: Vec<ViewConfig> = serde_json::from_value(json!([
            { "viewFunction": "Show.page", "outputKey": "noah",
              "decoder": "Show.decodeModel", "model": { "name": "Noah", "age": 24 },
              "indent": 2, "newLines": false }
        ]))
        .unwrap();

        let batch = Batch::from_configs(configs).unwrap();
        let view = &batch.descriptors[0];
        assert_eq!(view.decoder.as_deref(), Some("Show.decodeModel"));
        assert_eq!(view.format.indent_width, 2);
        assert!(!view.format.insert_newlines);
    }

    #[test]
    fn test_descriptive_field_names_accepted() {
        let config: ViewConfig = serde_json::from_value(json!({
            "viewFunctionId": "Show.page", "outputKey": "noah",
            "decoderId": "Show.decodeModel", "indentWidth": 2, "insertNewlines": false
        }))
        .unwrap();
        assert_eq!(config.view_function, "Show.page");
        assert_eq!(config.decoder.as_deref(), Some("Show.decodeModel"));
        assert_eq!(config.indent, Some(2));
        assert_eq!(config.new_lines, Some(false));

        let options: RenderOptions = serde_json::from_value(json!({
            "decoderId": "Show.decodeModel", "indentWidth": 8, "insertNewlines": true,
            "alreadyRun": true
        }))
        .unwrap();
        assert_eq!(options.decoder.as_deref(), Some("Show.decodeModel"));
        assert_eq!(options.indent, Some(8));
        assert_eq!(options.new_lines, Some(true));
        assert!(options.run.already_run);
    }

    #[test]
    fn test_render_options_flatten_run_options() {
        let options: RenderOptions = serde_json::from_value(json!({
            "decoder": "Show.decodeModel",
            "alreadyRun": true,
            "installCommand": "elm-package install --yes"
        }))
        .unwrap();
        assert!(options.run.already_run);
        assert_eq!(
            options.run.install_command.as_deref(),
            Some("elm-package install --yes")
        );
    }
}
