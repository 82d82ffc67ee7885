//! Batch command - render every view from a JSON config file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use elmrender_core::{Batch, RenderResult, ViewConfig};
use serde_json::{Map, Value};

use crate::RunArgs;

/// Execute the batch command.
///
/// Prints a JSON object mapping each output key to its rendered HTML.
pub async fn execute(project: &Path, config_path: &Path, run: &RunArgs) -> Result<()> {
    let configs = read_configs(config_path)?;
    let batch = Batch::from_configs(configs)?;

    let results = run.pipeline(project).run(&batch, run.already_run).await?;

    println!("{}", serde_json::to_string_pretty(&to_object(results))?);
    Ok(())
}

fn read_configs(path: &Path) -> Result<Vec<ViewConfig>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid batch file {}", path.display()))
}

fn to_object(results: Vec<RenderResult>) -> Value {
    let map: Map<String, Value> = results
        .into_iter()
        .map(|result| (result.output_key, Value::String(result.rendered_text)))
        .collect();
    Value::Object(map)
}
