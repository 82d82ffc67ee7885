//! Render command - render one view function and print the HTML.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use elmrender_core::{Batch, RenderOptions};

use crate::RunArgs;

/// A single-view request as given on the command line.
pub struct Request {
    pub view: String,
    pub decoder: Option<String>,
    pub model: Option<String>,
    pub model_file: Option<PathBuf>,
    pub indent: Option<u32>,
    pub new_lines: bool,
}

/// Execute the render command.
pub async fn execute(project: &Path, request: Request, run: &RunArgs) -> Result<()> {
    let model = read_model(request.model.as_deref(), request.model_file.as_deref())?;

    let options = RenderOptions {
        model,
        decoder: request.decoder,
        indent: request.indent,
        new_lines: Some(request.new_lines),
        run: run.run_options(),
    };

    let batch = Batch::single(&request.view, &options)?;
    let results = run.pipeline(project).run(&batch, options.run.already_run).await?;

    let html = results
        .into_iter()
        .next()
        .map(|result| result.rendered_text)
        .with_context(|| format!("No output for {}", request.view))?;
    println!("{html}");

    Ok(())
}

/// Parse the model from inline JSON or a file.
fn read_model(inline: Option<&str>, file: Option<&Path>) -> Result<Option<serde_json::Value>> {
    let text = match (inline, file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read model file {}", path.display()))?,
        (None, None) => return Ok(None),
    };

    let model = serde_json::from_str(&text).context("Model is not valid JSON")?;
    Ok(Some(model))
}
