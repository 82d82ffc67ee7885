//! elmrender CLI - render Elm view functions to static HTML.

mod batch;
mod render;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use elmrender_core::{Pipeline, PipelineConfig, RunOptions};

#[derive(Parser)]
#[command(name = "elmrender")]
#[command(about = "Render Elm view functions to static HTML")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single view function
    Render {
        /// Fully qualified view function, e.g. Main.view
        view: String,

        /// Elm project root containing elm-package.json
        #[arg(short = 'C', long, default_value = ".")]
        project: PathBuf,

        /// Fully qualified decoder for the model, e.g. Main.decodeModel
        #[arg(long)]
        decoder: Option<String>,

        /// Model as inline JSON
        #[arg(long, conflicts_with = "model_file")]
        model: Option<String>,

        /// Read the model JSON from a file
        #[arg(long)]
        model_file: Option<PathBuf>,

        /// Spaces per indentation level
        #[arg(long)]
        indent: Option<u32>,

        /// Do not insert newlines between elements
        #[arg(long)]
        no_newlines: bool,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Render every view listed in a JSON file
    Batch {
        /// JSON array of { viewFunction, outputKey, model?, decoder?, indent?, newLines? }
        config: PathBuf,

        /// Elm project root containing elm-package.json
        #[arg(short = 'C', long, default_value = ".")]
        project: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },
}

/// Flags shared by every command that runs the pipeline.
#[derive(Args)]
struct RunArgs {
    /// Reuse the compiled artifact without regenerating or compiling
    #[arg(long)]
    already_run: bool,

    /// Path to elm-make
    #[arg(long)]
    compiler_path: Option<PathBuf>,

    /// Path to node
    #[arg(long)]
    runtime_path: Option<PathBuf>,

    /// Command run in the workspace before compiling, e.g. "elm-package install --yes"
    #[arg(long)]
    install_command: Option<String>,
}

impl RunArgs {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            already_run: self.already_run,
            compiler_path: self.compiler_path.clone(),
            install_command: self.install_command.clone(),
        }
    }

    fn pipeline(&self, project: &Path) -> Pipeline {
        let config = PipelineConfig {
            runtime_path: self.runtime_path.clone(),
            ..Default::default()
        };
        Pipeline::new(project, config.with_run_options(&self.run_options()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Helper to format elmrender-core errors with recovery hints
    let format_error = |err: anyhow::Error| -> anyhow::Error {
        if let Some(core_err) = err.downcast_ref::<elmrender_core::Error>() {
            anyhow::anyhow!("{}", core_err.with_hint())
        } else {
            err
        }
    };

    match cli.command {
        Commands::Render {
            view,
            project,
            decoder,
            model,
            model_file,
            indent,
            no_newlines,
            run,
        } => {
            let request = render::Request {
                view,
                decoder,
                model,
                model_file,
                indent,
                new_lines: !no_newlines,
            };
            render::execute(&project, request, &run).await.map_err(format_error)?;
        }

        Commands::Batch {
            config,
            project,
            run,
        } => {
            batch::execute(&project, &config, &run).await.map_err(format_error)?;
        }
    }

    Ok(())
}
