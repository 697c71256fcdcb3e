//! kvis - render graph kernel files to PDF
//!
//! Reads every kernel file in a directory, lays each graph out with a
//! force-directed simulation and writes one `<name>-vis.pdf` per input.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;

use commands::render::{self, BatchOptions, BatchSummary};
use config::KvisConfig;

/// Output directory used when neither `--output` nor the config sets one.
const DEFAULT_OUTPUT_DIR: &str = "../graphs";

/// Render graph kernel files to PDF.
///
/// Every file in DIRECTORY is parsed as a kernel (vertex count on the first
/// line, then one line of 1-based neighbors per vertex), laid out with a
/// force-directed simulation and drawn to `<output>/<file>-vis.pdf`.
#[derive(Parser)]
#[command(name = "kvis")]
#[command(author, version)]
#[command(about = "Render graph kernel files to PDF")]
#[command(after_help = "Examples:
  kvis                          Render ../kernels into ../graphs
  kvis kernels -o out           Render kernels/ into out/
  kvis kernels -s se_059.sol    Highlight the vertices listed in se_059.sol")]
pub struct Cli {
    /// Directory containing kernel files
    #[arg(default_value = "../kernels")]
    directory: PathBuf,

    /// Directory to write PDFs into (created if missing)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Solution file whose vertices (1-based, one per line) are highlighted
    #[arg(short, long)]
    solution: Option<PathBuf>,

    /// Number of layout iterations (overrides config)
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Do not draw vertex indices
    #[arg(long)]
    no_labels: bool,

    /// Config file (defaults to ./.kvisrc.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

/// Merge CLI flags over the config file into batch options.
fn batch_options(cli: &Cli, config: KvisConfig) -> Result<BatchOptions> {
    let solution = match &cli.solution {
        Some(path) => Some(
            kvis_core::read_solution_file(path)
                .with_context(|| format!("Failed to read solution file {}", path.display()))?,
        ),
        None => None,
    };

    let output_dir = cli
        .output
        .clone()
        .or_else(|| config.output_directory().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let mut layout = config.layout;
    if let Some(iterations) = cli.iterations {
        layout.iterations = iterations;
    }

    let mut render = config.render;
    if cli.no_labels {
        render.labels = false;
    }

    Ok(BatchOptions {
        input_dir: cli.directory.clone(),
        output_dir,
        solution,
        layout,
        render,
    })
}

fn print_summary(summary: &BatchSummary) {
    let line = format!(
        "Rendered {} of {} kernels",
        summary.rendered.len(),
        summary.total()
    );
    if summary.failed.is_empty() {
        println!("{}", line.green());
    } else {
        println!("{} ({} failed)", line.yellow(), summary.failed.len());
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => KvisConfig::load_strict(path)?,
        None => KvisConfig::load(Path::new(".")),
    };

    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }

    let options = batch_options(&cli, config)?;
    let summary = render::run(&options)?;

    if !cli.quiet {
        print_summary(&summary);
    }
    Ok(())
}
