//! moduledocs - generate Markdown documentation for a Python source tree
//!
//! ```text
//! moduledocs src/ -o docs
//! moduledocs app.py --style-config plain.json --no-index
//! moduledocs src/ --keep-going -v
//! moduledocs src/pkg --dump-ir
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use moduledocs::extractors::{ExtractorManager, FailurePolicy, Module};
use moduledocs::render::{self, MarkdownRenderer, Renderer, Style};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "moduledocs", version, about = "Generate documentation for Python sources")]
struct Cli {
    /// Source file or directory to document
    input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "docs")]
    output: PathBuf,

    /// Output style
    #[arg(short, long, value_enum, default_value_t = StyleKind::Md)]
    style: StyleKind,

    /// JSON file overriding style templates; unspecified fields keep their defaults
    #[arg(long, value_name = "FILE")]
    style_config: Option<PathBuf>,

    /// Do not write index pages
    #[arg(long)]
    no_index: bool,

    /// Skip files that fail to extract instead of stopping
    #[arg(long)]
    keep_going: bool,

    /// Print the extracted modules as JSON instead of writing pages
    #[arg(long)]
    dump_ir: bool,

    /// Verbose output (per-file progress)
    #[arg(short, long)]
    verbose: bool,

    /// Debug output
    #[arg(long, conflicts_with = "quiet")]
    debug: bool,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleKind {
    /// Markdown
    Md,
}

impl StyleKind {
    fn renderer(self) -> Box<dyn Renderer> {
        match self {
            StyleKind::Md => Box::new(MarkdownRenderer),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if !cli.input.exists() {
        anyhow::bail!("Input path does not exist: {}", cli.input.display());
    }

    let policy = if cli.keep_going {
        FailurePolicy::SkipAndReport
    } else {
        FailurePolicy::Abort
    };
    let manager = ExtractorManager::with_policy(policy);

    let modules: Vec<Module> = manager
        .find_and_extract(&cli.input)
        .collect::<Result<_, _>>()
        .with_context(|| format!("Failed to extract {}", cli.input.display()))?;
    info!("Extracted {} modules from {}", modules.len(), cli.input.display());

    if cli.dump_ir {
        let json = serde_json::to_string_pretty(&modules).context("Failed to serialize JSON")?;
        println!("{}", json);
        return Ok(());
    }

    let renderer = cli.style.renderer();
    let mut style = match &cli.style_config {
        Some(path) => Style::from_json_file(path)
            .with_context(|| format!("Failed to load style {}", path.display()))?,
        None => renderer.configure(),
    };
    if cli.no_index {
        style.index = false;
    }

    let docs = render::build(renderer.as_ref(), &style, modules, &cli.input);
    docs.save(&cli.output)
        .with_context(|| format!("Failed to write documentation to {}", cli.output.display()))?;

    Ok(())
}
