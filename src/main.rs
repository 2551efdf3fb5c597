//! Command-line interface for the bundler.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use web_bundler::{process_document, BundleConfig, FileConfig};

/// Collapse development script and stylesheet references in an HTML
/// document into optimized bundles.
#[derive(Debug, Parser)]
#[command(name = "web_bundler", version, about)]
struct Cli {
    /// Input document to scan for bundle directives.
    #[arg(short, long)]
    input: PathBuf,

    /// Location of the processed output document.
    #[arg(short, long)]
    output: PathBuf,

    /// Base directory for resolving templated source references.
    #[arg(long)]
    input_base_dir: Option<PathBuf>,

    /// Base directory for resolving templated bundle targets.
    #[arg(long)]
    output_base_dir: Option<PathBuf>,

    /// Hashing algorithm for `#hash#` substitution (MD5, SHA-1, SHA-256).
    #[arg(long)]
    hash_algorithm: Option<String>,

    /// Optimizer for style bundles (none, simple, advanced).
    #[arg(long)]
    style_optimizer: Option<String>,

    /// Optimizer for script bundles (none, simple, advanced).
    #[arg(long)]
    script_optimizer: Option<String>,

    /// Shorten local identifiers where the script optimizer supports it.
    #[arg(long)]
    munge: Option<bool>,

    /// Emit per-source optimizer diagnostics.
    #[arg(long)]
    verbose: Option<bool>,

    /// Keep semicolons that could otherwise be dropped.
    #[arg(long)]
    preserve_semicolons: Option<bool>,

    /// Disable structural compression passes in the script optimizer.
    #[arg(long)]
    disable_optimizations: Option<bool>,

    /// Explicit configuration file; defaults to `bundler.config.json` next
    /// to the input document.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> BundleConfig {
        let file = match &self.config {
            Some(path) => FileConfig::from_path(path).unwrap_or_default(),
            None => {
                let input_dir = self.input.parent().unwrap_or_else(|| std::path::Path::new("."));
                FileConfig::discover(input_dir)
            }
        };

        let mut config = file.into_config(self.input, self.output);
        if self.input_base_dir.is_some() {
            config.input_base_dir = self.input_base_dir;
        }
        if self.output_base_dir.is_some() {
            config.output_base_dir = self.output_base_dir;
        }
        if let Some(algorithm) = self.hash_algorithm {
            config.hash_algorithm = algorithm;
        }
        if let Some(optimizer) = self.style_optimizer {
            config.style_optimizer = optimizer;
        }
        if let Some(optimizer) = self.script_optimizer {
            config.script_optimizer = optimizer;
        }
        if let Some(munge) = self.munge {
            config.script_options.munge = munge;
        }
        if let Some(verbose) = self.verbose {
            config.script_options.verbose = verbose;
        }
        if let Some(preserve) = self.preserve_semicolons {
            config.script_options.preserve_semicolons = preserve;
        }
        if let Some(disable) = self.disable_optimizations {
            config.script_options.disable_optimizations = disable;
        }
        config
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Cli::parse().into_config();
    process_document(&config)
}
