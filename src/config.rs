//! Process-wide configuration for a bundling run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::optimize::ScriptOptions;

const DEFAULT_CONFIG_FILE: &str = "bundler.config.json";

/// Complete configuration consumed by the bundling engine.
#[derive(Debug, Clone)]
pub struct BundleConfig {
    /// Document scanned for bundle directives.
    pub input_file: PathBuf,
    /// Location of the processed output document.
    pub output_file: PathBuf,
    /// Base directory for resolving templated source references.
    pub input_base_dir: Option<PathBuf>,
    /// Base directory for resolving templated bundle targets.
    pub output_base_dir: Option<PathBuf>,
    /// Hashing algorithm for `#hash#` substitution.
    pub hash_algorithm: String,
    /// Optimizer name applied to style bundles.
    pub style_optimizer: String,
    /// Optimizer name applied to script bundles.
    pub script_optimizer: String,
    /// Flags forwarded to script optimizers.
    pub script_options: ScriptOptions,
}

impl BundleConfig {
    /// Configuration with default settings for the given document pair.
    pub fn new(input_file: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        FileConfig::default().into_config(input_file, output_file)
    }
}

/// Discoverable configuration file describing everything but the document
/// paths themselves.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileConfig {
    /// Base directory for resolving templated source references.
    pub input_base_dir: Option<PathBuf>,
    /// Base directory for resolving templated bundle targets.
    pub output_base_dir: Option<PathBuf>,
    /// Hashing algorithm for `#hash#` substitution.
    pub hash_algorithm: String,
    /// Optimizer name applied to style bundles.
    pub style_optimizer: String,
    /// Optimizer name applied to script bundles.
    pub script_optimizer: String,
    /// Shorten local identifiers where the script optimizer supports it.
    pub munge: bool,
    /// Emit per-source optimizer diagnostics.
    pub verbose: bool,
    /// Keep semicolons that could otherwise be dropped.
    pub preserve_semicolons: bool,
    /// Disable structural compression passes.
    pub disable_optimizations: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        let script_options = ScriptOptions::default();
        Self {
            input_base_dir: None,
            output_base_dir: None,
            hash_algorithm: "MD5".into(),
            style_optimizer: "simple".into(),
            script_optimizer: "simple".into(),
            munge: script_options.munge,
            verbose: script_options.verbose,
            preserve_semicolons: script_options.preserve_semicolons,
            disable_optimizations: script_options.disable_optimizations,
        }
    }
}

impl FileConfig {
    /// Attempt to load configuration from the directory holding the input
    /// document.
    ///
    /// When the configuration file does not exist or fails to parse we fall
    /// back to default values so callers can continue with sensible
    /// assumptions.
    pub fn discover(input_dir: &Path) -> Self {
        let candidate = input_dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Combine the file settings with a document pair into a complete
    /// configuration.
    pub fn into_config(
        self,
        input_file: impl Into<PathBuf>,
        output_file: impl Into<PathBuf>,
    ) -> BundleConfig {
        BundleConfig {
            input_file: input_file.into(),
            output_file: output_file.into(),
            input_base_dir: self.input_base_dir,
            output_base_dir: self.output_base_dir,
            hash_algorithm: self.hash_algorithm,
            style_optimizer: self.style_optimizer,
            script_optimizer: self.script_optimizer,
            script_options: ScriptOptions {
                munge: self.munge,
                verbose: self.verbose,
                preserve_semicolons: self.preserve_semicolons,
                disable_optimizations: self.disable_optimizations,
            },
        }
    }
}
