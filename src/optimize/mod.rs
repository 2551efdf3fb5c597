//! Pluggable content optimizers and the per-directive aggregation pipeline.

mod advanced;
mod passthrough;
mod pipeline;
mod simple;

pub use advanced::AdvancedOptimizer;
pub use passthrough::PassthroughOptimizer;
pub use pipeline::{run_pipeline, CompressionStats, SourceReference, MINIFIED_MARKER};
pub use simple::SimpleOptimizer;

use anyhow::Result;
use tracing::warn;

/// Flags forwarded to script optimizers.
///
/// Not every optimizer honours every flag; implementations ignore the ones
/// that have no equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptOptions {
    /// Shorten local identifiers where the optimizer supports it.
    pub munge: bool,
    /// Emit per-source optimizer diagnostics.
    pub verbose: bool,
    /// Keep semicolons that could otherwise be dropped.
    pub preserve_semicolons: bool,
    /// Disable structural compression passes, leaving only whitespace and
    /// identifier work.
    pub disable_optimizations: bool,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            munge: true,
            verbose: false,
            preserve_semicolons: true,
            disable_optimizations: true,
        }
    }
}

/// Capability applied to each fetched source before aggregation.
///
/// Implementations are stateless; one instance serves every directive of
/// its kind within a run.
pub trait ResourceOptimizer {
    /// Optimize script content.
    fn optimize_script(&self, content: &str, options: &ScriptOptions) -> Result<String>;

    /// Optimize stylesheet content.
    fn optimize_style(&self, content: &str) -> Result<String>;
}

/// Select an optimizer implementation by configuration name.
///
/// Unknown names fall back to the simple optimizer with a warning.
pub fn select_optimizer(name: &str) -> Box<dyn ResourceOptimizer> {
    match name.to_ascii_lowercase().as_str() {
        "none" => Box::new(PassthroughOptimizer),
        "advanced" => Box::new(AdvancedOptimizer),
        "simple" => Box::new(SimpleOptimizer),
        other => {
            warn!("unknown optimizer `{other}`, falling back to `simple`");
            Box::new(SimpleOptimizer)
        }
    }
}
