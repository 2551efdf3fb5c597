//! No-op optimizer for builds that only concatenate.

use anyhow::Result;

use super::{ResourceOptimizer, ScriptOptions};

/// Optimizer that returns every source unchanged.
#[derive(Debug, Default)]
pub struct PassthroughOptimizer;

impl ResourceOptimizer for PassthroughOptimizer {
    fn optimize_script(&self, content: &str, _options: &ScriptOptions) -> Result<String> {
        Ok(content.to_string())
    }

    fn optimize_style(&self, content: &str) -> Result<String> {
        Ok(content.to_string())
    }
}
