//! Per-directive orchestration of the bundling engine.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::access;
use crate::config::BundleConfig;
use crate::directive::{scan_source_references, BundleDirective, DirectiveKind};
use crate::hash::resolve_hashed_file_name;
use crate::optimize::{
    run_pipeline, select_optimizer, ResourceOptimizer, SourceReference, MINIFIED_MARKER,
};
use crate::paths::{resolve_reference, PathSpaces};
use crate::rewrite::relativize_style_urls;

/// Processes bundle directives one at a time, in document order.
///
/// Holds the resolved path spaces and one stateless optimizer instance per
/// directive kind for the whole run.
pub struct BundleProcessor<'a> {
    config: &'a BundleConfig,
    spaces: PathSpaces,
    script_optimizer: Box<dyn ResourceOptimizer>,
    style_optimizer: Box<dyn ResourceOptimizer>,
}

impl<'a> BundleProcessor<'a> {
    /// Build a processor with optimizers selected from the configuration.
    pub fn new(config: &'a BundleConfig) -> Result<Self> {
        Self::with_optimizers(
            config,
            select_optimizer(&config.script_optimizer),
            select_optimizer(&config.style_optimizer),
        )
    }

    /// Build a processor with explicitly provided optimizer instances.
    pub fn with_optimizers(
        config: &'a BundleConfig,
        script_optimizer: Box<dyn ResourceOptimizer>,
        style_optimizer: Box<dyn ResourceOptimizer>,
    ) -> Result<Self> {
        Ok(Self {
            config,
            spaces: PathSpaces::from_config(config)?,
            script_optimizer,
            style_optimizer,
        })
    }

    /// Process one directive, producing its replacement text.
    ///
    /// Writes the bundle artifact as a side effect. `remove` directives
    /// produce an empty replacement and no artifact.
    pub fn process(&self, directive: &BundleDirective) -> Result<String> {
        if directive.kind == DirectiveKind::Remove {
            return Ok(String::new());
        }

        let declared_name = directive.target_file_name()?.to_string();
        info!("bundling {} region into {declared_name}", directive.kind.token());

        let sources = self
            .load_sources(directive, &declared_name)
            .with_context(|| format!("while bundling {declared_name}"))?;

        let optimizer = match directive.kind {
            DirectiveKind::Script => self.script_optimizer.as_ref(),
            DirectiveKind::Style | DirectiveKind::Remove => self.style_optimizer.as_ref(),
        };
        let (content, stats) = run_pipeline(
            directive.kind,
            &sources,
            optimizer,
            &self.config.script_options,
        );
        info!(
            "{} -> {} bytes, compression ratio {}%",
            stats.before_bytes,
            stats.after_bytes,
            stats.ratio_percent()
        );

        let file_name =
            resolve_hashed_file_name(&declared_name, &content, &self.config.hash_algorithm)?;
        let target_path = resolve_reference(&self.spaces.output, &file_name)?;
        access::write(&target_path, &content)
            .with_context(|| format!("while bundling {declared_name}"))?;
        debug!("wrote {}", target_path.display());

        Ok(directive.kind.replacement_tag(&file_name))
    }

    fn load_sources(
        &self,
        directive: &BundleDirective,
        target_file_name: &str,
    ) -> Result<Vec<SourceReference>> {
        let mut sources = Vec::new();
        for raw_path in scan_source_references(directive.kind, &directive.body) {
            let resolved_path = resolve_reference(&self.spaces.input, &raw_path)?;
            let mut content = access::read_to_string(&resolved_path)?;
            debug!(
                "loaded {} ({} bytes)",
                resolved_path.display(),
                content.len()
            );

            if directive.kind == DirectiveKind::Style {
                content =
                    relativize_style_urls(&content, &raw_path, target_file_name, &self.spaces)?;
            }

            let pre_minified = resolved_path
                .file_name()
                .map(|name| name.to_string_lossy().contains(MINIFIED_MARKER))
                .unwrap_or(false);

            sources.push(SourceReference {
                raw_path,
                resolved_path,
                content,
                pre_minified,
            });
        }
        Ok(sources)
    }
}
