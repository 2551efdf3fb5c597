//! Ordered aggregation of fetched sources into one bundle artifact.

use std::path::PathBuf;

use tracing::{debug, error};

use crate::directive::DirectiveKind;

use super::{ResourceOptimizer, ScriptOptions};

/// Filename substring marking a source as already minified.
pub const MINIFIED_MARKER: &str = ".min.";

/// One fetched source reference, ready for aggregation.
#[derive(Debug, Clone)]
pub struct SourceReference {
    /// The reference as written in the directive body.
    pub raw_path: String,
    /// Absolute location the reference resolved to.
    pub resolved_path: PathBuf,
    /// Fetched (and, for stylesheets, rewritten) content.
    pub content: String,
    /// Whether the resolved filename carries the minified marker.
    pub pre_minified: bool,
}

/// UTF-8 byte counts before and after optimization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressionStats {
    /// Aggregate source bytes fed into the pipeline.
    pub before_bytes: usize,
    /// Aggregate bytes appended to the artifact.
    pub after_bytes: usize,
}

impl CompressionStats {
    /// Compression ratio as an integer percentage; informational only.
    pub fn ratio_percent(&self) -> usize {
        if self.before_bytes == 0 {
            0
        } else {
            self.after_bytes * 100 / self.before_bytes
        }
    }
}

/// Optimize and concatenate sources in scan order.
///
/// Pre-minified sources are passed through with a logged notice. A failing
/// optimizer does not abort the bundle: the failure is logged and the
/// source's raw content is used instead, so the artifact never silently
/// loses a referenced source.
pub fn run_pipeline(
    kind: DirectiveKind,
    sources: &[SourceReference],
    optimizer: &dyn ResourceOptimizer,
    options: &ScriptOptions,
) -> (String, CompressionStats) {
    let mut artifact = String::new();
    let mut stats = CompressionStats::default();

    for source in sources {
        stats.before_bytes += source.content.len();

        let optimized = if source.pre_minified {
            debug!(
                "skipping optimization for {}, already minified",
                source.resolved_path.display()
            );
            source.content.clone()
        } else {
            debug!("optimizing {}", source.resolved_path.display());
            match optimize_source(kind, optimizer, &source.content, options) {
                Ok(content) => content,
                Err(err) => {
                    error!(
                        "failed to optimize {}: {err:#}; using raw content",
                        source.resolved_path.display()
                    );
                    source.content.clone()
                }
            }
        };

        stats.after_bytes += optimized.len();
        artifact.push_str(&optimized);
        artifact.push('\n');
    }

    (artifact, stats)
}

fn optimize_source(
    kind: DirectiveKind,
    optimizer: &dyn ResourceOptimizer,
    content: &str,
    options: &ScriptOptions,
) -> anyhow::Result<String> {
    match kind {
        DirectiveKind::Script => optimizer.optimize_script(content, options),
        DirectiveKind::Style | DirectiveKind::Remove => optimizer.optimize_style(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use std::cell::Cell;

    struct CountingOptimizer {
        calls: Cell<usize>,
    }

    impl CountingOptimizer {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    impl ResourceOptimizer for CountingOptimizer {
        fn optimize_script(&self, content: &str, _options: &ScriptOptions) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(content.trim().to_string())
        }

        fn optimize_style(&self, content: &str) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(content.trim().to_string())
        }
    }

    struct FailingOptimizer;

    impl ResourceOptimizer for FailingOptimizer {
        fn optimize_script(&self, _content: &str, _options: &ScriptOptions) -> Result<String> {
            Err(anyhow!("boom"))
        }

        fn optimize_style(&self, _content: &str) -> Result<String> {
            Err(anyhow!("boom"))
        }
    }

    fn source(raw: &str, resolved: &str, content: &str) -> SourceReference {
        SourceReference {
            raw_path: raw.to_string(),
            resolved_path: PathBuf::from(resolved),
            content: content.to_string(),
            pre_minified: resolved
                .rsplit('/')
                .next()
                .is_some_and(|name| name.contains(MINIFIED_MARKER)),
        }
    }

    #[test]
    fn pre_minified_sources_skip_the_optimizer() {
        let sources = vec![
            source("lib.min.js", "/site/js/lib.min.js", "lib();"),
            source("app.js", "/site/js/app.js", "  app();  "),
        ];
        let optimizer = CountingOptimizer::new();
        let (artifact, _) = run_pipeline(
            DirectiveKind::Script,
            &sources,
            &optimizer,
            &ScriptOptions::default(),
        );

        assert_eq!(optimizer.calls.get(), 1);
        assert_eq!(artifact, "lib();\napp();\n");
    }

    #[test]
    fn aggregation_preserves_scan_order() {
        let sources = vec![
            source("one.css", "/site/one.css", "one"),
            source("two.css", "/site/two.css", "two"),
            source("three.css", "/site/three.css", "three"),
        ];
        let optimizer = CountingOptimizer::new();
        let (artifact, _) = run_pipeline(
            DirectiveKind::Style,
            &sources,
            &optimizer,
            &ScriptOptions::default(),
        );

        assert_eq!(artifact, "one\ntwo\nthree\n");
    }

    #[test]
    fn optimizer_failures_fall_back_to_raw_content() {
        let sources = vec![
            source("bad.js", "/site/bad.js", "bad content"),
            source("good.js", "/site/good.js", "good content"),
        ];
        let (artifact, stats) = run_pipeline(
            DirectiveKind::Script,
            &sources,
            &FailingOptimizer,
            &ScriptOptions::default(),
        );

        assert_eq!(artifact, "bad content\ngood content\n");
        assert_eq!(stats.before_bytes, stats.after_bytes);
    }

    #[test]
    fn stats_count_utf8_bytes() {
        let sources = vec![source("app.js", "/site/app.js", "  padded  ")];
        let optimizer = CountingOptimizer::new();
        let (_, stats) = run_pipeline(
            DirectiveKind::Script,
            &sources,
            &optimizer,
            &ScriptOptions::default(),
        );

        assert_eq!(stats.before_bytes, 10);
        assert_eq!(stats.after_bytes, 6);
        assert_eq!(stats.ratio_percent(), 60);
    }

    #[test]
    fn empty_source_lists_produce_an_empty_artifact() {
        let optimizer = CountingOptimizer::new();
        let (artifact, stats) = run_pipeline(
            DirectiveKind::Style,
            &[],
            &optimizer,
            &ScriptOptions::default(),
        );

        assert_eq!(artifact, "");
        assert_eq!(stats, CompressionStats::default());
        assert_eq!(optimizer.calls.get(), 0);
    }
}
