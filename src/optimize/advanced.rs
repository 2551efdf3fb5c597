//! Third-party compressors: oxc for scripts, lightningcss for styles.

use anyhow::{anyhow, Result};
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use super::{ResourceOptimizer, ScriptOptions};

/// Optimizer backed by the oxc minifier and lightningcss.
#[derive(Debug, Default)]
pub struct AdvancedOptimizer;

impl ResourceOptimizer for AdvancedOptimizer {
    fn optimize_script(&self, content: &str, options: &ScriptOptions) -> Result<String> {
        if content.is_empty() {
            return Ok(String::new());
        }

        let allocator = Allocator::default();
        let parsed = Parser::new(&allocator, content, SourceType::cjs()).parse();
        if !parsed.errors.is_empty() {
            let messages: Vec<String> = parsed
                .errors
                .iter()
                .map(|error| error.to_string())
                .collect();
            return Err(anyhow!("script parse failed: {}", messages.join("; ")));
        }

        let minifier_options = MinifierOptions {
            mangle: options.munge.then(MangleOptions::default),
            compress: (!options.disable_optimizations).then(CompressOptions::smallest),
        };

        let mut program = parsed.program;
        let minified = Minifier::new(minifier_options).minify(&allocator, &mut program);

        let code = Codegen::new()
            .with_options(CodegenOptions {
                minify: true,
                comments: CommentOptions::disabled(),
                ..CodegenOptions::default()
            })
            .with_scoping(minified.scoping)
            .build(&program)
            .code;
        Ok(code)
    }

    fn optimize_style(&self, content: &str) -> Result<String> {
        if content.is_empty() {
            return Ok(String::new());
        }

        let stylesheet = StyleSheet::parse(content, ParserOptions::default())
            .map_err(|error| anyhow!("stylesheet parse failed: {error}"))?;
        let output = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..PrinterOptions::default()
            })
            .map_err(|error| anyhow!("stylesheet print failed: {error}"))?;
        Ok(output.code)
    }
}
