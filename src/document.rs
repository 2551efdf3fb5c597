//! Host-document scanning and whole-document processing.
//!
//! Bundle directives are comment-delimited regions:
//!
//! ```html
//! <!-- build:css app.css -->
//! <link rel="stylesheet" href="css/one.css" />
//! <link rel="stylesheet" href="css/two.css" />
//! <!-- /build -->
//! ```
//!
//! Each region is replaced in place by the replacement text its processor
//! produces; everything between regions is copied through verbatim.

use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{info, warn};

use crate::access;
use crate::config::BundleConfig;
use crate::directive::{BundleDirective, DirectiveKind};
use crate::processor::BundleProcessor;

fn directive_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)<!--\s*build:(\w+)[ \t]*(.*?)\s*-->(.*?)<!--\s*/build\s*-->")
            .expect("invalid directive regex")
    })
}

/// Process a whole document: read, bundle every directive, write.
pub fn process_document(config: &BundleConfig) -> Result<()> {
    info!(
        "processing {} -> {}",
        config.input_file.display(),
        config.output_file.display()
    );

    let markup = access::read_to_string(&config.input_file)?;
    let processor = BundleProcessor::new(config)?;
    let output = replace_directives(&markup, &processor)?;
    access::write(&config.output_file, &output)?;
    Ok(())
}

/// Replace every directive region of `markup` with its bundle output.
///
/// Regions with an unrecognized type token are left untouched so authored
/// markup is never destroyed by a typo.
pub fn replace_directives(markup: &str, processor: &BundleProcessor<'_>) -> Result<String> {
    let mut output = String::with_capacity(markup.len());
    let mut copied_to = 0;

    for caps in directive_pattern().captures_iter(markup) {
        let matched = caps.get(0).expect("match without a full capture");
        let token = caps.get(1).map_or("", |m| m.as_str());
        let attributes = caps.get(2).map_or("", |m| m.as_str());
        let body = caps.get(3).map_or("", |m| m.as_str());

        output.push_str(&markup[copied_to..matched.start()]);
        copied_to = matched.end();

        match DirectiveKind::from_token(token) {
            Some(kind) => {
                let directive = BundleDirective {
                    kind,
                    attributes: attributes.split_whitespace().map(String::from).collect(),
                    body: body.to_string(),
                };
                let replacement = processor
                    .process(&directive)
                    .with_context(|| format!("failed to process build:{token} directive"))?;
                output.push_str(&replacement);
            }
            None => {
                warn!("leaving unknown directive `build:{token}` untouched");
                output.push_str(matched.as_str());
            }
        }
    }

    output.push_str(&markup[copied_to..]);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_fixture(dir: &std::path::Path) {
        fs::create_dir_all(dir.join("css")).unwrap();
        fs::create_dir_all(dir.join("js")).unwrap();
        fs::write(dir.join("css/one.css"), "h1{color:red}").unwrap();
        fs::write(dir.join("css/two.css"), "h2{color:blue}").unwrap();
        fs::write(dir.join("js/app.js"), "app();").unwrap();
    }

    fn fixture_config(dir: &std::path::Path) -> BundleConfig {
        let mut config = BundleConfig::new(dir.join("index-dev.html"), dir.join("index.html"));
        config.style_optimizer = "none".into();
        config.script_optimizer = "none".into();
        config
    }

    const MARKUP: &str = "<html><head>\n\
        <!-- build:css app.css -->\n\
        <link rel=\"stylesheet\" href=\"css/one.css\" />\n\
        <link rel=\"stylesheet\" href=\"css/two.css\" />\n\
        <!-- /build -->\n\
        </head><body>\n\
        <!-- build:js app.js -->\n\
        <script src=\"js/app.js\"></script>\n\
        <!-- /build -->\n\
        <!-- build:remove -->\n\
        <script src=\"js/live-reload.js\"></script>\n\
        <!-- /build -->\n\
        </body></html>\n";

    #[test]
    fn replaces_every_region_in_place() {
        let dir = tempdir().unwrap();
        write_fixture(dir.path());
        fs::write(dir.path().join("index-dev.html"), MARKUP).unwrap();

        let config = fixture_config(dir.path());
        process_document(&config).unwrap();

        let output = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert_eq!(
            output,
            "<html><head>\n\
            <link rel=\"stylesheet\" href=\"app.css\" />\n\
            </head><body>\n\
            <script type=\"text/javascript\" src=\"app.js\"></script>\n\
            \n\
            </body></html>\n"
        );

        assert_eq!(
            fs::read_to_string(dir.path().join("app.css")).unwrap(),
            "h1{color:red}\nh2{color:blue}\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("app.js")).unwrap(),
            "app();\n"
        );
    }

    #[test]
    fn reruns_are_byte_identical() {
        let dir = tempdir().unwrap();
        write_fixture(dir.path());
        fs::write(dir.path().join("index-dev.html"), MARKUP).unwrap();

        let config = fixture_config(dir.path());
        process_document(&config).unwrap();
        let first = fs::read_to_string(dir.path().join("index.html")).unwrap();
        process_document(&config).unwrap();
        let second = fs::read_to_string(dir.path().join("index.html")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn unknown_directive_types_are_left_untouched() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("index-dev.html"),
            "<!-- build:concat all.txt -->\n<p>kept</p>\n<!-- /build -->\n",
        )
        .unwrap();

        let config = fixture_config(dir.path());
        process_document(&config).unwrap();

        let output = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert_eq!(
            output,
            "<!-- build:concat all.txt -->\n<p>kept</p>\n<!-- /build -->\n"
        );
    }

    #[test]
    fn documents_without_directives_pass_through() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index-dev.html"), "<html></html>\n").unwrap();

        let config = fixture_config(dir.path());
        process_document(&config).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("index.html")).unwrap(),
            "<html></html>\n"
        );
    }

    #[test]
    fn directive_errors_identify_the_failing_region() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("index-dev.html"),
            "<!-- build:css -->\n<link href=\"css/one.css\" />\n<!-- /build -->\n",
        )
        .unwrap();

        let config = fixture_config(dir.path());
        let err = process_document(&config).unwrap_err();
        assert!(format!("{err:#}").contains("build:css"));
        assert!(!dir.path().join("index.html").exists());
    }
}
