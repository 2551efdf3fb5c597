//! Relativization of `url(...)` references inside bundled stylesheets.
//!
//! A stylesheet pulled into a bundle moves to the bundle's output location,
//! so every relative `url(...)` it contains must be rewritten to stay valid
//! from there. Only the URL token itself changes; all surrounding text is
//! copied through verbatim.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::BundleError;
use crate::paths::{normalize_lexically, relative_path_between, resolve_reference, PathSpaces};

fn css_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"url\(\s*(?:"\s*([^"]*?)\s*"|'\s*([^']*?)\s*'|([^'")\s][^)]*?))?\s*\)"#)
            .expect("invalid css url regex")
    })
}

fn external_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^[a-z][a-z0-9+.-]*:").expect("invalid external url regex")
    })
}

/// Rewrite relative `url(...)` references of a bundled stylesheet.
///
/// `source_raw_path` is the stylesheet reference as written in the
/// directive body (input space); `target_file_name` is the bundle's
/// declared target (output space). Absolute (`/`-leading) and
/// scheme-prefixed URLs (`data:`, `http:`, ...) pass through unchanged, and
/// query suffixes survive relativization verbatim.
pub fn relativize_style_urls(
    content: &str,
    source_raw_path: &str,
    target_file_name: &str,
    spaces: &PathSpaces,
) -> Result<String, BundleError> {
    let mut rewritten = String::with_capacity(content.len());
    let mut copied_to = 0;

    for caps in css_url_pattern().captures_iter(content) {
        let matched = caps.get(0).expect("match without a full capture");
        let (quote, url) = if let Some(double) = caps.get(1) {
            ("\"", double.as_str())
        } else if let Some(single) = caps.get(2) {
            ("'", single.as_str())
        } else {
            ("", caps.get(3).map(|bare| bare.as_str()).unwrap_or(""))
        };

        let relativized = relativize_url(url, source_raw_path, target_file_name, spaces)?;

        rewritten.push_str(&content[copied_to..matched.start()]);
        rewritten.push_str("url(");
        rewritten.push_str(quote);
        rewritten.push_str(&relativized);
        rewritten.push_str(quote);
        rewritten.push(')');
        copied_to = matched.end();
    }

    rewritten.push_str(&content[copied_to..]);
    Ok(rewritten)
}

fn relativize_url(
    url: &str,
    source_raw_path: &str,
    target_file_name: &str,
    spaces: &PathSpaces,
) -> Result<String, BundleError> {
    if url.is_empty() || url.starts_with('/') || external_url_pattern().is_match(url) {
        return Ok(url.to_string());
    }

    let (path_part, query) = match url.find('?') {
        Some(index) => url.split_at(index),
        None => (url, ""),
    };

    let source = resolve_reference(&spaces.input, source_raw_path)?;
    let source_dir = source.parent().unwrap_or_else(|| Path::new(""));
    let resource = normalize_lexically(&source_dir.join(path_part));

    let target = resolve_reference(&spaces.output, target_file_name)?;
    let target_dir = target.parent().unwrap_or_else(|| Path::new(""));

    Ok(format!(
        "{}{}",
        relative_path_between(target_dir, &resource),
        query
    ))
}
