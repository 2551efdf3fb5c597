//! Bundle directives and the scanning of their inner source references.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::BundleError;

fn style_source_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?s)<link.*?href="(.*?)".*?>"#).expect("invalid link regex")
    })
}

fn script_source_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?s)<script.*?src="(.*?)".*?>.*?</script>"#).expect("invalid script regex")
    })
}

/// The kind of bundle a directive declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// A `build:js` region bundling `<script src="...">` references.
    Script,
    /// A `build:css` region bundling `<link href="...">` references.
    Style,
    /// A `build:remove` region deleted from the output document.
    Remove,
}

impl DirectiveKind {
    /// Map a directive type token to its kind.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "js" => Some(Self::Script),
            "css" => Some(Self::Style),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }

    /// The type token as written in directive comments.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Script => "js",
            Self::Style => "css",
            Self::Remove => "remove",
        }
    }

    /// Build the tag that replaces a processed directive region.
    pub fn replacement_tag(&self, file_name: &str) -> String {
        match self {
            Self::Script => {
                format!("<script type=\"text/javascript\" src=\"{file_name}\"></script>")
            }
            Self::Style => format!("<link rel=\"stylesheet\" href=\"{file_name}\" />"),
            Self::Remove => String::new(),
        }
    }

    fn source_pattern(&self) -> Option<&'static Regex> {
        match self {
            Self::Script => Some(script_source_pattern()),
            Self::Style => Some(style_source_pattern()),
            Self::Remove => None,
        }
    }
}

/// One bundle directive extracted from the host document.
#[derive(Debug, Clone)]
pub struct BundleDirective {
    /// Kind of bundle the region declares.
    pub kind: DirectiveKind,
    /// Whitespace-separated attributes following the type token; the first
    /// one is the target filename.
    pub attributes: Vec<String>,
    /// Raw region body between the opening and closing comments.
    pub body: String,
}

impl BundleDirective {
    /// The declared target filename.
    pub fn target_file_name(&self) -> Result<&str, BundleError> {
        self.attributes
            .first()
            .map(String::as_str)
            .filter(|name| !name.is_empty())
            .ok_or(BundleError::MissingTargetFileName)
    }
}

/// Extract the ordered source references from a directive body.
///
/// Matching is kind-specific, spans newlines inside a single tag, tolerates
/// extra attributes around the captured one and skips unrelated text
/// between matches. Occurrence order is preserved.
pub fn scan_source_references(kind: DirectiveKind, body: &str) -> Vec<String> {
    let Some(pattern) = kind.source_pattern() else {
        return Vec::new();
    };
    pattern
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|path| path.as_str().to_string())
        .collect()
}
