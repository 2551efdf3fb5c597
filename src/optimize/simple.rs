//! Built-in conservative minifier.
//!
//! Strips comments and collapses whitespace with a quote-aware scanner so
//! string literal contents are never altered. The scanner does not parse
//! the languages; constructs it cannot distinguish (a regex literal
//! containing `//` or `/*`) are left to the advanced optimizer.

use anyhow::Result;

use super::{ResourceOptimizer, ScriptOptions};

/// Optimizer performing conservative comment and whitespace stripping.
#[derive(Debug, Default)]
pub struct SimpleOptimizer;

impl ResourceOptimizer for SimpleOptimizer {
    fn optimize_script(&self, content: &str, _options: &ScriptOptions) -> Result<String> {
        if content.is_empty() {
            return Ok(String::new());
        }
        Ok(compact_lines(&strip_comments(content, true)))
    }

    fn optimize_style(&self, content: &str) -> Result<String> {
        if content.is_empty() {
            return Ok(String::new());
        }
        Ok(compact_lines(&collapse_spaces(&strip_comments(
            content, false,
        ))))
    }
}

/// Remove `/* ... */` (and, for scripts, `// ...`) comments.
///
/// Block comments are replaced by a single space so adjacent tokens never
/// merge; line comments keep their terminating newline.
fn strip_comments(input: &str, line_comments: bool) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string: Option<char> = None;
    let mut escaped = false;

    while let Some(ch) = chars.next() {
        if let Some(quote) = in_string {
            output.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                in_string = None;
            }
            continue;
        }

        match ch {
            '"' | '\'' | '`' => {
                in_string = Some(ch);
                output.push(ch);
            }
            '/' => match chars.peek() {
                Some('*') => {
                    chars.next();
                    let mut star = false;
                    for inner in chars.by_ref() {
                        if star && inner == '/' {
                            break;
                        }
                        star = inner == '*';
                    }
                    output.push(' ');
                }
                Some('/') if line_comments => {
                    for inner in chars.by_ref() {
                        if inner == '\n' {
                            output.push('\n');
                            break;
                        }
                    }
                }
                _ => output.push('/'),
            },
            _ => output.push(ch),
        }
    }

    output
}

/// Collapse runs of spaces and tabs outside string literals.
fn collapse_spaces(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut in_string: Option<char> = None;
    let mut escaped = false;
    let mut pending_space = false;

    for ch in input.chars() {
        if let Some(quote) = in_string {
            output.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                in_string = None;
            }
            continue;
        }

        match ch {
            ' ' | '\t' => pending_space = true,
            '"' | '\'' => {
                if pending_space {
                    output.push(' ');
                    pending_space = false;
                }
                in_string = Some(ch);
                output.push(ch);
            }
            _ => {
                if pending_space && ch != '\n' {
                    output.push(' ');
                }
                pending_space = false;
                output.push(ch);
            }
        }
    }

    output
}

/// Trim line ends and drop blank lines, keeping line structure intact.
fn compact_lines(input: &str) -> String {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ScriptOptions {
        ScriptOptions::default()
    }

    #[test]
    fn strips_script_comments() {
        let minified = SimpleOptimizer
            .optimize_script(
                "// leading note\nvar a = 1; /* inline */ var b = 2;\n\n\nvar c = 3;\n",
                &options(),
            )
            .unwrap();
        assert_eq!(minified, "var a = 1;   var b = 2;\nvar c = 3;");
    }

    #[test]
    fn string_literals_are_never_altered() {
        let minified = SimpleOptimizer
            .optimize_script("var url = \"http://example.com/x\";  \n", &options())
            .unwrap();
        assert_eq!(minified, "var url = \"http://example.com/x\";");

        let minified = SimpleOptimizer
            .optimize_style(".a::before { content: \"a  /* b */  c\"; }\n")
            .unwrap();
        assert_eq!(minified, ".a::before { content: \"a  /* b */  c\"; }");
    }

    #[test]
    fn division_is_not_a_comment() {
        let minified = SimpleOptimizer
            .optimize_script("var half = total / 2;\n", &options())
            .unwrap();
        assert_eq!(minified, "var half = total / 2;");
    }

    #[test]
    fn compacts_style_whitespace() {
        let minified = SimpleOptimizer
            .optimize_style("h1   {\n    color:   red;\n}\n\n/* palette */\nh2 { color: blue; }\n")
            .unwrap();
        assert_eq!(minified, "h1 {\ncolor: red;\n}\nh2 { color: blue; }");
    }

    #[test]
    fn empty_content_stays_empty() {
        assert_eq!(
            SimpleOptimizer.optimize_script("", &options()).unwrap(),
            ""
        );
        assert_eq!(SimpleOptimizer.optimize_style("").unwrap(), "");
    }
}
