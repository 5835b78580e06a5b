//! Token-driven formatter.
//!
//! Re-renders a token stream with brace-driven indentation. Spacing comes
//! from the whitespace tokens the lexer preserves: a newline-bearing run
//! becomes a line break at the current indent, any other run becomes a
//! single space, and adjacent code tokens stay glued together. Formatting
//! is total — any input produces a string.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use leolens_syntax::{tokenize, TokenKind};

/// User-facing formatter configuration, loadable from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Spaces per indent level (ignored with `use_tabs`).
    pub indent_size: usize,
    /// Indent with tabs instead of spaces.
    pub use_tabs: bool,
    /// Wrap lines longer than this; 0 disables wrapping.
    pub max_line_length: usize,
    /// Put a space before `{`.
    pub insert_space_before_brace: bool,
    /// Pad the inside of parentheses.
    pub insert_space_in_parentheses: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            indent_size: 4,
            use_tabs: false,
            max_line_length: 120,
            insert_space_before_brace: true,
            insert_space_in_parentheses: false,
        }
    }
}

/// Formatter-configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read format config: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for this config.
    #[error("invalid format config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl FormatConfig {
    /// Loads a configuration from a TOML file. Missing keys take their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

/// Token-stream formatter.
pub struct Formatter {
    config: FormatConfig,
}

impl Formatter {
    /// Creates a formatter with the given configuration.
    pub fn new(config: FormatConfig) -> Self {
        Formatter { config }
    }

    /// Formats source text. Never fails; unrecognized characters were
    /// already dropped by the lexer and simply do not reappear.
    pub fn format(&self, source: &str) -> String {
        let tokens = tokenize(source);
        let mut printer = Printer::new(&self.config, source.len());

        for token in &tokens {
            match token.kind {
                TokenKind::WhiteSpace => {
                    if token.text.contains('\n') {
                        printer.newline();
                    } else {
                        printer.space();
                    }
                }
                TokenKind::CommentLine => {
                    printer.text(token.text.trim_end());
                    printer.newline();
                }
                TokenKind::CommentBlock => {
                    for (i, line) in token.text.lines().enumerate() {
                        if i > 0 {
                            printer.newline();
                        }
                        printer.text(line.trim());
                    }
                    printer.newline();
                }
                TokenKind::LeftCurly => {
                    if self.config.insert_space_before_brace {
                        printer.space();
                    } else {
                        printer.trim_line_end();
                    }
                    printer.text("{");
                    printer.indent += 1;
                    printer.newline();
                }
                TokenKind::RightCurly => {
                    printer.indent = printer.indent.saturating_sub(1);
                    printer.newline();
                    printer.text("}");
                    printer.newline();
                }
                TokenKind::LeftParen => {
                    printer.text("(");
                    if self.config.insert_space_in_parentheses {
                        printer.space();
                    }
                }
                TokenKind::RightParen => {
                    if self.config.insert_space_in_parentheses {
                        printer.space();
                    }
                    printer.text(")");
                }
                TokenKind::Semicolon => {
                    printer.trim_line_end();
                    printer.text(";");
                    printer.newline();
                }
                TokenKind::Comma => {
                    printer.trim_line_end();
                    printer.text(",");
                    printer.space();
                }
                _ => printer.text(&token.text),
            }
        }

        let rendered = printer.finish();
        if self.config.max_line_length > 0 {
            self.wrap_lines(&rendered)
        } else {
            rendered
        }
    }

    fn wrap_lines(&self, code: &str) -> String {
        code.lines()
            .map(|line| self.wrap_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn wrap_line(&self, line: &str) -> String {
        if line.len() <= self.config.max_line_length {
            return line.to_string();
        }

        let leading: String = line.chars().take_while(|c| c.is_whitespace()).collect();
        let mut wrapped = Vec::new();
        let mut current = leading.clone();
        let mut has_word = false;

        for word in line.split_whitespace() {
            if has_word && current.len() + word.len() + 1 > self.config.max_line_length {
                wrapped.push(current);
                current = format!("{leading}{word}");
            } else {
                if has_word {
                    current.push(' ');
                }
                current.push_str(word);
            }
            has_word = true;
        }
        wrapped.push(current);
        wrapped.join("\n")
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::new(FormatConfig::default())
    }
}

/// Rendering state: output buffer, indent level, and whether the current
/// line is still empty (indentation is written lazily, so dedents taking
/// effect before `}` render correctly).
struct Printer<'c> {
    config: &'c FormatConfig,
    out: String,
    indent: usize,
    at_line_start: bool,
}

impl<'c> Printer<'c> {
    fn new(config: &'c FormatConfig, capacity: usize) -> Self {
        Printer {
            config,
            out: String::with_capacity(capacity),
            indent: 0,
            at_line_start: true,
        }
    }

    fn indentation(&self) -> String {
        if self.config.use_tabs {
            "\t".repeat(self.indent)
        } else {
            " ".repeat(self.indent * self.config.indent_size)
        }
    }

    fn text(&mut self, text: &str) {
        if self.at_line_start {
            let indent = self.indentation();
            self.out.push_str(&indent);
            self.at_line_start = false;
        }
        self.out.push_str(text);
    }

    fn space(&mut self) {
        if !self.at_line_start && !self.out.ends_with(' ') {
            self.out.push(' ');
        }
    }

    fn newline(&mut self) {
        self.trim_line_end();
        if !self.at_line_start {
            self.out.push('\n');
            self.at_line_start = true;
        }
    }

    fn trim_line_end(&mut self) {
        while self.out.ends_with(' ') || self.out.ends_with('\t') {
            self.out.pop();
        }
    }

    fn finish(mut self) -> String {
        self.trim_line_end();
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(source: &str) -> String {
        Formatter::default().format(source)
    }

    #[test]
    fn braces_drive_indentation() {
        let out = format("transition main() { let a: u8 = 1u8; return a; }");
        assert_eq!(
            out,
            "transition main() {\n    let a: u8 = 1u8;\n    return a;\n}\n"
        );
    }

    #[test]
    fn nested_blocks_indent_twice() {
        let out = format("function f() { if true { return 1u8; } }");
        assert!(out.contains("\n        return 1u8;\n"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn commas_get_a_trailing_space() {
        let out = format("let a = [1u8,2u8 , 3u8];");
        assert_eq!(out, "let a = [1u8, 2u8, 3u8];\n");
    }

    #[test]
    fn newline_runs_collapse() {
        let out = format("let a: u8 = 1u8;\n\n\nlet b: u8 = 2u8;");
        assert_eq!(out, "let a: u8 = 1u8;\nlet b: u8 = 2u8;\n");
    }

    #[test]
    fn line_comments_stay_on_their_own_line() {
        let out = format("// header\nlet a: u8 = 1u8;");
        assert_eq!(out, "// header\nlet a: u8 = 1u8;\n");
    }

    #[test]
    fn tabs_when_configured() {
        let formatter = Formatter::new(FormatConfig {
            use_tabs: true,
            ..FormatConfig::default()
        });
        let out = formatter.format("function f() { return 1u8; }");
        assert!(out.contains("\n\treturn 1u8;\n"));
    }

    #[test]
    fn no_space_before_brace_when_disabled() {
        let formatter = Formatter::new(FormatConfig {
            insert_space_before_brace: false,
            ..FormatConfig::default()
        });
        let out = formatter.format("function f() { return 1u8; }");
        assert!(out.starts_with("function f(){\n"));
    }

    #[test]
    fn long_lines_wrap_at_the_limit() {
        let formatter = Formatter::new(FormatConfig {
            max_line_length: 20,
            ..FormatConfig::default()
        });
        let out = formatter.format("let a = 1u8 + 2u8 + 3u8 + 4u8 + 5u8 + 6u8;");
        assert!(out.lines().all(|l| l.len() <= 20), "got:\n{out}");
    }

    #[test]
    fn formatting_never_fails_on_incomplete_code() {
        // unterminated everything
        let out = format("transition f( { let x = \"oops");
        assert!(!out.is_empty());
    }

    #[test]
    fn config_defaults() {
        let config = FormatConfig::default();
        assert_eq!(config.indent_size, 4);
        assert!(!config.use_tabs);
        assert_eq!(config.max_line_length, 120);
        assert!(config.insert_space_before_brace);
        assert!(!config.insert_space_in_parentheses);
    }

    #[test]
    fn config_loads_partial_toml() {
        let parsed: FormatConfig = toml::from_str("indent_size = 2\nuse_tabs = false").unwrap();
        assert_eq!(parsed.indent_size, 2);
        assert_eq!(parsed.max_line_length, 120);
    }
}
