//! Diagnostic rendering for parse errors.

use std::io;
use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use tessera_parse::{Expected, ParseError, ParseErrorKind, TokenKind};
use tessera_tokenizer::LexErrorKind;

fn ariadne_config() -> Config {
    let config = Config::default().with_index_type(IndexType::Byte);
    if std::env::var("NO_COLOR").is_ok() {
        config.with_color(false)
    } else {
        config
    }
}

/// Human-readable rendering of an error against its source text.
pub trait Diagnostic {
    /// Render this error with source context.
    fn render(&self, filename: &str, source: &[u8]) -> String;

    /// Write the error report to a writer.
    fn write_report<W: io::Write>(&self, filename: &str, source: &[u8], writer: W)
    -> io::Result<()>;
}

impl Diagnostic for ParseError {
    fn render(&self, filename: &str, source: &[u8]) -> String {
        let mut output = Vec::new();
        if self.write_report(filename, source, &mut output).is_err() {
            return self.to_string();
        }
        String::from_utf8(output).unwrap_or_else(|_| self.to_string())
    }

    fn write_report<W: io::Write>(
        &self,
        filename: &str,
        source: &[u8],
        writer: W,
    ) -> io::Result<()> {
        let text = String::from_utf8_lossy(source);
        let end = self.span.end.min(text.len());
        let range = self.span.start.min(end)..end;
        build_report(self, filename, range)
            .with_config(ariadne_config())
            .finish()
            .write((filename, Source::from(text.as_ref())), writer)
    }
}

fn build_report<'a>(
    err: &ParseError,
    filename: &'a str,
    range: Range<usize>,
) -> ariadne::ReportBuilder<'static, (&'a str, Range<usize>)> {
    let label = |message: String| {
        Label::new((filename, range.clone()))
            .with_message(message)
            .with_color(Color::Red)
    };
    let report = Report::build(ReportKind::Error, (filename, range.clone()));

    let report = match &err.kind {
        ParseErrorKind::Lexical(kind) => {
            let report = report
                .with_message(format!("{}: {kind}", err.category()))
                .with_label(label("here".to_string()));
            match lexical_help(kind) {
                Some(help) => report.with_help(help),
                None => report,
            }
        }

        ParseErrorKind::UnexpectedToken { found, expected } => {
            let report = report
                .with_message(format!("unexpected {found}"))
                .with_label(label(format!("expected {expected}")));
            let trailing_comma = matches!(
                (found, expected),
                (TokenKind::RBrace, Expected::Key) | (TokenKind::RBracket, Expected::Value)
            );
            if trailing_comma {
                report.with_help("trailing commas are only accepted with allow_trailing_commas")
            } else {
                report
            }
        }

        ParseErrorKind::UnexpectedEof { expected } => report
            .with_message("unexpected end of input")
            .with_label(label(format!("expected {expected} here"))),

        ParseErrorKind::DepthLimitExceeded { limit } => report
            .with_message("nesting too deep")
            .with_label(label(format!("opens level {}", limit + 1)))
            .with_help(format!(
                "documents may nest at most {limit} levels; raise max_depth to allow more"
            )),

        ParseErrorKind::TrailingContent { found } => report
            .with_message("trailing content after top-level value")
            .with_label(label(format!("unexpected {found}")))
            .with_help("enable allow_multiple_values to read a stream of values"),
    };

    match err.path.as_deref() {
        Some(path) if !path.is_empty() => report.with_note(format!("while parsing {path}")),
        _ => report,
    }
}

fn lexical_help(kind: &LexErrorKind) -> Option<&'static str> {
    Some(match kind {
        LexErrorKind::InvalidEscape(_) => {
            "valid escapes are \\\" \\\\ \\/ \\b \\f \\n \\r \\t and \\uXXXX"
        }
        LexErrorKind::ControlCharacter(_) => "control characters must be written as escapes",
        LexErrorKind::UnpairedSurrogate(_) => {
            "characters above U+FFFF are written as a \\uD800-\\uDBFF, \\uDC00-\\uDFFF pair"
        }
        LexErrorKind::InvalidUtf8 => "parse with Utf8Policy::Substitute to replace bad bytes",
        LexErrorKind::InvalidNumber(_) => {
            "numbers have no leading zeros and need digits on both sides of '.'"
        }
        LexErrorKind::UnexpectedByte(b'/') | LexErrorKind::InvalidComment => {
            "comments are only accepted with ignore_comments"
        }
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_parse::{ParseOptions, Parser, Validator};

    fn render(source: &str, options: ParseOptions) -> String {
        let err = Parser::with_options(source.as_bytes(), options)
            .parse(&mut Validator)
            .unwrap_err();
        let rendered = err.render("test.json", source.as_bytes());
        String::from_utf8(strip_ansi_escapes::strip(rendered)).unwrap()
    }

    #[test]
    fn test_missing_value_diagnostic() {
        let out = render("{\"a\":}", ParseOptions::default());
        assert!(out.contains("unexpected '}'"), "{out}");
        assert!(out.contains("expected value"), "{out}");
        assert!(out.contains("test.json"), "{out}");
    }

    #[test]
    fn test_invalid_escape_diagnostic() {
        let out = render(r#"{"name": "hello\qworld"}"#, ParseOptions::default());
        assert!(out.contains("lexical error: invalid escape sequence '\\q'"), "{out}");
        assert!(out.contains("valid escapes are"), "{out}");
    }

    #[test]
    fn test_trailing_comma_help() {
        let out = render("[1, 2,]", ParseOptions::default());
        assert!(out.contains("allow_trailing_commas"), "{out}");
    }

    #[test]
    fn test_path_note() {
        let out = render(
            "{\"servers\": [{\"port\": 80,}]}",
            ParseOptions::new().track_path(true),
        );
        assert!(out.contains("while parsing /servers/0/port"), "{out}");
    }

    #[test]
    fn test_eof_diagnostic() {
        let out = render("[1,\n 2", ParseOptions::default());
        assert!(out.contains("unexpected end of input"), "{out}");
    }

    #[test]
    fn test_depth_diagnostic() {
        let out = render("[[[]]]", ParseOptions::new().max_depth(2));
        assert!(out.contains("nesting too deep"), "{out}");
        assert!(out.contains("at most 2 levels"), "{out}");
    }
}
