//! Scalar text: string escaping and number formatting.

use std::borrow::Cow;
use std::fmt::Write as _;

fn needs_escape(c: char, ensure_ascii: bool) -> bool {
    matches!(c, '"' | '\\') || c < '\u{20}' || (ensure_ascii && !c.is_ascii())
}

/// Escape a string for quoted output.
///
/// Returns the escaped content (without surrounding quotes). With
/// `ensure_ascii`, characters outside ASCII become `\uXXXX` escapes, using
/// a surrogate pair above U+FFFF.
pub fn escape_str(s: &str, ensure_ascii: bool) -> Cow<'_, str> {
    if !s.chars().any(|c| needs_escape(c, ensure_ascii)) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\u{08}' => result.push_str("\\b"),
            '\u{0C}' => result.push_str("\\f"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if needs_escape(c, ensure_ascii) => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(result, "\\u{unit:04x}");
                }
            }
            c => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Format a float as JSON number text.
///
/// Without a precision this is the shortest text that reads back to the
/// identical `f64`. The text always holds a `.` or an exponent, so it reads
/// back as a float rather than an integer. Infinities and NaN have no JSON
/// form and are written as `null`.
pub fn format_float(value: f64, precision: Option<usize>) -> String {
    if !value.is_finite() {
        return "null".to_string();
    }
    match precision {
        None => format!("{value:?}"),
        Some(digits) => format!("{:.*e}", digits.saturating_sub(1), value),
    }
}
