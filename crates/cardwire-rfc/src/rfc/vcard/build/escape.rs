//! vCard text escaping.

use crate::rfc::vcard::core::VCardVersion;

/// Escapes a text value for the text encoding.
///
/// Escapes backslash, newline, comma, and semicolon.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\r' => {} // Skip CR (use \n for newlines)
            _ => result.push(c),
        }
    }

    result
}

/// Escapes one entry of a list or structured value.
///
/// Only the delimiters and the escape character are touched; newlines are
/// left for the text grammar.
#[must_use]
pub fn escape_list_item(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            _ => result.push(c),
        }
    }

    result
}

/// Escapes a parameter value for the given version.
///
/// vCard 4.0 uses RFC 6868 caret encoding; older versions cannot represent
/// double quotes or newlines, which are replaced with a single quote and a
/// space. The value is quoted when it contains a delimiter.
#[must_use]
pub fn escape_param_value(s: &str, version: VCardVersion) -> String {
    let mut result = String::with_capacity(s.len());
    let mut needs_quotes = false;

    for c in s.chars() {
        match c {
            '^' if version == VCardVersion::V4_0 => result.push_str("^^"),
            '\n' if version == VCardVersion::V4_0 => result.push_str("^n"),
            '"' if version == VCardVersion::V4_0 => result.push_str("^'"),
            '\n' => result.push(' '),
            '"' => result.push('\''),
            ':' | ';' | ',' => {
                result.push(c);
                needs_quotes = true;
            }
            '\r' => {}
            _ if c.is_control() => {}
            _ => result.push(c),
        }
    }

    if needs_quotes {
        format!("\"{result}\"")
    } else {
        result
    }
}
