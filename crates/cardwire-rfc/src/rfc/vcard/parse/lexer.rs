//! Content line lexer.
//!
//! vCard uses the same folding/unfolding rules as iCalendar (RFC 5545 §3.1).

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::vcard::core::{VCardParameters, parameter_names};

/// `ENCODING` values that vCard 2.1 allows without a parameter name.
const BARE_ENCODINGS: [&str; 4] = ["QUOTED-PRINTABLE", "BASE64", "8BIT", "7BIT"];

/// Unfolds text by removing line continuations.
///
/// Line continuations are CRLF followed by a single space or tab.
/// Also handles bare LF for lenient parsing.
#[must_use]
pub fn unfold(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
                // Check for continuation (space or tab)
                if matches!(chars.peek(), Some(' ' | '\t')) {
                    chars.next(); // Skip the whitespace, continue line
                } else {
                    result.push('\n'); // End of logical line
                }
            } else {
                result.push(c);
            }
        } else if c == '\n' {
            // Bare LF (lenient)
            if matches!(chars.peek(), Some(' ' | '\t')) {
                chars.next();
            } else {
                result.push('\n');
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// A parsed content line before value interpretation.
#[derive(Debug, Clone)]
pub struct ContentLine {
    /// Property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name (uppercase).
    pub name: String,
    pub parameters: VCardParameters,
    /// Raw value string, still escaped.
    pub value: String,
}

/// Parses a single unfolded content line into its components.
///
/// Format: `[group.]name[;param=value]*:value`. A parameter without a name
/// (vCard 2.1) is read as `ENCODING` when it is a known encoding and as
/// `TYPE` otherwise.
///
/// ## Errors
/// Returns an error if the line is malformed or missing the colon separator.
pub fn parse_content_line(line: &str) -> ParseResult<ContentLine> {
    // Find the colon separating name/params from value
    let colon_pos = find_value_separator(line).ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            "missing colon separator",
        )
    })?;

    let (name_params, value) = line.split_at(colon_pos);
    let value = &value[1..]; // Skip the colon

    let (group, name_params) = parse_group(name_params);

    let (name, params_str) = match name_params.split_once(';') {
        Some((name, params)) => (name, Some(params)),
        None => (name_params, None),
    };

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            format!("invalid property name: {name}"),
        ));
    }

    let parameters = match params_str {
        Some(params_str) => parse_parameters(params_str)?,
        None => VCardParameters::new(),
    };

    Ok(ContentLine {
        group: group.map(String::from),
        name: name.to_ascii_uppercase(),
        parameters,
        value: value.trim_end_matches(['\r', '\n']).to_string(),
    })
}

/// Finds the colon that separates name/params from value.
///
/// Must handle quoted parameter values that may contain colons.
fn find_value_separator(line: &str) -> Option<usize> {
    let mut in_quotes = false;

    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(i),
            _ => {}
        }
    }

    None
}

/// Parses optional group prefix.
fn parse_group(s: &str) -> (Option<&str>, &str) {
    let head = s.split(';').next().unwrap_or(s);
    if let Some((potential_group, _)) = head.split_once('.') {
        // Group must be alphanumeric + hyphen
        if !potential_group.is_empty()
            && potential_group
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return (Some(potential_group), &s[potential_group.len() + 1..]);
        }
    }
    (None, s)
}

fn parse_parameters(s: &str) -> ParseResult<VCardParameters> {
    let mut params = VCardParameters::new();
    let mut remaining = s;

    while !remaining.is_empty() {
        remaining = parse_single_parameter(remaining, &mut params)?;
    }

    Ok(params)
}

/// Parses a single parameter and returns the remaining string.
fn parse_single_parameter<'a>(s: &'a str, params: &mut VCardParameters) -> ParseResult<&'a str> {
    let end = s.find([';', '=']).unwrap_or(s.len());

    if s[end..].starts_with('=') {
        let name = s[..end].trim();
        if name.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::InvalidParameter,
                "parameter has no name",
            ));
        }
        let (values, remaining) = parse_param_values(&s[end + 1..]);
        if values.is_empty() {
            params.put(name, "");
        } else {
            params.put_all(name, values);
        }
        return Ok(remaining);
    }

    // vCard 2.1 bare parameter
    let value = s[..end].trim();
    if !value.is_empty() {
        let name = if BARE_ENCODINGS
            .iter()
            .any(|e| e.eq_ignore_ascii_case(value))
        {
            parameter_names::ENCODING
        } else {
            parameter_names::TYPE
        };
        params.put(name, value);
    }
    Ok(s.get(end + 1..).unwrap_or_default())
}

/// Parses parameter values (comma-separated, possibly quoted).
fn parse_param_values(s: &str) -> (Vec<String>, &str) {
    let mut values = Vec::new();
    let mut chars = s.chars().peekable();
    let mut current_value = String::new();
    let mut in_quotes = false;
    let mut consumed = 0;

    while let Some(&c) = chars.peek() {
        consumed += c.len_utf8();

        match c {
            '"' => {
                chars.next();
                in_quotes = !in_quotes;
            }
            ',' if !in_quotes => {
                chars.next();
                values.push(std::mem::take(&mut current_value));
            }
            ';' if !in_quotes => {
                // Next parameter
                if !current_value.is_empty() || !values.is_empty() {
                    values.push(current_value);
                }
                return (values, &s[consumed..]);
            }
            '^' => {
                // RFC 6868 caret encoding
                chars.next();
                if let Some(&next) = chars.peek() {
                    consumed += next.len_utf8();
                    chars.next();
                    match next {
                        'n' => current_value.push('\n'),
                        '\'' => current_value.push('"'),
                        '^' => current_value.push('^'),
                        _ => {
                            current_value.push('^');
                            current_value.push(next);
                        }
                    }
                } else {
                    current_value.push('^');
                }
            }
            _ => {
                chars.next();
                current_value.push(c);
            }
        }
    }

    // End of string
    if !current_value.is_empty() || !values.is_empty() {
        values.push(current_value);
    }

    (values, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfold_crlf() {
        let input = "FN:John\r\n Doe";
        assert_eq!(unfold(input), "FN:JohnDoe");
    }

    #[test]
    fn unfold_bare_lf() {
        let input = "FN:John\n Doe\nNOTE:x";
        assert_eq!(unfold(input), "FN:JohnDoe\nNOTE:x");
    }

    #[test]
    fn unfold_tab() {
        let input = "FN:John\r\n\tDoe";
        assert_eq!(unfold(input), "FN:JohnDoe");
    }

    #[test]
    fn parse_simple_line() {
        let line = parse_content_line("FN:John Doe").unwrap();
        assert!(line.group.is_none());
        assert_eq!(line.name, "FN");
        assert!(line.parameters.is_empty());
        assert_eq!(line.value, "John Doe");
    }

    #[test]
    fn parse_grouped_line() {
        let line = parse_content_line("item1.TEL:+1-555-555-5555").unwrap();
        assert_eq!(line.group.as_deref(), Some("item1"));
        assert_eq!(line.name, "TEL");
    }

    #[test]
    fn parse_with_parameters() {
        let line = parse_content_line("tel;type=home,voice;PREF=1:+1-555-555-5555").unwrap();
        assert_eq!(line.name, "TEL");
        assert_eq!(line.parameters.get("TYPE"), ["home", "voice"]);
        assert_eq!(line.parameters.first("pref"), Some("1"));
    }

    #[test]
    fn parse_quoted_param_with_delimiters() {
        let line = parse_content_line("N;SORT-AS=\"Doe,Jane\";X-A=\"a:b;c\":Doe;Jane").unwrap();
        assert_eq!(line.parameters.get("SORT-AS"), ["Doe,Jane"]);
        assert_eq!(line.parameters.first("X-A"), Some("a:b;c"));
        assert_eq!(line.value, "Doe;Jane");
    }

    #[test]
    fn parse_caret_encoding() {
        let line = parse_content_line("NOTE;X-LABEL=\"a^nb^'c^^\":v").unwrap();
        assert_eq!(line.parameters.first("X-LABEL"), Some("a\nb\"c^"));
    }

    #[test]
    fn parse_bare_v21_parameters() {
        let line = parse_content_line("TEL;HOME;VOICE;QUOTED-PRINTABLE:555").unwrap();
        assert_eq!(line.parameters.get("TYPE"), ["HOME", "VOICE"]);
        assert_eq!(line.parameters.encoding(), Some("QUOTED-PRINTABLE"));
    }

    #[test]
    fn parse_colon_in_value() {
        let line = parse_content_line("URL:https://example.com:8080/path").unwrap();
        assert_eq!(line.value, "https://example.com:8080/path");
    }

    #[test]
    fn dot_in_parameter_is_not_a_group() {
        let line = parse_content_line("NOTE;X-V=1.0:x").unwrap();
        assert!(line.group.is_none());
        assert_eq!(line.parameters.first("X-V"), Some("1.0"));
    }

    #[test]
    fn missing_colon_is_an_error() {
        let err = parse_content_line("FN John").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidPropertyName);
    }
}
