//! Text value splitting and unescaping.

/// Unescapes a text value.
///
/// vCard escapes: \n, \N (newline), \, (comma), \; (semicolon), \\ (backslash).
/// Any other backslash is kept as-is.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some('n' | 'N') => {
                chars.next();
                result.push('\n');
            }
            Some(&next @ (',' | ';' | '\\')) => {
                chars.next();
                result.push(next);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Splits a structured value on unescaped semicolons.
///
/// Components are returned still escaped.
#[must_use]
pub fn split_structured(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            ';' => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    parts.push(&s[start..]);
    parts
}

/// Splits a list value on unescaped commas and unescapes each entry.
///
/// An empty input yields an empty list.
#[must_use]
pub fn split_component(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('n' | 'N') => {
                    chars.next();
                    current.push('\n');
                }
                Some(&next @ (',' | ';' | '\\')) => {
                    chars.next();
                    current.push(next);
                }
                _ => current.push(c),
            }
        } else if c == ',' {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }

    parts.push(current);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_sequences() {
        assert_eq!(unescape_text("a\\,b\\;c\\\\d\\ne\\Nf"), "a,b;c\\d\ne\nf");
        assert_eq!(unescape_text("C:\\temp"), "C:\\temp");
    }

    #[test]
    fn split_structured_respects_escapes() {
        assert_eq!(split_structured("a;b\\;c;;d"), vec!["a", "b\\;c", "", "d"]);
        assert_eq!(split_structured("a\\\\;b"), vec!["a\\\\", "b"]);
        assert_eq!(split_structured(""), vec![""]);
    }

    #[test]
    fn split_component_unescapes() {
        assert_eq!(split_component("a,b\\,c,,d"), vec!["a", "b,c", "", "d"]);
        assert!(split_component("").is_empty());
    }
}
