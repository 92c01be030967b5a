//! vCard line folding.

/// Folds a content line so that no physical line exceeds `max_octets`.
///
/// Continuation lines start with a single space, which counts toward their
/// length. Folds only at UTF-8 character boundaries. A width below 2 leaves
/// the line untouched.
#[must_use]
pub fn fold_line(line: &str, max_octets: usize) -> String {
    if max_octets < 2 || line.len() <= max_octets {
        return line.to_string();
    }

    let mut result = String::with_capacity(line.len() + line.len() / max_octets * 3);
    let mut current_len = 0;

    for c in line.chars() {
        let char_len = c.len_utf8();

        if current_len + char_len > max_octets && current_len > 1 {
            result.push_str("\r\n ");
            current_len = 1; // The space
        }

        result.push(c);
        current_len += char_len;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_line_unchanged() {
        let line = "FN:John Doe";
        assert_eq!(fold_line(line, 75), line);
    }

    #[test]
    fn fold_at_75_octets() {
        let line = "X".repeat(80);
        let folded = fold_line(&line, 75);

        let mut parts = folded.split("\r\n");
        assert_eq!(parts.next().map(str::len), Some(75));
        assert_eq!(parts.next(), Some(" XXXXX"));
    }

    #[test]
    fn fold_respects_utf8() {
        // 日 is 3 bytes in UTF-8
        let line = format!("NOTE:{}", "日".repeat(30));
        let folded = fold_line(&line, 75);

        for part in folded.split("\r\n") {
            assert!(part.len() <= 75);
            assert!(part.is_char_boundary(part.len()));
        }
        assert_eq!(folded.replace("\r\n ", ""), line);
    }

    #[test]
    fn narrow_width() {
        let folded = fold_line("ABCDEFGHIJ", 4);
        assert_eq!(folded, "ABCD\r\n EFG\r\n HIJ");
        assert_eq!(fold_line("ABCDEFGHIJ", 0), "ABCDEFGHIJ");
    }
}
