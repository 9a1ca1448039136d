//! Shared text rendering utilities.
//!
//! # Example
//!
//! ```rust
//! use sift::ui::helpers::highlight_text;
//!
//! assert_eq!(highlight_text("Svelte", &[(1, 4)]), "S[vel]te");
//! ```

/// Wraps the given character ranges of `text` in square brackets.
///
/// Ranges are `(start, end)` character indices with exclusive ends, sorted and
/// non-overlapping. Out-of-range ends are clamped to the text length.
#[must_use]
pub fn highlight_text(text: &str, ranges: &[(usize, usize)]) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * 2);
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }
        out.extend(&chars[current_pos..start]);
        out.push('[');
        out.extend(&chars[start..end]);
        out.push(']');
        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
    out
}

/// Truncates `text` to `width` characters, ending with "..." when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::{highlight_text, truncate};

    #[test]
    fn highlights_multiple_ranges() {
        assert_eq!(highlight_text("my-project", &[(0, 2), (3, 4)]), "[my]-[p]roject");
    }

    #[test]
    fn no_ranges_is_identity() {
        assert_eq!(highlight_text("plain", &[]), "plain");
    }

    #[test]
    fn clamps_out_of_range_ends() {
        assert_eq!(highlight_text("abc", &[(1, 10)]), "a[bc]");
        assert_eq!(highlight_text("abc", &[(5, 10)]), "abc");
    }

    #[test]
    fn highlight_is_char_based() {
        assert_eq!(highlight_text("ñandú", &[(4, 5)]), "ñand[ú]");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("Senior Rust Engineer", 10), "Senior ...");
        assert_eq!(truncate("Short", 10), "Short");
    }
}
