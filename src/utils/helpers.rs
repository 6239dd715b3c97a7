//! Helper functions
//!
//! Text utilities shared by the extraction and decomposition stages. The
//! input format is plain declarative text, so everything here works on
//! byte offsets of ASCII keywords and stays allocation-light.
//!
//! # Example
//!
//! ```rust
//! use relopt::utils::Helpers;
//!
//! let items = Helpers::split_top_level("ID, NAME, PRIMARY KEY(A, B)", ',');
//! assert_eq!(items, vec!["ID", "NAME", "PRIMARY KEY(A, B)"]);
//! ```

/// Helper functions
///
/// Provides text utilities used by the extractors.
pub struct Helpers;

impl Helpers {
    /// Find the first case-insensitive occurrence of `needle` in `haystack`
    ///
    /// # Returns
    /// Byte offset of the match, or `None`
    pub fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
        if needle.is_empty() {
            return Some(0);
        }
        let h = haystack.as_bytes();
        let n = needle.as_bytes();
        if n.len() > h.len() {
            return None;
        }
        (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
    }

    /// Split `text` on a separator occurring at parenthesis depth zero
    ///
    /// Items are trimmed; empty items are dropped. A separator inside a
    /// parenthesized group (e.g. `PRIMARY KEY(A, B)`) does not split.
    pub fn split_top_level(text: &str, separator: char) -> Vec<String> {
        let mut items = Vec::new();
        let mut current = String::new();
        let mut depth: usize = 0;

        for ch in text.chars() {
            match ch {
                '(' => {
                    depth += 1;
                    current.push(ch);
                }
                ')' => {
                    depth = depth.saturating_sub(1);
                    current.push(ch);
                }
                c if c == separator && depth == 0 => {
                    let item = current.trim();
                    if !item.is_empty() {
                        items.push(item.to_string());
                    }
                    current.clear();
                }
                c => current.push(c),
            }
        }

        let item = current.trim();
        if !item.is_empty() {
            items.push(item.to_string());
        }
        items
    }

    /// Split a conjunctive clause on whitespace-bounded, case-insensitive `AND`
    ///
    /// The separator is the literal word AND with whitespace on both sides;
    /// OR connectives and parenthesized groups are left intact inside the
    /// resulting conjuncts. Conjuncts are trimmed and empty ones dropped.
    pub fn split_conjuncts(text: &str) -> Vec<&str> {
        let bytes = text.as_bytes();
        let mut parts = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i + 3 <= bytes.len() {
            let bounded_left = i > 0 && bytes[i - 1].is_ascii_whitespace();
            let bounded_right = i + 3 < bytes.len() && bytes[i + 3].is_ascii_whitespace();
            if bounded_left && bounded_right && bytes[i..i + 3].eq_ignore_ascii_case(b"AND") {
                parts.push(text[start..i].trim());
                i += 4;
                start = i;
            } else {
                i += 1;
            }
        }
        parts.push(text[start..].trim());

        parts.into_iter().filter(|p| !p.is_empty()).collect()
    }

    /// Strip one layer of matching surrounding quotes
    ///
    /// Both `'...'` and `"..."` are recognized; anything else is returned
    /// unchanged.
    pub fn strip_outer_quotes(text: &str) -> &str {
        let bytes = text.as_bytes();
        if bytes.len() >= 2 {
            let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
            if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
                return &text[1..text.len() - 1];
            }
        }
        text
    }

    /// Drop `--` comment lines and join the remainder into one line
    ///
    /// Lines are trimmed first; blank lines and comment lines disappear,
    /// everything else is joined with single spaces. Callers run this
    /// before handing input text to the extraction stages.
    pub fn strip_comments(input: &str) -> String {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("--"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_ci() {
        assert_eq!(Helpers::find_ci("select * from t", "SELECT"), Some(0));
        assert_eq!(Helpers::find_ci("a SeLeCt b", "SELECT"), Some(2));
        assert_eq!(Helpers::find_ci("nothing here", "SELECT"), None);
        assert_eq!(Helpers::find_ci("short", "longer needle"), None);
    }

    #[test]
    fn test_split_top_level_respects_parens() {
        let items = Helpers::split_top_level("ID, NAME, PRIMARY KEY(A, B), UNIQUE(C)", ',');
        assert_eq!(items, vec!["ID", "NAME", "PRIMARY KEY(A, B)", "UNIQUE(C)"]);
    }

    #[test]
    fn test_split_top_level_drops_empty_items() {
        let items = Helpers::split_top_level("A, , B,", ',');
        assert_eq!(items, vec!["A", "B"]);
    }

    #[test]
    fn test_split_conjuncts() {
        let parts = Helpers::split_conjuncts("E.ID = 5 AND E.NAME = 'Bob' and D.LOC = 'NY'");
        assert_eq!(parts, vec!["E.ID = 5", "E.NAME = 'Bob'", "D.LOC = 'NY'"]);
    }

    #[test]
    fn test_split_conjuncts_requires_word_boundaries() {
        // ANDREW must not be treated as a separator
        let parts = Helpers::split_conjuncts("E.NAME = ANDREW");
        assert_eq!(parts, vec!["E.NAME = ANDREW"]);

        let parts = Helpers::split_conjuncts("E.BRAND = 1 AND E.ID = 2");
        assert_eq!(parts, vec!["E.BRAND = 1", "E.ID = 2"]);
    }

    #[test]
    fn test_strip_outer_quotes() {
        assert_eq!(Helpers::strip_outer_quotes("'Bob'"), "Bob");
        assert_eq!(Helpers::strip_outer_quotes("\"Bob\""), "Bob");
        assert_eq!(Helpers::strip_outer_quotes("'Bob\""), "'Bob\"");
        assert_eq!(Helpers::strip_outer_quotes("Bob"), "Bob");
        assert_eq!(Helpers::strip_outer_quotes("''"), "");
        assert_eq!(Helpers::strip_outer_quotes("'"), "'");
    }

    #[test]
    fn test_strip_comments() {
        let input = "-- schema\nEMPLOYEE(ID, NAME);\n\n-- query\nSELECT NAME\nFROM EMPLOYEE;";
        assert_eq!(
            Helpers::strip_comments(input),
            "EMPLOYEE(ID, NAME); SELECT NAME FROM EMPLOYEE;"
        );
    }
}
