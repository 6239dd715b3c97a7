//! Query clause extractor
//!
//! Splits a single SELECT-FROM-WHERE statement into its clause lists. The
//! input is the substring of the run's text starting at the first SELECT
//! keyword, as located by the schema extractor.
//!
//! FROM-list aliases are parsed but discarded: the first whitespace token
//! of each FROM item is the base relation name, and predicates must
//! reference attributes the relation itself declares for binding to
//! succeed. FROM-list order is preserved exactly as written; the relation
//! assigner depends on it.
//!
//! # Example
//!
//! ```rust
//! use relopt::query::QueryExtractor;
//!
//! let extractor = QueryExtractor::new();
//! let query = extractor.extract("SELECT NAME FROM EMPLOYEE E WHERE E.ID = 5")?;
//! assert_eq!(query.from_list, vec!["EMPLOYEE"]);
//! # Ok::<(), relopt::OptimizeError>(())
//! ```

use crate::error::{OptimizeError, Result};
use crate::types::Predicate;
use crate::utils::Helpers;
use serde::{Deserialize, Serialize};

/// Extracted query
///
/// Immutable after extraction except for `predicates`, which the rule
/// pipeline fills in during decomposition and reorders in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    /// Restated query text (trailing `;` already stripped)
    pub text: String,

    /// Output-column expressions, verbatim and in written order
    pub select_list: Vec<String>,

    /// Base relation names in written order, alias tokens discarded
    pub from_list: Vec<String>,

    /// WHERE clause text, absent when the query has no WHERE keyword
    pub where_text: Option<String>,

    /// Atomic predicates, empty until decomposition runs
    pub predicates: Vec<Predicate>,
}

/// Query clause extractor
#[derive(Debug, Default)]
pub struct QueryExtractor;

impl QueryExtractor {
    /// Create a new query extractor
    pub fn new() -> Self {
        Self
    }

    /// Split query text into SELECT-list, FROM-list, and WHERE-text
    ///
    /// # Arguments
    /// * `query_text` - Statement text beginning with the SELECT keyword
    ///
    /// # Returns
    /// `Ok(Query)`, or `Err(MalformedQuery)` when no FROM clause exists
    pub fn extract(&self, query_text: &str) -> Result<Query> {
        let text = query_text.trim();

        let from_idx = find_word(text, "FROM").ok_or_else(|| {
            OptimizeError::MalformedQuery("SELECT without FROM clause".to_string())
        })?;
        let after_from = from_idx + "FROM".len();
        let where_idx = find_word(&text[after_from..], "WHERE").map(|i| after_from + i);

        let select_text = text
            .get("SELECT".len()..from_idx)
            .unwrap_or_default()
            .trim();
        let select_list = Helpers::split_top_level(select_text, ',');

        let from_end = where_idx.unwrap_or(text.len());
        let from_text = text[after_from..from_end].trim();
        let from_list = Helpers::split_top_level(from_text, ',')
            .iter()
            .filter_map(|item| item.split_whitespace().next())
            .map(|name| name.to_uppercase())
            .collect();

        let where_text = where_idx
            .map(|idx| text[idx + "WHERE".len()..].trim())
            .filter(|clause| !clause.is_empty())
            .map(|clause| clause.to_string());

        Ok(Query {
            text: text.to_string(),
            select_list,
            from_list,
            where_text,
            predicates: Vec::new(),
        })
    }
}

/// Find the first case-insensitive occurrence of `word` bounded by
/// non-identifier characters on both sides
fn find_word(text: &str, word: &str) -> Option<usize> {
    let mut search = 0;
    while let Some(found) = Helpers::find_ci(&text[search..], word) {
        let start = search + found;
        let end = start + word.len();
        let bounded_left = start == 0 || !is_ident_byte(text.as_bytes()[start - 1]);
        let bounded_right = end == text.len() || !is_ident_byte(text.as_bytes()[end]);
        if bounded_left && bounded_right {
            return Some(start);
        }
        search = start + 1;
    }
    None
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}
