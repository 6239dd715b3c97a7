//! Schema declaration extractor
//!
//! Turns the schema region of the raw input into [`Schema`] entries and
//! locates the query text. A relation is declared as a top-level
//! `name ( ... )` grouping occurring before the first SELECT keyword; the
//! parenthesized body holds comma-separated attribute declarations plus
//! optional `PRIMARY KEY ( ... )` and `UNIQUE ( ... )` groups.
//!
//! Extraction is best-effort: an empty body degrades to an empty relation
//! with a diagnostic rather than failing the run. The hard failures are a
//! missing SELECT (nothing to optimize) and a structurally broken key
//! group.

use crate::error::{OptimizeError, Result};
use crate::schema::Schema;
use crate::types::{Diagnostic, Relation};
use crate::utils::Helpers;

/// Grouping names that can never declare a relation.
const RESERVED: [&str; 5] = ["PRIMARY", "UNIQUE", "SELECT", "FROM", "WHERE"];

/// Result of schema extraction
///
/// Carries the schema, the query text starting at the first SELECT (with a
/// trailing `;` stripped), and any lenient-parse diagnostics.
#[derive(Debug, Clone)]
pub struct SchemaExtraction {
    /// Extracted relation definitions
    pub schema: Schema,

    /// Query statement text, from the first SELECT keyword onward
    pub query_text: String,

    /// Non-fatal degradations recorded while scanning
    pub diagnostics: Vec<Diagnostic>,
}

/// Schema declaration extractor
#[derive(Debug, Default)]
pub struct SchemaExtractor;

impl SchemaExtractor {
    /// Create a new schema extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract the schema and the query text from preprocessed input
    ///
    /// # Arguments
    /// * `input` - Raw schema and query text, comment lines already removed
    ///
    /// # Returns
    /// `Ok(SchemaExtraction)`, or `Err` when no SELECT keyword exists or a
    /// key group is structurally broken
    pub fn extract(&self, input: &str) -> Result<SchemaExtraction> {
        let select_idx = Helpers::find_ci(input, "SELECT").ok_or(OptimizeError::QueryMissing)?;

        let mut schema = Schema::new();
        let mut diagnostics = Vec::new();
        let mut pos = 0;

        while let Some((name_start, name_end)) = next_identifier(input, pos) {
            if name_start >= select_idx {
                break;
            }

            let open = skip_whitespace(input, name_end);
            if !input[open..].starts_with('(') {
                pos = name_end;
                continue;
            }

            let Some(close) = matching_paren(input, open) else {
                // Unterminated body swallows the rest of the input; the
                // schema region ends here and the query side takes over.
                log::debug!(
                    "unterminated grouping at offset {}, ending schema scan",
                    name_start
                );
                break;
            };

            // End-of-schema marker: a grouping that swallowed the query
            if Helpers::find_ci(&input[name_start..=close], "SELECT").is_some() {
                break;
            }

            let name = input[name_start..name_end].to_uppercase();
            if RESERVED.contains(&name.as_str()) {
                pos = close + 1;
                continue;
            }

            let body = &input[open + 1..close];
            let relation = self.parse_relation(&name, body, &mut diagnostics)?;
            log::debug!(
                "registered relation {} ({} attributes)",
                relation.name,
                relation.attributes.len()
            );
            schema.add_relation(relation);
            pos = close + 1;
        }

        let query_text = input[select_idx..].trim();
        let query_text = query_text
            .strip_suffix(';')
            .map(str::trim_end)
            .unwrap_or(query_text)
            .to_string();

        Ok(SchemaExtraction {
            schema,
            query_text,
            diagnostics,
        })
    }

    /// Parse one relation body into attributes and key groups
    fn parse_relation(
        &self,
        name: &str,
        body: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Relation> {
        let (primary_keys, body) = extract_primary_keys(name, body)?;
        let (unique_keys, body) = extract_unique_keys(name, &body)?;

        let attributes: Vec<String> = Helpers::split_top_level(&body, ',')
            .into_iter()
            .map(|a| a.to_uppercase())
            .collect();

        if attributes.is_empty() && primary_keys.is_empty() && unique_keys.is_empty() {
            diagnostics.push(Diagnostic::EmptyRelationBody {
                relation: name.to_string(),
            });
        }

        let mut relation = Relation::new(name.to_string(), attributes);

        // Key names must name declared attributes; unknown names are
        // dropped with a diagnostic.
        let mut keep_known = |key: &String, relation: &Relation| {
            let known = relation.has_attribute(key);
            if !known {
                diagnostics.push(Diagnostic::UnknownKeyAttribute {
                    relation: name.to_string(),
                    attribute: key.clone(),
                });
            }
            known
        };

        let valid_primary: Vec<String> = primary_keys
            .into_iter()
            .filter(|key| keep_known(key, &relation))
            .collect();
        let valid_unique: Vec<Vec<String>> = unique_keys
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .filter(|key| keep_known(key, &relation))
                    .collect::<Vec<_>>()
            })
            .filter(|group: &Vec<String>| !group.is_empty())
            .collect();

        relation.primary_keys = valid_primary;
        relation.unique_keys = valid_unique;
        Ok(relation)
    }
}

/// Extract `PRIMARY KEY ( ... )` groups from a relation body
///
/// The first group provides the key names; every group is removed from the
/// body text. A group that opens but has no usable name list fails the run
/// (structurally broken schema text).
fn extract_primary_keys(relation: &str, body: &str) -> Result<(Vec<String>, String)> {
    let mut text = body.to_string();
    let mut keys: Vec<String> = Vec::new();
    let mut search = 0;

    while let Some(found) = Helpers::find_ci(&text[search..], "PRIMARY") {
        let start = search + found;
        let after = start + "PRIMARY".len();

        // The token must read PRIMARY <ws> KEY <ws?> ( to open a group;
        // anything else is ordinary attribute text.
        let key_idx = skip_whitespace(&text, after);
        let has_key = key_idx > after
            && text.len() >= key_idx + 3
            && text.as_bytes()[key_idx..key_idx + 3].eq_ignore_ascii_case(b"KEY");
        if !has_key {
            search = after;
            continue;
        }

        let open = skip_whitespace(&text, key_idx + 3);
        if !text[open..].starts_with('(') {
            search = key_idx + 3;
            continue;
        }

        let (names, close) = read_key_names(&text, open).ok_or_else(|| {
            OptimizeError::SchemaParse(format!(
                "relation {}: malformed PRIMARY KEY group",
                relation
            ))
        })?;

        if keys.is_empty() {
            keys = names;
        } else {
            log::debug!("relation {}: extra PRIMARY KEY group ignored", relation);
        }
        text.replace_range(start..=close, "");
        search = start;
    }

    Ok((keys, text))
}

/// Extract every `UNIQUE ( ... )` group from a relation body, in order
fn extract_unique_keys(relation: &str, body: &str) -> Result<(Vec<Vec<String>>, String)> {
    let mut text = body.to_string();
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut search = 0;

    while let Some(found) = Helpers::find_ci(&text[search..], "UNIQUE") {
        let start = search + found;
        let after = start + "UNIQUE".len();

        let open = skip_whitespace(&text, after);
        if !text[open..].starts_with('(') {
            search = after;
            continue;
        }

        let (names, close) = read_key_names(&text, open).ok_or_else(|| {
            OptimizeError::SchemaParse(format!("relation {}: malformed UNIQUE group", relation))
        })?;

        groups.push(names);
        text.replace_range(start..=close, "");
        search = start;
    }

    Ok((groups, text))
}

/// Read the comma-separated names of a key group opened at `open`
///
/// Key-name lists never nest, so the group ends at the next `)`. Returns
/// the names with the closing-paren offset, or `None` when the group is
/// unterminated or holds no names.
fn read_key_names(text: &str, open: usize) -> Option<(Vec<String>, usize)> {
    let close = text[open..].find(')').map(|i| open + i)?;
    let names: Vec<String> = text[open + 1..close]
        .split(',')
        .map(|k| k.trim().to_uppercase())
        .filter(|k| !k.is_empty())
        .collect();
    if names.is_empty() {
        return None;
    }
    Some((names, close))
}

/// Find the next `\w+` identifier at or after `from`
///
/// # Returns
/// `Some((start, end))` byte offsets, or `None` when no identifier remains
fn next_identifier(text: &str, from: usize) -> Option<(usize, usize)> {
    let mut start = None;
    for (i, ch) in text[from..].char_indices() {
        let abs = from + i;
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if start.is_none() {
                start = Some(abs);
            }
        } else if let Some(s) = start {
            return Some((s, abs));
        }
    }
    start.map(|s| (s, text.len()))
}

/// Skip whitespace starting at `from`, returning the next offset
fn skip_whitespace(text: &str, from: usize) -> usize {
    text[from..]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}

/// Find the `)` matching the `(` at `open`, honoring nesting
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in text[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}
