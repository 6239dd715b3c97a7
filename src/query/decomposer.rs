//! Predicate decomposer (cascade of selections)
//!
//! Splits a conjunctive WHERE clause into atomic comparison predicates.
//! Each conjunct must have the shape `qualifier.attribute <op> value`;
//! anything else (OR connectives, BETWEEN/IN forms, unqualified
//! attribute-to-attribute comparisons) is dropped from the selection list
//! with a diagnostic. The tool stays usable against imperfect demo input,
//! so a dropped conjunct is never a hard failure.
//!
//! While the right-hand side still carries its quotes it is checked for an
//! unquoted dotted reference; the qualifier of such a reference feeds join
//! detection later in the pipeline.

use crate::types::{ComparisonOp, Diagnostic, Predicate};
use crate::utils::Helpers;

/// Predicate decomposer
#[derive(Debug, Default)]
pub struct PredicateDecomposer;

impl PredicateDecomposer {
    /// Create a new decomposer
    pub fn new() -> Self {
        Self
    }

    /// Decompose WHERE text into atomic predicates
    ///
    /// # Arguments
    /// * `where_text` - Conjunctive clause text
    ///
    /// # Returns
    /// Predicates in textual order, plus one diagnostic per dropped
    /// conjunct
    pub fn decompose(&self, where_text: &str) -> (Vec<Predicate>, Vec<Diagnostic>) {
        let mut predicates = Vec::new();
        let mut diagnostics = Vec::new();

        for conjunct in Helpers::split_conjuncts(where_text) {
            match parse_conjunct(conjunct) {
                Some(predicate) => predicates.push(predicate),
                None => {
                    log::warn!("dropping unmatched WHERE conjunct: {}", conjunct);
                    diagnostics.push(Diagnostic::UnmatchedConjunct {
                        text: conjunct.to_string(),
                    });
                }
            }
        }

        (predicates, diagnostics)
    }
}

/// Parse one conjunct of the shape `qualifier.attribute <op> value`
fn parse_conjunct(text: &str) -> Option<Predicate> {
    let (qualifier, rest) = take_identifier(text)?;
    let rest = rest.strip_prefix('.')?;
    let (attribute, rest) = take_identifier(rest)?;

    let (operator, rest) = ComparisonOp::parse_prefix(rest.trim_start())?;

    let raw_value = rest.trim();
    if raw_value.is_empty() {
        return None;
    }

    Some(Predicate {
        condition: text.to_string(),
        qualifier: qualifier.to_uppercase(),
        attribute: attribute.to_uppercase(),
        operator,
        value: Helpers::strip_outer_quotes(raw_value).to_string(),
        value_qualifier: dotted_qualifier(raw_value),
        relation: None,
    })
}

/// Qualifier of a value that is exactly an unquoted `qualifier.attribute`
/// reference, uppercased
fn dotted_qualifier(value: &str) -> Option<String> {
    let (qualifier, rest) = take_identifier(value)?;
    let rest = rest.strip_prefix('.')?;
    let (_, rest) = take_identifier(rest)?;
    if !rest.is_empty() {
        return None;
    }
    Some(qualifier.to_uppercase())
}

/// Take a leading `\w+` identifier off `text`
fn take_identifier(text: &str) -> Option<(&str, &str)> {
    let end = text
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphanumeric() && *c != '_')
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    Some((&text[..end], &text[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn decompose(text: &str) -> (Vec<Predicate>, Vec<Diagnostic>) {
        PredicateDecomposer::new().decompose(text)
    }

    #[test]
    fn test_decompose_two_conjuncts() {
        let (predicates, diagnostics) = decompose("A.X = 1 AND B.Y > 2");
        assert!(diagnostics.is_empty());
        assert_eq!(predicates.len(), 2);

        assert_eq!(predicates[0].condition, "A.X = 1");
        assert_eq!(predicates[0].qualifier, "A");
        assert_eq!(predicates[0].attribute, "X");
        assert_eq!(predicates[0].operator, ComparisonOp::Eq);
        assert_eq!(predicates[0].value, "1");

        assert_eq!(predicates[1].attribute, "Y");
        assert_eq!(predicates[1].operator, ComparisonOp::Gt);
        assert_eq!(predicates[1].value, "2");
    }

    #[test]
    fn test_quotes_stripped_from_value() {
        let (predicates, _) = decompose("E.NAME = 'Bob'");
        assert_eq!(predicates[0].value, "Bob");

        let (predicates, _) = decompose("E.NAME = \"Bob\"");
        assert_eq!(predicates[0].value, "Bob");
    }

    #[test]
    fn test_longest_operator_wins() {
        let (predicates, _) = decompose("E.AGE <= 30");
        assert_eq!(predicates[0].operator, ComparisonOp::LtEq);
        assert_eq!(predicates[0].value, "30");

        let (predicates, _) = decompose("E.AGE <> 30");
        assert_eq!(predicates[0].operator, ComparisonOp::NotEq);
    }

    #[test]
    fn test_join_reference_recorded() {
        let (predicates, _) = decompose("E.DEPT_ID = D.ID");
        assert_eq!(predicates[0].value, "D.ID");
        assert_eq!(predicates[0].value_qualifier.as_deref(), Some("D"));
        assert!(predicates[0].is_join_condition());
    }

    #[test]
    fn test_quoted_dotted_value_is_a_literal() {
        let (predicates, _) = decompose("E.NOTE = 'D.ID'");
        assert_eq!(predicates[0].value, "D.ID");
        assert!(predicates[0].value_qualifier.is_none());
        assert!(!predicates[0].is_join_condition());
    }

    #[test]
    fn test_between_conjunct_dropped() {
        let (predicates, diagnostics) = decompose("X BETWEEN 1 AND 2");
        // " AND " splits the BETWEEN form in two; neither half matches
        assert!(predicates.is_empty());
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_unqualified_conjunct_dropped() {
        let (predicates, diagnostics) = decompose("ID = 5 AND E.NAME = 'Bob'");
        assert_eq!(predicates.len(), 1);
        assert_eq!(predicates[0].attribute, "NAME");
        assert_eq!(
            diagnostics,
            vec![Diagnostic::UnmatchedConjunct {
                text: "ID = 5".to_string()
            }]
        );
    }

    #[test]
    fn test_order_preserved() {
        let (predicates, _) = decompose("B.Y > 2 AND A.X = 1 AND C.Z < 9");
        let conditions: Vec<&str> = predicates.iter().map(|p| p.condition.as_str()).collect();
        assert_eq!(conditions, vec!["B.Y > 2", "A.X = 1", "C.Z < 9"]);
    }

    proptest! {
        #[test]
        fn prop_decompose_never_panics(text in ".{0,120}") {
            let _ = decompose(&text);
        }

        #[test]
        fn prop_conditions_are_input_fragments(text in "[A-Za-z0-9_.<>=!' ]{0,80}") {
            let (predicates, _) = decompose(&text);
            for predicate in predicates {
                prop_assert!(text.contains(&predicate.condition));
            }
        }
    }
}
