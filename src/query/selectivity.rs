//! Selectivity classifier (smallest selectivity first)
//!
//! Scores each bound predicate by estimated restrictiveness using schema
//! key metadata. Lower score = more selective = applied earlier:
//!
//! 1. equality on a primary-key attribute
//! 2. range/inequality on a primary-key attribute
//! 3. equality on a unique-key attribute
//! 4. range/inequality on a unique-key attribute
//! 5. equality on a non-key attribute
//! 6. range comparison on a non-key attribute
//! 7. not-equal on a non-key attribute
//! 8. unbound predicate or any unclassified case
//!
//! Reordering is a stable sort by ascending score, so equal-score
//! predicates keep their decomposition order and the trace stays
//! reproducible.

use crate::schema::Schema;
use crate::types::Predicate;

/// Score given to predicates with no resolved relation.
pub const SCORE_UNKNOWN: u8 = 8;

/// Selectivity classifier
#[derive(Debug, Default)]
pub struct SelectivityClassifier;

impl SelectivityClassifier {
    /// Create a new selectivity classifier
    pub fn new() -> Self {
        Self
    }

    /// Score a predicate; lower means more selective
    pub fn score(&self, predicate: &Predicate, schema: &Schema) -> u8 {
        let relation = predicate
            .relation
            .as_deref()
            .and_then(|name| schema.get_relation(name));
        let Some(relation) = relation else {
            return SCORE_UNKNOWN;
        };

        if relation.is_primary_key(&predicate.attribute) {
            return if predicate.operator.is_equality() { 1 } else { 2 };
        }
        if relation.is_unique_key(&predicate.attribute) {
            return if predicate.operator.is_equality() { 3 } else { 4 };
        }

        if predicate.operator.is_equality() {
            5
        } else if predicate.operator.is_range() {
            6
        } else {
            7
        }
    }
}
