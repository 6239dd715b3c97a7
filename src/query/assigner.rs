//! Relation assigner (push selections down)
//!
//! Binds each atomic predicate to the base relation owning its attribute.
//! The FROM-list is scanned in written order and the first relation
//! declaring the attribute wins, so relations sharing an attribute name
//! resolve by FROM-list position. Aliases were discarded at extraction;
//! binding is purely by declared attribute membership.

use crate::schema::Schema;
use crate::types::{Diagnostic, Predicate};

/// Relation assigner
#[derive(Debug, Default)]
pub struct RelationAssigner;

impl RelationAssigner {
    /// Create a new relation assigner
    pub fn new() -> Self {
        Self
    }

    /// Bind predicates to the relations owning their attributes
    ///
    /// # Arguments
    /// * `predicates` - Decomposed predicates, bound in place
    /// * `schema` - Declared relations
    /// * `from_list` - FROM-list relation names in written order
    ///
    /// # Returns
    /// One diagnostic per predicate left unbound
    pub fn assign(
        &self,
        predicates: &mut [Predicate],
        schema: &Schema,
        from_list: &[String],
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for predicate in predicates.iter_mut() {
            predicate.relation = from_list
                .iter()
                .filter_map(|name| schema.get_relation(name))
                .find(|relation| relation.has_attribute(&predicate.attribute))
                .map(|relation| relation.name.clone());

            if predicate.relation.is_none() {
                log::warn!(
                    "predicate {} left unbound: no FROM relation declares {}",
                    predicate.condition,
                    predicate.attribute
                );
                diagnostics.push(Diagnostic::UnresolvedPredicate {
                    condition: predicate.condition.clone(),
                    attribute: predicate.attribute.clone(),
                });
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::PredicateDecomposer;
    use crate::types::Relation;

    fn schema() -> Schema {
        let mut schema = Schema::new();
        schema.add_relation(Relation::new(
            "EMPLOYEE".to_string(),
            vec!["ID".to_string(), "NAME".to_string(), "DEPT_ID".to_string()],
        ));
        schema.add_relation(Relation::new(
            "DEPT".to_string(),
            vec!["DNO".to_string(), "DNAME".to_string(), "LOC".to_string()],
        ));
        schema
    }

    fn from_list(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_assign_binds_owning_relation() {
        let (mut predicates, _) =
            PredicateDecomposer::new().decompose("E.NAME = 'Bob' AND D.LOC = 'NY'");
        let diagnostics = RelationAssigner::new().assign(
            &mut predicates,
            &schema(),
            &from_list(&["EMPLOYEE", "DEPT"]),
        );

        assert!(diagnostics.is_empty());
        assert_eq!(predicates[0].relation.as_deref(), Some("EMPLOYEE"));
        assert_eq!(predicates[1].relation.as_deref(), Some("DEPT"));
    }

    #[test]
    fn test_first_from_entry_wins_on_shared_attribute() {
        let mut schema = Schema::new();
        schema.add_relation(Relation::new(
            "A".to_string(),
            vec!["ID".to_string()],
        ));
        schema.add_relation(Relation::new(
            "B".to_string(),
            vec!["ID".to_string()],
        ));

        let (mut predicates, _) = PredicateDecomposer::new().decompose("X.ID = 1");

        let diagnostics =
            RelationAssigner::new().assign(&mut predicates, &schema, &from_list(&["B", "A"]));
        assert!(diagnostics.is_empty());
        assert_eq!(predicates[0].relation.as_deref(), Some("B"));
    }

    #[test]
    fn test_unknown_attribute_stays_unbound() {
        let (mut predicates, _) = PredicateDecomposer::new().decompose("E.SALARY > 100");
        let diagnostics = RelationAssigner::new().assign(
            &mut predicates,
            &schema(),
            &from_list(&["EMPLOYEE", "DEPT"]),
        );

        assert!(predicates[0].relation.is_none());
        assert_eq!(
            diagnostics,
            vec![Diagnostic::UnresolvedPredicate {
                condition: "E.SALARY > 100".to_string(),
                attribute: "SALARY".to_string()
            }]
        );
    }

    #[test]
    fn test_from_entry_missing_from_schema_is_skipped() {
        let (mut predicates, _) = PredicateDecomposer::new().decompose("E.NAME = 'Bob'");
        let diagnostics = RelationAssigner::new().assign(
            &mut predicates,
            &schema(),
            &from_list(&["UNKNOWN", "EMPLOYEE"]),
        );

        assert!(diagnostics.is_empty());
        assert_eq!(predicates[0].relation.as_deref(), Some("EMPLOYEE"));
    }
}
