//! Core types for query optimization
//!
//! This module defines the core data structures used throughout relopt:
//! - Relations and their key metadata
//! - Comparison operators
//! - Atomic selection predicates
//! - Diagnostics for leniently-degraded parse failures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared relation with attribute and key metadata
///
/// Created once during schema extraction and immutable thereafter. The
/// attribute declarations are kept as opaque text; only the leading token
/// before whitespace is used for attribute-name matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    /// Relation name (uppercased, unique within a schema)
    pub name: String,

    /// Ordered attribute declarations (uppercased)
    pub attributes: Vec<String>,

    /// Primary-key attribute names (at most one group, may be empty)
    pub primary_keys: Vec<String>,

    /// Unique-key groups, in declaration order
    pub unique_keys: Vec<Vec<String>>,
}

impl Relation {
    /// Create a new relation with no key metadata
    pub fn new(name: String, attributes: Vec<String>) -> Self {
        Self {
            name,
            attributes,
            primary_keys: Vec::new(),
            unique_keys: Vec::new(),
        }
    }

    /// Check whether this relation declares the given attribute
    ///
    /// Declarations may carry trailing text (e.g. a type annotation), so
    /// only the leading whitespace-delimited token is compared.
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes
            .iter()
            .filter_map(|decl| decl.split_whitespace().next())
            .any(|name| name == attribute)
    }

    /// Check whether the attribute belongs to the primary-key group
    pub fn is_primary_key(&self, attribute: &str) -> bool {
        self.primary_keys.iter().any(|k| k == attribute)
    }

    /// Check whether the attribute belongs to any unique-key group
    pub fn is_unique_key(&self, attribute: &str) -> bool {
        self.unique_keys
            .iter()
            .any(|group| group.iter().any(|k| k == attribute))
    }
}

/// Comparison operator of an atomic predicate
///
/// `<>` and `!=` both map to [`ComparisonOp::NotEq`]; the verbatim conjunct
/// text on the predicate preserves whichever form was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOp {
    /// Equality (`=`)
    Eq,

    /// Less than (`<`)
    Lt,

    /// Greater than (`>`)
    Gt,

    /// Less than or equal (`<=`)
    LtEq,

    /// Greater than or equal (`>=`)
    GtEq,

    /// Not equal (`<>` or `!=`)
    NotEq,
}

impl ComparisonOp {
    /// Operator tokens, longest first so `<=` is never mis-split into `<`
    /// followed by `=`.
    const TOKENS: [(&'static str, ComparisonOp); 7] = [
        ("<=", ComparisonOp::LtEq),
        (">=", ComparisonOp::GtEq),
        ("<>", ComparisonOp::NotEq),
        ("!=", ComparisonOp::NotEq),
        ("=", ComparisonOp::Eq),
        ("<", ComparisonOp::Lt),
        (">", ComparisonOp::Gt),
    ];

    /// Match an operator token at the start of `text`
    ///
    /// # Returns
    /// `Some((op, rest))` with the text following the token, or `None` if
    /// `text` does not begin with a comparison operator.
    pub fn parse_prefix(text: &str) -> Option<(Self, &str)> {
        Self::TOKENS
            .iter()
            .find(|(token, _)| text.starts_with(token))
            .map(|(token, op)| (*op, &text[token.len()..]))
    }

    /// Check whether this operator is the equality comparison
    pub fn is_equality(&self) -> bool {
        matches!(self, ComparisonOp::Eq)
    }

    /// Check whether this operator is a range comparison (`<`, `>`, `<=`, `>=`)
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            ComparisonOp::Lt | ComparisonOp::Gt | ComparisonOp::LtEq | ComparisonOp::GtEq
        )
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Gt => ">",
            ComparisonOp::LtEq => "<=",
            ComparisonOp::GtEq => ">=",
            ComparisonOp::NotEq => "<>",
        };
        write!(f, "{}", token)
    }
}

/// Atomic selection predicate
///
/// Produced in bulk by the decomposer from a conjunctive WHERE clause.
/// `relation` is the only field mutated after construction: the assigner
/// binds it once, and it stays unset when no FROM relation owns the
/// attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Predicate {
    /// Verbatim conjunct text, kept for trace fidelity
    pub condition: String,

    /// Qualifier as written before the dot (uppercased)
    pub qualifier: String,

    /// Attribute name without qualifier (uppercased)
    pub attribute: String,

    /// Comparison operator
    pub operator: ComparisonOp,

    /// Literal text with one layer of surrounding quotes stripped
    pub value: String,

    /// Qualifier of the right-hand side when it is itself an unquoted
    /// dotted `qualifier.attribute` reference (uppercased)
    pub value_qualifier: Option<String>,

    /// Relation bound by the assigner, `None` until resolved
    pub relation: Option<String>,
}

impl Predicate {
    /// Check whether this predicate is a join condition
    ///
    /// A join condition is an equality whose right-hand side is a dotted
    /// attribute reference under a different qualifier than the left-hand
    /// side.
    pub fn is_join_condition(&self) -> bool {
        self.operator.is_equality()
            && self
                .value_qualifier
                .as_ref()
                .is_some_and(|q| *q != self.qualifier)
    }
}

/// Non-fatal degradation recorded during a run
///
/// The lenient parse policy drops unusable input units instead of failing
/// the run; each drop is surfaced as one diagnostic alongside the trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// WHERE conjunct that did not match the `qualifier.attribute op value`
    /// shape and was dropped from the selection list
    UnmatchedConjunct {
        /// Verbatim conjunct text
        text: String,
    },

    /// Predicate whose attribute is not declared by any FROM relation
    UnresolvedPredicate {
        /// Verbatim conjunct text
        condition: String,

        /// Attribute that failed to resolve
        attribute: String,
    },

    /// Relation grouping whose body was empty or unusable
    EmptyRelationBody {
        /// Relation name
        relation: String,
    },

    /// Key name that does not match any declared attribute, dropped from
    /// its key group
    UnknownKeyAttribute {
        /// Relation name
        relation: String,

        /// Offending key name
        attribute: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnmatchedConjunct { text } => {
                write!(f, "dropped unmatched WHERE conjunct: {}", text)
            }
            Diagnostic::UnresolvedPredicate {
                condition,
                attribute,
            } => write!(
                f,
                "predicate {} left unbound: no FROM relation declares {}",
                condition, attribute
            ),
            Diagnostic::EmptyRelationBody { relation } => {
                write!(f, "relation {} declared with an empty body", relation)
            }
            Diagnostic::UnknownKeyAttribute {
                relation,
                attribute,
            } => write!(
                f,
                "relation {} names {} in a key group but does not declare it",
                relation, attribute
            ),
        }
    }
}
