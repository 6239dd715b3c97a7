//! Schema model
//!
//! This module provides the in-memory representation of declared relations
//! and the extractor that builds it from raw schema text.
//!
//! The schema is built once per run and immutable afterwards; relation
//! lookups are by uppercased name.
//!
//! # Example
//!
//! ```rust
//! use relopt::schema::SchemaExtractor;
//!
//! let extractor = SchemaExtractor::new();
//! let extraction = extractor.extract(
//!     "EMPLOYEE(ID, NAME, PRIMARY KEY(ID)) SELECT NAME FROM EMPLOYEE;",
//! )?;
//! assert!(extraction.schema.get_relation("EMPLOYEE").is_some());
//! # Ok::<(), relopt::OptimizeError>(())
//! ```

pub mod extractor;

pub use extractor::{SchemaExtraction, SchemaExtractor};

use crate::types::Relation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declared schema
///
/// Holds every relation extracted from the schema region of the input,
/// keyed by uppercased name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Relation definitions (name -> relation)
    pub relations: HashMap<String, Relation>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self {
            relations: HashMap::new(),
        }
    }

    /// Register a relation, replacing any earlier declaration of the same name
    pub fn add_relation(&mut self, relation: Relation) {
        if self.relations.contains_key(&relation.name) {
            log::debug!("relation {} re-declared, last declaration wins", relation.name);
        }
        self.relations.insert(relation.name.clone(), relation);
    }

    /// Get a relation by its uppercased name
    pub fn get_relation(&self, name: &str) -> Option<&Relation> {
        self.relations.get(name)
    }

    /// Get all relation names
    pub fn relation_names(&self) -> Vec<String> {
        self.relations.keys().cloned().collect()
    }

    /// Check whether any relations were declared
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}
