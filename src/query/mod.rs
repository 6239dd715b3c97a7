//! Query processing module
//!
//! This module provides the transformation pipeline for one
//! SELECT-FROM-WHERE query:
//! - `extractor`: clause splitting into SELECT/FROM/WHERE lists
//! - `decomposer`: cascade of selections (Rule 1)
//! - `assigner`: selection push-down to base relations (Rule 2)
//! - `selectivity`: restrictiveness scoring (Rule 3)
//! - `pipeline`: rule orchestration, join detection, tree assembly
//! - `renderer`: the final trace document
//!
//! # Workflow
//!
//! 1. **Extract**: split the statement into clause lists
//! 2. **Decompose**: break the WHERE conjunction into atomic predicates
//! 3. **Bind**: attach each predicate to the relation owning its attribute
//! 4. **Reorder**: stable-sort predicates by selectivity score
//! 5. **Detect joins / push projections**: report-only heuristics
//! 6. **Assemble and render**: bottom-up operator tree, then text
//!
//! # Example
//!
//! ```rust
//! use relopt::query::{PlanRenderer, QueryExtractor, RulePipeline};
//! use relopt::schema::SchemaExtractor;
//!
//! let extraction = SchemaExtractor::new()
//!     .extract("EMPLOYEE(ID, NAME, PRIMARY KEY(ID)) SELECT NAME FROM EMPLOYEE WHERE EMPLOYEE.ID = 5")?;
//! let query = QueryExtractor::new().extract(&extraction.query_text)?;
//! let trace = RulePipeline::new().run(&extraction.schema, query, extraction.diagnostics);
//! println!("{}", PlanRenderer::new().render(&trace));
//! # Ok::<(), relopt::OptimizeError>(())
//! ```

pub mod assigner;
pub mod decomposer;
pub mod extractor;
pub mod pipeline;
pub mod renderer;
pub mod selectivity;

// Re-export main types for convenience
pub use assigner::RelationAssigner;
pub use decomposer::PredicateDecomposer;
pub use extractor::{Query, QueryExtractor};
pub use pipeline::{PlanNode, PlanTrace, RulePipeline, ScoredPredicate};
pub use renderer::PlanRenderer;
pub use selectivity::SelectivityClassifier;
