//! relopt: heuristic relational query optimizer
//!
//! This library rewrites a single SELECT-FROM-WHERE query against a
//! declared schema by applying the classical heuristic transformation
//! rules (cascade of selections, selection push-down, selectivity-based
//! reordering, join detection, projection push-down) and produces a
//! rule-by-rule trace ending in a bottom-up operator tree. It is a
//! teaching tool: the heuristics are fixed, nothing is cost-based, and no
//! query is ever executed.
//!
//! # Example
//!
//! ```rust
//! use relopt::optimize;
//!
//! let outcome = optimize(
//!     "EMPLOYEE(ID, NAME, PRIMARY KEY(ID)) \
//!      SELECT NAME FROM EMPLOYEE WHERE EMPLOYEE.ID = 5;",
//! )?;
//!
//! println!("{}", outcome.document);
//! assert_eq!(outcome.trace.ordered[0].score, 1);
//! # Ok::<(), relopt::OptimizeError>(())
//! ```

/// relopt version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Main modules
pub mod error;
pub mod query;
pub mod schema;
pub mod types;
pub mod utils;

pub use error::{OptimizeError, Result};
pub use query::{PlanNode, PlanRenderer, PlanTrace, Query, QueryExtractor, RulePipeline};
pub use schema::{Schema, SchemaExtractor};
pub use types::{ComparisonOp, Diagnostic, Predicate, Relation};

/// Result of one optimization run
#[derive(Debug, Clone)]
pub struct Optimization {
    /// Structured per-rule trace, including diagnostics
    pub trace: PlanTrace,

    /// Rendered trace document
    pub document: String,
}

/// Optimize one query against its declared schema
///
/// Runs the full pipeline over preprocessed input text (schema
/// declarations followed by one query statement; comment lines already
/// stripped by the caller).
///
/// # Arguments
/// * `input` - Raw schema and query text
///
/// # Returns
/// `Ok(Optimization)`, or `Err` when no SELECT exists, the query lacks a
/// FROM clause, or a key group is structurally broken
pub fn optimize(input: &str) -> Result<Optimization> {
    let extraction = SchemaExtractor::new().extract(input)?;
    let query = QueryExtractor::new().extract(&extraction.query_text)?;
    let trace = RulePipeline::new().run(&extraction.schema, query, extraction.diagnostics);
    let document = PlanRenderer::new().render(&trace);

    Ok(Optimization { trace, document })
}
