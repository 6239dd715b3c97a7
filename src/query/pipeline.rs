//! Rule pipeline
//!
//! Sequential application of the heuristic transformation rules, each
//! stage consuming the previous stage's output:
//!
//! 1. **Cascade**: decompose the conjunctive WHERE clause
//! 2. **Push down**: bind each predicate to its base relation
//! 3. **Reorder**: stable-sort predicates by selectivity score
//! 4. **Join detection**: count equality predicates relating two
//!    qualifiers (reported only; no join-tree restructuring)
//! 5. **Projection push-down**: report the final SELECT-list
//! 6. **Tree assembly**: build the bottom-up operator tree
//!
//! The pipeline owns its [`Query`] for the duration of a run; predicate
//! reordering is the only in-place mutation and field values never change.

use crate::query::assigner::RelationAssigner;
use crate::query::decomposer::PredicateDecomposer;
use crate::query::extractor::Query;
use crate::query::selectivity::SelectivityClassifier;
use crate::schema::Schema;
use crate::types::{Diagnostic, Predicate};
use serde::{Deserialize, Serialize};

/// Node of the assembled operator tree
///
/// Bottom-up: relation leaves, selection layers directly above the leaf
/// they constrain, one generic join marker over all branches, and one
/// projection root carrying the SELECT-list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlanNode {
    /// Base relation leaf
    Relation(String),

    /// Selection operator over its input
    Selection {
        /// Predicate applied by this selection
        predicate: Predicate,

        /// Input operator
        input: Box<PlanNode>,
    },

    /// Generic join marker over all relation branches
    Join {
        /// One branch per FROM-list relation, in written order
        inputs: Vec<PlanNode>,
    },

    /// Projection root carrying the SELECT-list
    Projection {
        /// Output-column expressions
        columns: Vec<String>,

        /// Input operator
        input: Box<PlanNode>,
    },
}

impl PlanNode {
    /// Count relation leaves in this subtree
    pub fn relation_count(&self) -> usize {
        match self {
            PlanNode::Relation(_) => 1,
            PlanNode::Selection { input, .. } | PlanNode::Projection { input, .. } => {
                input.relation_count()
            }
            PlanNode::Join { inputs } => inputs.iter().map(PlanNode::relation_count).sum(),
        }
    }

    /// Count selection nodes in this subtree
    pub fn selection_count(&self) -> usize {
        match self {
            PlanNode::Relation(_) => 0,
            PlanNode::Selection { input, .. } => 1 + input.selection_count(),
            PlanNode::Projection { input, .. } => input.selection_count(),
            PlanNode::Join { inputs } => inputs.iter().map(PlanNode::selection_count).sum(),
        }
    }
}

/// Predicate with its selectivity score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPredicate {
    /// The predicate after binding
    pub predicate: Predicate,

    /// Selectivity score (lower = more selective)
    pub score: u8,
}

/// Structured output of one pipeline run
///
/// Holds the per-rule fragments exactly as the stages produced them; the
/// renderer reflects this state without re-sorting or re-filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanTrace {
    /// Restated query text
    pub query_text: String,

    /// Final SELECT-list (also the Rule 5 projection target)
    pub select_list: Vec<String>,

    /// FROM-list relation names in written order
    pub from_list: Vec<String>,

    /// Rule 1: predicates in decomposition order, before binding
    pub cascade: Vec<Predicate>,

    /// Rule 2: `(condition, relation)` for every bound predicate, in
    /// decomposition order
    pub bindings: Vec<(String, String)>,

    /// Rule 3: predicates in final order with scores
    pub ordered: Vec<ScoredPredicate>,

    /// Rule 4: number of detected join conditions
    pub join_count: usize,

    /// Rule 6: assembled operator tree, rooted at the projection
    pub tree: PlanNode,

    /// Lenient-parse degradations collected across the run
    pub diagnostics: Vec<Diagnostic>,
}

impl PlanTrace {
    /// Serialize the trace to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Rule pipeline
#[derive(Debug, Default)]
pub struct RulePipeline {
    decomposer: PredicateDecomposer,
    assigner: RelationAssigner,
    classifier: SelectivityClassifier,
}

impl RulePipeline {
    /// Create a new rule pipeline
    pub fn new() -> Self {
        Self {
            decomposer: PredicateDecomposer::new(),
            assigner: RelationAssigner::new(),
            classifier: SelectivityClassifier::new(),
        }
    }

    /// Run every rule over the extracted query
    ///
    /// # Arguments
    /// * `schema` - Declared relations
    /// * `query` - Extracted query, consumed by the run
    /// * `diagnostics` - Degradations carried over from extraction
    ///
    /// # Returns
    /// The structured trace of all six stages
    pub fn run(
        &self,
        schema: &Schema,
        mut query: Query,
        mut diagnostics: Vec<Diagnostic>,
    ) -> PlanTrace {
        // Rule 1: cascade of selections
        let (predicates, mut decompose_diags) = self
            .decomposer
            .decompose(query.where_text.as_deref().unwrap_or(""));
        diagnostics.append(&mut decompose_diags);
        query.predicates = predicates;
        let cascade = query.predicates.clone();
        log::debug!("cascade produced {} predicates", cascade.len());

        // Rule 2: push selections down
        let mut assign_diags =
            self.assigner
                .assign(&mut query.predicates, schema, &query.from_list);
        diagnostics.append(&mut assign_diags);
        let bindings = query
            .predicates
            .iter()
            .filter_map(|p| {
                p.relation
                    .as_ref()
                    .map(|rel| (p.condition.clone(), rel.clone()))
            })
            .collect();

        // Rule 3: smallest selectivity first (stable, so equal scores
        // keep decomposition order)
        let mut ordered: Vec<ScoredPredicate> = query
            .predicates
            .iter()
            .map(|p| ScoredPredicate {
                predicate: p.clone(),
                score: self.classifier.score(p, schema),
            })
            .collect();
        ordered.sort_by_key(|s| s.score);
        query.predicates = ordered.iter().map(|s| s.predicate.clone()).collect();

        // Rule 4: join detection, count only
        let join_count = query
            .predicates
            .iter()
            .filter(|p| p.is_join_condition())
            .count();
        log::debug!("identified {} join condition(s)", join_count);

        // Rules 5 and 6: projection target and tree assembly
        let tree = assemble_tree(&query);

        PlanTrace {
            query_text: query.text,
            select_list: query.select_list,
            from_list: query.from_list,
            cascade,
            bindings,
            ordered,
            join_count,
            tree,
            diagnostics,
        }
    }
}

/// Assemble the bottom-up operator tree
///
/// One leaf per FROM-list relation in written order, each predicate bound
/// to it layered above in list order, one join marker over all branches,
/// one projection root. Unbound predicates are omitted.
fn assemble_tree(query: &Query) -> PlanNode {
    let branches = query
        .from_list
        .iter()
        .map(|relation| {
            let mut node = PlanNode::Relation(relation.clone());
            for predicate in query
                .predicates
                .iter()
                .filter(|p| p.relation.as_deref() == Some(relation.as_str()))
            {
                node = PlanNode::Selection {
                    predicate: predicate.clone(),
                    input: Box::new(node),
                };
            }
            node
        })
        .collect();

    PlanNode::Projection {
        columns: query.select_list.clone(),
        input: Box::new(PlanNode::Join { inputs: branches }),
    }
}
