//! Plan renderer
//!
//! Turns a [`PlanTrace`] into the final line-oriented trace document:
//! fixed banner, restated query, one section per rule, then the operator
//! tree rendered bottom-up. Rendering reflects exactly the state the rule
//! pipeline produced; nothing is re-sorted or re-filtered here.

use crate::query::pipeline::{PlanNode, PlanTrace};

const BANNER_WIDTH: usize = 60;

/// Plan renderer
#[derive(Debug, Default)]
pub struct PlanRenderer;

impl PlanRenderer {
    /// Create a new plan renderer
    pub fn new() -> Self {
        Self
    }

    /// Render the trace document
    ///
    /// # Returns
    /// Newline-joined UTF-8 text ready for display
    pub fn render(&self, trace: &PlanTrace) -> String {
        let mut lines: Vec<String> = Vec::new();
        let banner = "=".repeat(BANNER_WIDTH);

        lines.push(banner.clone());
        lines.push("HEURISTIC QUERY OPTIMIZATION".to_string());
        lines.push(banner.clone());
        lines.push(String::new());

        lines.push("Original Query:".to_string());
        lines.push(trace.query_text.clone());
        lines.push(String::new());

        lines.push("Rule #1 (Cascade of Selections):".to_string());
        lines.push("Breaking conjunctive WHERE conditions into individual selections...".to_string());
        for predicate in &trace.cascade {
            lines.push(format!("  σ({})", predicate.condition));
        }
        lines.push(String::new());

        lines.push("Rule #2 (Push Selections Down):".to_string());
        lines.push("Pushing selections close to base relations...".to_string());
        for (condition, relation) in &trace.bindings {
            lines.push(format!("  σ({}) → {}", condition, relation));
        }
        lines.push(String::new());

        lines.push("Rule #3 (Apply Selections with Smallest Selectivity First):".to_string());
        lines.push("Reordering selections by selectivity (most restrictive first):".to_string());
        for (i, scored) in trace.ordered.iter().enumerate() {
            let line = match &scored.predicate.relation {
                Some(relation) => format!(
                    "  {}. σ({}) on {} (score: {})",
                    i + 1,
                    scored.predicate.condition,
                    relation,
                    scored.score
                ),
                None => format!(
                    "  {}. σ({}) (score: {})",
                    i + 1,
                    scored.predicate.condition,
                    scored.score
                ),
            };
            lines.push(line);
        }
        lines.push(String::new());

        lines.push("Rule #4 (Replace Cartesian Product + Selection → Join):".to_string());
        lines.push("Converting cross products with join conditions to natural joins...".to_string());
        lines.push(format!("  Identified {} join condition(s)", trace.join_count));
        lines.push(String::new());

        lines.push("Rule #5 (Push Projections Down):".to_string());
        lines.push("Pushing projections to eliminate unnecessary attributes early...".to_string());
        lines.push(format!("  Final projection: {}", trace.select_list.join(", ")));
        lines.push(String::new());

        lines.push("Optimized Query Tree (bottom-up):".to_string());
        lines.push("-".repeat(BANNER_WIDTH));
        render_tree(&trace.tree, &mut lines);
        lines.push(banner);

        lines.join("\n")
    }
}

/// Render the operator tree bottom-up
///
/// Each relation branch prints its leaf, then its selection layers from
/// the innermost (first applied) outward; the join marker and projection
/// root close the document.
fn render_tree(tree: &PlanNode, lines: &mut Vec<String>) {
    match tree {
        PlanNode::Projection { columns, input } => {
            render_tree(input, lines);
            lines.push(format!("    ↑ π({})", columns.join(", ")));
        }
        PlanNode::Join { inputs } => {
            for branch in inputs {
                render_branch(branch, lines);
            }
            lines.push("    ↑ ⋈ (Joins)".to_string());
        }
        other => render_branch(other, lines),
    }
}

fn render_branch(node: &PlanNode, lines: &mut Vec<String>) {
    match node {
        PlanNode::Relation(name) => lines.push(format!("  {}", name)),
        PlanNode::Selection { predicate, input } => {
            render_branch(input, lines);
            lines.push(format!("    ↑ σ({})", predicate.condition));
        }
        // Join and projection never nest inside a branch
        other => render_tree(other, lines),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryExtractor, RulePipeline};
    use crate::schema::SchemaExtractor;

    fn render(input: &str) -> String {
        let extraction = SchemaExtractor::new().extract(input).unwrap();
        let query = QueryExtractor::new()
            .extract(&extraction.query_text)
            .unwrap();
        let trace = RulePipeline::new().run(&extraction.schema, query, extraction.diagnostics);
        PlanRenderer::new().render(&trace)
    }

    #[test]
    fn test_render_full_document() {
        let document = render(
            "EMPLOYEE(ID, NAME, DEPT_ID, PRIMARY KEY(ID)) \
             SELECT NAME FROM EMPLOYEE WHERE EMPLOYEE.ID = 5 AND EMPLOYEE.NAME = 'Bob'",
        );

        let expected = "\
============================================================
HEURISTIC QUERY OPTIMIZATION
============================================================

Original Query:
SELECT NAME FROM EMPLOYEE WHERE EMPLOYEE.ID = 5 AND EMPLOYEE.NAME = 'Bob'

Rule #1 (Cascade of Selections):
Breaking conjunctive WHERE conditions into individual selections...
  σ(EMPLOYEE.ID = 5)
  σ(EMPLOYEE.NAME = 'Bob')

Rule #2 (Push Selections Down):
Pushing selections close to base relations...
  σ(EMPLOYEE.ID = 5) → EMPLOYEE
  σ(EMPLOYEE.NAME = 'Bob') → EMPLOYEE

Rule #3 (Apply Selections with Smallest Selectivity First):
Reordering selections by selectivity (most restrictive first):
  1. σ(EMPLOYEE.ID = 5) on EMPLOYEE (score: 1)
  2. σ(EMPLOYEE.NAME = 'Bob') on EMPLOYEE (score: 5)

Rule #4 (Replace Cartesian Product + Selection → Join):
Converting cross products with join conditions to natural joins...
  Identified 0 join condition(s)

Rule #5 (Push Projections Down):
Pushing projections to eliminate unnecessary attributes early...
  Final projection: NAME

Optimized Query Tree (bottom-up):
------------------------------------------------------------
  EMPLOYEE
    ↑ σ(EMPLOYEE.ID = 5)
    ↑ σ(EMPLOYEE.NAME = 'Bob')
    ↑ ⋈ (Joins)
    ↑ π(NAME)
============================================================";

        assert_eq!(document, expected);
    }

    #[test]
    fn test_render_two_relation_tree() {
        let document = render(
            "R(A, B) S(C, D) SELECT A FROM R, S WHERE R.A = 1 AND S.C = 2",
        );

        let tree_section = document
            .split("Optimized Query Tree (bottom-up):")
            .nth(1)
            .unwrap();
        assert!(tree_section.contains("\n  R\n    ↑ σ(R.A = 1)\n  S\n    ↑ σ(S.C = 2)\n"));
        assert!(tree_section.contains("↑ ⋈ (Joins)"));
        assert!(tree_section.contains("↑ π(A)"));
    }

    #[test]
    fn test_render_unbound_predicate_has_no_relation_clause() {
        let document = render("R(A) SELECT A FROM R WHERE R.A = 1 AND R.MISSING = 2");
        assert!(document.contains("σ(R.MISSING = 2) (score: 8)"));
        // Unbound predicates never appear as tree layers
        let tree_section = document
            .split("Optimized Query Tree (bottom-up):")
            .nth(1)
            .unwrap();
        assert!(!tree_section.contains("MISSING"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let input = "R(A) S(B) SELECT A, B FROM R, S WHERE R.A = 1 AND S.B = 2";
        assert_eq!(render(input), render(input));
    }
}
