use tracing::debug;

use crate::{
    error::Result,
    solver::{
        csp::{Csp, VariableId},
        heuristics::{
            value::{DomainOrder, ValueOrdering},
            variable::{DeclaredOrder, VariableOrdering},
        },
        propagate::Propagator,
        stats::SearchStats,
        value::Value,
    },
};

/// How a solve ended.
///
/// `Exhausted` is a valid answer, not a fault: the search systematically
/// covered every branch and proved no assignment satisfies the constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A complete satisfying assignment was found; it is left on the CSP's
    /// variables for the caller to read back.
    Satisfied,
    /// Every branch was explored without success: no solution exists.
    Exhausted,
    /// The node budget ran out; the CSP was unwound to its pre-search state.
    Aborted,
}

/// Depth-first backtracking search over partial assignments.
///
/// Each branch assigns a value, runs the configured propagator, and recurses
/// on success. On any failure the driver undoes in reverse: it restores every
/// value that propagation call pruned (most recent first), then unassigns,
/// then tries the next candidate. Mutation is strictly nested, so the CSP is
/// identical before and after an unsuccessful subtree.
pub struct BacktrackingSearch<V: Value> {
    propagator: Propagator,
    variable_ordering: Box<dyn VariableOrdering<V>>,
    value_ordering: Box<dyn ValueOrdering<V>>,
    node_limit: Option<u64>,
}

impl<V: Value> BacktrackingSearch<V> {
    /// Creates a driver using declaration-order variable selection and
    /// current-domain value order.
    pub fn new(propagator: Propagator) -> Self {
        Self {
            propagator,
            variable_ordering: Box::new(DeclaredOrder),
            value_ordering: Box::new(DomainOrder),
            node_limit: None,
        }
    }

    pub fn with_variable_ordering(
        mut self,
        ordering: Box<dyn VariableOrdering<V>>,
    ) -> Self {
        self.variable_ordering = ordering;
        self
    }

    pub fn with_value_ordering(mut self, ordering: Box<dyn ValueOrdering<V>>) -> Self {
        self.value_ordering = ordering;
        self
    }

    /// Caps the number of search nodes visited. The cap is checked at each
    /// variable selection; when hit, the search unwinds cleanly.
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Runs the search to completion.
    ///
    /// The propagator is first invoked with no recently-assigned variable to
    /// perform its pre-search processing. On `Satisfied` the solution is
    /// readable through each variable's assigned value; on any other outcome
    /// all domains are restored to their pre-search state.
    pub fn solve(&self, csp: &mut Csp<V>) -> Result<(SearchOutcome, SearchStats)> {
        let mut stats = SearchStats::default();

        let initial = self.propagator.propagate(csp, None, &mut stats)?;
        stats.prunings += initial.pruned.len() as u64;
        if !initial.consistent {
            debug!(csp = csp.name(), "unsatisfiable under the declared domains");
            restore(csp, &initial.pruned)?;
            return Ok((SearchOutcome::Exhausted, stats));
        }

        let outcome = self.search(csp, &mut stats)?;
        if outcome != SearchOutcome::Satisfied {
            restore(csp, &initial.pruned)?;
        }
        debug!(
            csp = csp.name(),
            ?outcome,
            nodes = stats.nodes_visited,
            backtracks = stats.backtracks,
            prunings = stats.prunings,
            "search finished"
        );
        Ok((outcome, stats))
    }

    fn search(&self, csp: &mut Csp<V>, stats: &mut SearchStats) -> Result<SearchOutcome> {
        if let Some(limit) = self.node_limit {
            if stats.nodes_visited >= limit {
                return Ok(SearchOutcome::Aborted);
            }
        }
        stats.nodes_visited += 1;

        let Some(var) = self.variable_ordering.select(csp) else {
            return Ok(SearchOutcome::Satisfied);
        };

        for value in self.value_ordering.order(csp.var(var).cur_domain()) {
            csp.var_mut(var).assign(value);
            let propagation = self.propagator.propagate(csp, Some(var), stats)?;
            stats.prunings += propagation.pruned.len() as u64;

            if propagation.consistent {
                match self.search(csp, stats)? {
                    SearchOutcome::Satisfied => return Ok(SearchOutcome::Satisfied),
                    SearchOutcome::Aborted => {
                        restore(csp, &propagation.pruned)?;
                        csp.var_mut(var).unassign();
                        return Ok(SearchOutcome::Aborted);
                    }
                    SearchOutcome::Exhausted => {}
                }
            }

            restore(csp, &propagation.pruned)?;
            csp.var_mut(var).unassign();
            stats.backtracks += 1;
        }

        Ok(SearchOutcome::Exhausted)
    }
}

/// Undoes a propagation call's pruning, most recent prune first.
fn restore<V: Value>(csp: &mut Csp<V>, pruned: &[(VariableId, V)]) -> Result<()> {
    for (var, value) in pruned.iter().rev() {
        csp.var_mut(*var).restore_value(value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        problems::n_queens::n_queens,
        solver::{
            constraint::Constraint, heuristics::variable::MinimumRemainingValues,
            variable::Variable,
        },
    };

    fn assert_valid_solution(csp: &Csp<i64>) {
        let solution = csp.solution().expect("every variable assigned");
        for con in csp.constraints() {
            let values: Vec<i64> = con.scope().iter().map(|&id| solution[id]).collect();
            assert!(con.check(&values), "{} violated", con.name());
        }
    }

    fn unsolvable_pair() -> Csp<i64> {
        let mut csp = Csp::new("unsolvable");
        let a = csp.add_variable(Variable::new("a", vec![1]));
        let b = csp.add_variable(Variable::new("b", vec![1]));
        let mut con = Constraint::new("a != b", vec![a, b]);
        con.add_satisfying_tuples(vec![vec![1, 2], vec![2, 1]])
            .unwrap();
        csp.add_constraint(con).unwrap();
        csp
    }

    #[test]
    fn solves_eight_queens_with_each_propagator() {
        let _ = tracing_subscriber::fmt::try_init();

        for propagator in [
            Propagator::BacktrackOnly,
            Propagator::ForwardChecking,
            Propagator::GeneralisedArcConsistency,
        ] {
            let mut csp = n_queens(8).unwrap();
            let search = BacktrackingSearch::new(propagator);
            let (outcome, stats) = search.solve(&mut csp).unwrap();
            assert_eq!(outcome, SearchOutcome::Satisfied, "{propagator:?}");
            assert!(stats.nodes_visited > 0);
            assert_valid_solution(&csp);
        }
    }

    #[test]
    fn stronger_propagation_visits_no_more_nodes() {
        let mut bt_csp = n_queens(8).unwrap();
        let (_, bt_stats) = BacktrackingSearch::new(Propagator::BacktrackOnly)
            .solve(&mut bt_csp)
            .unwrap();

        let mut gac_csp = n_queens(8).unwrap();
        let (_, gac_stats) = BacktrackingSearch::new(Propagator::GeneralisedArcConsistency)
            .solve(&mut gac_csp)
            .unwrap();

        assert!(gac_stats.nodes_visited <= bt_stats.nodes_visited);
    }

    #[test]
    fn mrv_ordering_finds_a_valid_solution() {
        let mut csp = n_queens(8).unwrap();
        let search = BacktrackingSearch::new(Propagator::ForwardChecking)
            .with_variable_ordering(Box::new(MinimumRemainingValues));
        let (outcome, _) = search.solve(&mut csp).unwrap();
        assert_eq!(outcome, SearchOutcome::Satisfied);
        assert_valid_solution(&csp);
    }

    #[test]
    fn exhaustion_reports_no_solution_and_leaves_the_csp_pristine() {
        for propagator in [
            Propagator::BacktrackOnly,
            Propagator::ForwardChecking,
            Propagator::GeneralisedArcConsistency,
        ] {
            let mut csp = unsolvable_pair();
            let (outcome, _) = BacktrackingSearch::new(propagator)
                .solve(&mut csp)
                .unwrap();
            assert_eq!(outcome, SearchOutcome::Exhausted, "{propagator:?}");
            for var in csp.variables() {
                assert!(!var.is_assigned());
                assert_eq!(var.cur_domain(), var.domain().to_vec());
            }
        }
    }

    #[test]
    fn node_limit_aborts_and_unwinds() {
        let mut csp = n_queens(8).unwrap();
        let search =
            BacktrackingSearch::new(Propagator::ForwardChecking).with_node_limit(2);
        let (outcome, stats) = search.solve(&mut csp).unwrap();
        assert_eq!(outcome, SearchOutcome::Aborted);
        assert!(stats.nodes_visited <= 2);
        for var in csp.variables() {
            assert!(!var.is_assigned());
            assert_eq!(var.cur_domain(), var.domain().to_vec());
        }
    }

    #[test]
    fn stats_table_names_every_revised_constraint() {
        let mut csp = n_queens(6).unwrap();
        let (_, stats) = BacktrackingSearch::new(Propagator::GeneralisedArcConsistency)
            .solve(&mut csp)
            .unwrap();
        let table = crate::solver::stats::render_stats_table(&stats, &csp);
        assert!(table.contains("C(Q1,Q2)"));
        assert!(table.contains("Revisions"));
    }

    #[test]
    fn trivially_satisfiable_without_constraints() {
        let mut csp = Csp::new("free");
        csp.add_variable(Variable::new("a", vec![1, 2]));
        csp.add_variable(Variable::new("b", vec![7]));
        let (outcome, _) = BacktrackingSearch::new(Propagator::GeneralisedArcConsistency)
            .solve(&mut csp)
            .unwrap();
        assert_eq!(outcome, SearchOutcome::Satisfied);
        assert_eq!(csp.solution(), Some(vec![1, 7]));
    }
}
