//! Heuristics for selecting which variable to branch on next.

use crate::solver::{
    csp::{Csp, VariableId},
    value::Value,
};

/// A strategy for choosing the next unassigned variable to branch on.
///
/// Returns `None` exactly when every variable is assigned, which the search
/// driver treats as a complete assignment.
pub trait VariableOrdering<V: Value> {
    fn select(&self, csp: &Csp<V>) -> Option<VariableId>;
}

/// Picks the first unassigned variable in declaration order.
pub struct DeclaredOrder;

impl<V: Value> VariableOrdering<V> for DeclaredOrder {
    fn select(&self, csp: &Csp<V>) -> Option<VariableId> {
        csp.variables().iter().position(|var| !var.is_assigned())
    }
}

/// Minimum Remaining Values: picks an unassigned variable with the smallest
/// current domain, a fail-first strategy that branches where the fewest
/// options remain.
///
/// The scan keeps any variable whose domain size is less than *or equal to*
/// the best seen so far, so ties resolve to the last minimal variable in
/// declaration order. Callers relying on a specific tie winner should order
/// their variable declarations accordingly.
pub struct MinimumRemainingValues;

impl<V: Value> VariableOrdering<V> for MinimumRemainingValues {
    fn select(&self, csp: &Csp<V>) -> Option<VariableId> {
        let mut best: Option<(VariableId, usize)> = None;
        for (id, var) in csp.variables().iter().enumerate() {
            if var.is_assigned() {
                continue;
            }
            let size = var.cur_domain_size();
            match best {
                Some((_, smallest)) if size > smallest => {}
                _ => best = Some((id, size)),
            }
        }
        best.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::variable::Variable;

    fn csp_with_domain_sizes(sizes: &[usize]) -> Csp<i64> {
        let names = ["A", "B", "C", "D", "E", "F"];
        let vars = sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| Variable::new(names[i], (1..=size as i64).collect()))
            .collect();
        Csp::with_variables("sizes", vars)
    }

    #[test]
    fn mrv_picks_the_unique_smallest_domain() {
        let csp = csp_with_domain_sizes(&[5, 4, 2, 3, 1]);
        let selected = MinimumRemainingValues.select(&csp).unwrap();
        assert_eq!(csp.var(selected).name(), "E");
    }

    #[test]
    fn mrv_with_ascending_sizes_keeps_the_first_variable() {
        // A's current domain is empty: a wiped-out variable still wins.
        let csp = csp_with_domain_sizes(&[0, 1, 2, 3, 4]);
        let selected = MinimumRemainingValues.select(&csp).unwrap();
        assert_eq!(csp.var(selected).name(), "A");
        assert_eq!(csp.var(selected).cur_domain_size(), 0);
    }

    #[test]
    fn mrv_ties_resolve_to_the_last_minimal_variable() {
        let csp = csp_with_domain_sizes(&[2, 3, 2]);
        let selected = MinimumRemainingValues.select(&csp).unwrap();
        assert_eq!(csp.var(selected).name(), "C");
    }

    #[test]
    fn mrv_ignores_assigned_variables() {
        let mut csp = csp_with_domain_sizes(&[2, 3]);
        csp.var_mut(0).assign(1);
        let selected = MinimumRemainingValues.select(&csp).unwrap();
        assert_eq!(csp.var(selected).name(), "B");

        csp.var_mut(1).assign(1);
        assert!(MinimumRemainingValues.select(&csp).is_none());
    }

    #[test]
    fn declared_order_picks_the_first_unassigned() {
        let mut csp = csp_with_domain_sizes(&[2, 1, 3]);
        assert_eq!(DeclaredOrder.select(&csp), Some(0));
        csp.var_mut(0).assign(1);
        assert_eq!(DeclaredOrder.select(&csp), Some(1));
    }
}
