use std::collections::HashMap;

use prettytable::{Cell, Row, Table};

use crate::solver::{
    csp::{ConstraintId, Csp},
    value::Value,
};

/// Work attributed to a single constraint across one solve.
#[derive(Debug, Clone, Default)]
pub struct PerConstraintStats {
    /// How many times the constraint was examined by a propagator.
    pub revisions: u64,
    /// How many values its revisions pruned.
    pub prunings: u64,
    pub time_spent_micros: u64,
}

/// Counters accumulated over one call to
/// [`BacktrackingSearch::solve`](crate::solver::search::BacktrackingSearch::solve).
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Search-tree nodes entered (variable selections, including the root).
    pub nodes_visited: u64,
    /// Candidate values abandoned after a failed subtree.
    pub backtracks: u64,
    /// Total values pruned by propagation, over all constraints.
    pub prunings: u64,
    pub constraint_stats: HashMap<ConstraintId, PerConstraintStats>,
}

impl SearchStats {
    pub(crate) fn record_revision(
        &mut self,
        constraint: ConstraintId,
        prunings: u64,
        elapsed_micros: u64,
    ) {
        let entry = self.constraint_stats.entry(constraint).or_default();
        entry.revisions += 1;
        entry.prunings += prunings;
        entry.time_spent_micros += elapsed_micros;
    }
}

/// Renders per-constraint propagation statistics as a text table, cheapest
/// constraints first.
pub fn render_stats_table<V: Value>(stats: &SearchStats, csp: &Csp<V>) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Constraint"),
        Cell::new("ID"),
        Cell::new("Revisions"),
        Cell::new("Prunings"),
        Cell::new("Time / Revision (µs)"),
        Cell::new("Total Time (ms)"),
    ]));

    let mut sorted_stats: Vec<(&ConstraintId, &PerConstraintStats)> =
        stats.constraint_stats.iter().collect();
    sorted_stats.sort_by_key(|(_, per)| per.time_spent_micros);

    for (constraint_id, per) in sorted_stats {
        let avg_time = if per.revisions > 0 {
            per.time_spent_micros as f64 / per.revisions as f64
        } else {
            0.0
        };

        table.add_row(Row::new(vec![
            Cell::new(csp.constraint(*constraint_id).name()),
            Cell::new(&constraint_id.to_string()),
            Cell::new(&per.revisions.to_string()),
            Cell::new(&per.prunings.to_string()),
            Cell::new(&format!("{avg_time:.2}")),
            Cell::new(&format!("{:.2}", per.time_spent_micros as f64 / 1000.0)),
        ]));
    }

    table.to_string()
}
