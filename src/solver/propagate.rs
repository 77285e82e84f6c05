use std::time::Instant;

use tracing::trace;

use crate::{
    error::Result,
    solver::{
        csp::{ConstraintId, Csp, VariableId},
        stats::SearchStats,
        value::Value,
        work_list::WorkList,
    },
};

/// The outcome of one propagation call.
///
/// `pruned` lists every (variable, value) pair the call removed, in prune
/// order, so the search driver can restore them in reverse on backtrack. A
/// dead end (`consistent == false`) is a normal search outcome, not an
/// error; the pruned list is still needed to undo it.
#[derive(Debug, Clone)]
pub struct Propagation<V: Value> {
    pub consistent: bool,
    pub pruned: Vec<(VariableId, V)>,
}

/// The closed set of propagation strategies. One is selected per search run;
/// all share the same contract: given the CSP and optionally the most
/// recently assigned variable, prune domain values and report a
/// [`Propagation`]. Called with no variable, a propagator performs whatever
/// pre-search processing its strength requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagator {
    /// No pruning; only rejects violated fully-assigned constraints.
    BacktrackOnly,
    /// Prunes the single unassigned variable of almost-assigned constraints.
    ForwardChecking,
    /// Worklist fixpoint removing every value left without a support.
    GeneralisedArcConsistency,
}

impl Propagator {
    pub fn propagate<V: Value>(
        &self,
        csp: &mut Csp<V>,
        new_var: Option<VariableId>,
        stats: &mut SearchStats,
    ) -> Result<Propagation<V>> {
        match self {
            Propagator::BacktrackOnly => Ok(check_assigned(csp, new_var, stats)),
            Propagator::ForwardChecking => forward_check(csp, new_var, stats),
            Propagator::GeneralisedArcConsistency => enforce_gac(csp, new_var, stats),
        }
    }
}

/// Plain backtracking support: checks every fully-assigned constraint
/// touching the newly assigned variable. Prunes nothing.
fn check_assigned<V: Value>(
    csp: &Csp<V>,
    new_var: Option<VariableId>,
    stats: &mut SearchStats,
) -> Propagation<V> {
    let Some(var) = new_var else {
        return Propagation {
            consistent: true,
            pruned: Vec::new(),
        };
    };

    for &cid in csp.constraints_with_var(var) {
        let con = csp.constraint(cid);
        if con.num_unassigned(csp.variables()) != 0 {
            continue;
        }
        let start = Instant::now();
        let values: Option<Vec<V>> = con
            .scope()
            .iter()
            .map(|&id| csp.var(id).assigned_value().cloned())
            .collect();
        let violated = matches!(&values, Some(values) if !con.check(values));
        stats.record_revision(cid, 0, start.elapsed().as_micros() as u64);
        if violated {
            trace!(constraint = con.name(), "fully-assigned constraint violated");
            return Propagation {
                consistent: false,
                pruned: Vec::new(),
            };
        }
    }

    Propagation {
        consistent: true,
        pruned: Vec::new(),
    }
}

/// Forward checking: for every candidate constraint with exactly one
/// unassigned scope variable, test each of that variable's current values
/// against the assigned remainder of the scope and prune the failures.
fn forward_check<V: Value>(
    csp: &mut Csp<V>,
    new_var: Option<VariableId>,
    stats: &mut SearchStats,
) -> Result<Propagation<V>> {
    let candidates: Vec<ConstraintId> = match new_var {
        None => (0..csp.constraints().len()).collect(),
        Some(var) => csp.constraints_with_var(var).to_vec(),
    };

    let mut pruned: Vec<(VariableId, V)> = Vec::new();
    for cid in candidates {
        if csp.constraint(cid).num_unassigned(csp.variables()) != 1 {
            continue;
        }
        let scope = csp.constraint(cid).scope().to_vec();
        let free = csp.constraint(cid).unassigned_vars(csp.variables())[0];

        let start = Instant::now();
        let mut local_prunings = 0;
        for value in csp.var(free).cur_domain() {
            // Exactly one scope slot is unassigned, so every hole takes the
            // candidate value.
            let values: Vec<V> = scope
                .iter()
                .map(|&id| match csp.var(id).assigned_value() {
                    Some(assigned) => assigned.clone(),
                    None => value.clone(),
                })
                .collect();
            if csp.constraint(cid).check(&values) {
                continue;
            }
            csp.var_mut(free).prune_value(&value)?;
            pruned.push((free, value));
            local_prunings += 1;
            if csp.var(free).cur_domain_size() == 0 {
                stats.record_revision(cid, local_prunings, start.elapsed().as_micros() as u64);
                trace!(variable = csp.var(free).name(), "forward check wiped out a domain");
                return Ok(Propagation {
                    consistent: false,
                    pruned,
                });
            }
        }
        stats.record_revision(cid, local_prunings, start.elapsed().as_micros() as u64);
    }

    Ok(Propagation {
        consistent: true,
        pruned,
    })
}

/// Generalised arc consistency, AC-3 style: revise constraints from a FIFO
/// worklist until no value anywhere is left without a supporting tuple.
///
/// After a prune, every constraint touching the pruned variable is requeued
/// (unless already queued), since its other arcs may have lost support
/// transitively. Worklist order affects only the work done, not the fixpoint.
fn enforce_gac<V: Value>(
    csp: &mut Csp<V>,
    new_var: Option<VariableId>,
    stats: &mut SearchStats,
) -> Result<Propagation<V>> {
    let mut queue = WorkList::new();
    match new_var {
        None => {
            for cid in 0..csp.constraints().len() {
                queue.push_back(cid);
            }
        }
        Some(var) => {
            for &cid in csp.constraints_with_var(var) {
                queue.push_back(cid);
            }
        }
    }

    let mut pruned: Vec<(VariableId, V)> = Vec::new();
    while let Some(cid) = queue.pop_front() {
        let scope = csp.constraint(cid).scope().to_vec();
        let start = Instant::now();
        let mut local_prunings = 0;

        for &vid in &scope {
            for value in csp.var(vid).cur_domain() {
                if csp
                    .constraint(cid)
                    .has_support(csp.variables(), vid, &value)
                {
                    continue;
                }
                if csp.var(vid).is_assigned() {
                    // The assigned value itself lost all support. Its
                    // singleton view cannot shrink further, so this is a
                    // dead end, not a prune.
                    stats.record_revision(cid, local_prunings, start.elapsed().as_micros() as u64);
                    trace!(
                        variable = csp.var(vid).name(),
                        "assigned value lost all support"
                    );
                    return Ok(Propagation {
                        consistent: false,
                        pruned,
                    });
                }
                csp.var_mut(vid).prune_value(&value)?;
                pruned.push((vid, value));
                local_prunings += 1;
                if csp.var(vid).cur_domain_size() == 0 {
                    stats.record_revision(cid, local_prunings, start.elapsed().as_micros() as u64);
                    trace!(variable = csp.var(vid).name(), "arc consistency wiped out a domain");
                    return Ok(Propagation {
                        consistent: false,
                        pruned,
                    });
                }
                for &dep in csp.constraints_with_var(vid) {
                    queue.push_back(dep);
                }
            }
        }
        stats.record_revision(cid, local_prunings, start.elapsed().as_micros() as u64);
    }

    Ok(Propagation {
        consistent: true,
        pruned,
    })
}
