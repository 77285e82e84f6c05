use std::collections::{HashMap, HashSet};

use crate::{
    error::{Error, Result},
    solver::{csp::VariableId, value::Value, variable::Variable},
};

/// An extensional (table) constraint: an ordered scope of variables plus the
/// explicit set of value tuples that satisfy it.
///
/// Scope order is semantically significant: position `i` of every satisfying
/// tuple is matched against scope variable `i`. The constraint holds ids into
/// the owning [`Csp`](crate::solver::csp::Csp)'s variable arena rather than
/// copies, so pruning is visible to every constraint sharing a variable.
#[derive(Debug, Clone)]
pub struct Constraint<V: Value> {
    name: String,
    scope: Vec<VariableId>,
    tuples: Vec<Vec<V>>,
    tuple_set: HashSet<Vec<V>>,
    /// Support index: `(scope position, value)` to the tuples carrying that
    /// value at that position. Avoids re-scanning the whole table on every
    /// `has_support` query.
    supports: HashMap<(usize, V), Vec<usize>>,
}

impl<V: Value> Constraint<V> {
    pub fn new(name: impl Into<String>, scope: Vec<VariableId>) -> Self {
        Self {
            name: name.into(),
            scope,
            tuples: Vec::new(),
            tuple_set: HashSet::new(),
            supports: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> &[VariableId] {
        &self.scope
    }

    pub fn arity(&self) -> usize {
        self.scope.len()
    }

    /// Adds satisfying tuples to the table. May be called repeatedly;
    /// duplicate tuples are ignored. Each tuple's length must equal the
    /// constraint's arity.
    pub fn add_satisfying_tuples(
        &mut self,
        tuples: impl IntoIterator<Item = Vec<V>>,
    ) -> Result<()> {
        for tuple in tuples {
            if tuple.len() != self.scope.len() {
                return Err(Error::ArityMismatch {
                    constraint: self.name.clone(),
                    expected: self.scope.len(),
                    got: tuple.len(),
                });
            }
            if !self.tuple_set.insert(tuple.clone()) {
                continue;
            }
            let index = self.tuples.len();
            for (position, value) in tuple.iter().enumerate() {
                self.supports
                    .entry((position, value.clone()))
                    .or_default()
                    .push(index);
            }
            self.tuples.push(tuple);
        }
        Ok(())
    }

    /// Whether the given positional value tuple is in the satisfying set.
    pub fn check(&self, values: &[V]) -> bool {
        self.tuple_set.contains(values)
    }

    /// Counts scope variables that are currently unassigned.
    pub fn num_unassigned(&self, vars: &[Variable<V>]) -> usize {
        self.scope
            .iter()
            .filter(|&&id| !vars[id].is_assigned())
            .count()
    }

    /// Lists scope variables that are currently unassigned, in scope order.
    pub fn unassigned_vars(&self, vars: &[Variable<V>]) -> Vec<VariableId> {
        self.scope
            .iter()
            .copied()
            .filter(|&id| !vars[id].is_assigned())
            .collect()
    }

    /// Whether some satisfying tuple has `value` at `var`'s scope position
    /// and every other position's value in that variable's current domain.
    ///
    /// Assigned variables present a singleton current domain, so support is
    /// restricted to their assigned value without any physical pruning.
    pub fn has_support(&self, vars: &[Variable<V>], var: VariableId, value: &V) -> bool {
        let Some(position) = self.scope.iter().position(|&id| id == var) else {
            return false;
        };
        let Some(candidates) = self.supports.get(&(position, value.clone())) else {
            return false;
        };
        candidates
            .iter()
            .any(|&index| self.tuple_is_valid(vars, &self.tuples[index], position))
    }

    fn tuple_is_valid(&self, vars: &[Variable<V>], tuple: &[V], skip: usize) -> bool {
        self.scope
            .iter()
            .zip(tuple)
            .enumerate()
            .all(|(i, (&id, value))| i == skip || vars[id].in_cur_domain(value))
    }
}
