use crate::{
    error::{Error, Result},
    solver::value::Value,
};

/// A single decision variable with a finite, ordered domain.
///
/// The full domain is fixed when the variable is created. During search the
/// *current domain* shrinks and grows through [`prune_value`] and
/// [`restore_value`], which are exact inverses; the relative order of values
/// is preserved across any prune/restore sequence.
///
/// Assignment is deliberately orthogonal to pruning: assigning a value does
/// not remove anything from the current domain. Instead, an assigned variable
/// *presents* a singleton current domain through [`cur_domain`],
/// [`cur_domain_size`] and [`in_cur_domain`], which is how assignment and
/// support checking interact during propagation.
///
/// [`prune_value`]: Variable::prune_value
/// [`restore_value`]: Variable::restore_value
/// [`cur_domain`]: Variable::cur_domain
/// [`cur_domain_size`]: Variable::cur_domain_size
/// [`in_cur_domain`]: Variable::in_cur_domain
#[derive(Debug, Clone)]
pub struct Variable<V: Value> {
    name: String,
    domain: Vec<V>,
    /// Membership mask over `domain`; `live[i]` is false once `domain[i]`
    /// has been pruned.
    live: Vec<bool>,
    live_count: usize,
    assigned: Option<V>,
}

impl<V: Value> Variable<V> {
    pub fn new(name: impl Into<String>, domain: Vec<V>) -> Self {
        let live_count = domain.len();
        let live = vec![true; live_count];
        Self {
            name: name.into(),
            domain,
            live,
            live_count,
            assigned: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full domain as originally declared, ignoring pruning.
    pub fn domain(&self) -> &[V] {
        &self.domain
    }

    /// Appends extra values to both the full domain and the current domain.
    pub fn add_domain_values(&mut self, values: impl IntoIterator<Item = V>) {
        for value in values {
            self.domain.push(value);
            self.live.push(true);
            self.live_count += 1;
        }
    }

    /// Sets the assigned value. Does not touch the current domain; callers
    /// are expected to assign at most once per search branch, pairing each
    /// call with [`unassign`](Variable::unassign) on backtrack.
    pub fn assign(&mut self, value: V) {
        self.assigned = Some(value);
    }

    pub fn unassign(&mut self) {
        self.assigned = None;
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned.is_some()
    }

    pub fn assigned_value(&self) -> Option<&V> {
        self.assigned.as_ref()
    }

    /// The current domain, in declaration order. An assigned variable
    /// presents its assigned value as a singleton regardless of the mask.
    pub fn cur_domain(&self) -> Vec<V> {
        if let Some(value) = &self.assigned {
            return vec![value.clone()];
        }
        self.domain
            .iter()
            .zip(&self.live)
            .filter(|(_, live)| **live)
            .map(|(value, _)| value.clone())
            .collect()
    }

    pub fn cur_domain_size(&self) -> usize {
        if self.assigned.is_some() {
            1
        } else {
            self.live_count
        }
    }

    pub fn in_cur_domain(&self, value: &V) -> bool {
        if let Some(assigned) = &self.assigned {
            return assigned == value;
        }
        self.live_index(value).is_some()
    }

    /// Removes `value` from the current domain. Pruning a value that is not
    /// currently present is a caller bug: propagators track what they prune
    /// precisely so that no value is ever pruned twice.
    pub fn prune_value(&mut self, value: &V) -> Result<()> {
        let index = self.live_index(value).ok_or_else(|| Error::DuplicatePrune {
            variable: self.name.clone(),
        })?;
        self.live[index] = false;
        self.live_count -= 1;
        Ok(())
    }

    /// Re-inserts a previously pruned value, at its original position.
    pub fn restore_value(&mut self, value: &V) -> Result<()> {
        let index = self
            .domain
            .iter()
            .zip(&self.live)
            .position(|(candidate, live)| !*live && candidate == value)
            .ok_or_else(|| Error::RestoreUnpruned {
                variable: self.name.clone(),
            })?;
        self.live[index] = true;
        self.live_count += 1;
        Ok(())
    }

    fn live_index(&self, value: &V) -> Option<usize> {
        self.domain
            .iter()
            .zip(&self.live)
            .position(|(candidate, live)| *live && candidate == value)
    }
}
