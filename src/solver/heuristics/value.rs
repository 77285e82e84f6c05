use crate::solver::value::Value;

/// A strategy for ordering the candidate values tried for a variable.
pub trait ValueOrdering<V: Value> {
    fn order(&self, values: Vec<V>) -> Vec<V>;
}

/// Tries values in current-domain order.
pub struct DomainOrder;

impl<V: Value> ValueOrdering<V> for DomainOrder {
    fn order(&self, values: Vec<V>) -> Vec<V> {
        values
    }
}
