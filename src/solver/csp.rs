use crate::{
    error::{Error, Result},
    solver::{constraint::Constraint, value::Value, variable::Variable},
};

pub type VariableId = usize;
pub type ConstraintId = usize;

/// A constraint satisfaction problem: an arena of variables, the constraints
/// over them, and an index from each variable to the constraints touching it.
///
/// Variables are owned exactly once, here; constraints and the index refer to
/// them by [`VariableId`] (their arena position), so every reader observes
/// the same mutable domain state. The index is maintained incrementally:
/// constraints may be added at any point after their variables.
#[derive(Debug, Clone)]
pub struct Csp<V: Value> {
    name: String,
    vars: Vec<Variable<V>>,
    cons: Vec<Constraint<V>>,
    cons_by_var: Vec<Vec<ConstraintId>>,
}

impl<V: Value> Csp<V> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vars: Vec::new(),
            cons: Vec::new(),
            cons_by_var: Vec::new(),
        }
    }

    /// Builds a CSP from a pre-declared variable sequence; ids are assigned
    /// in order.
    pub fn with_variables(name: impl Into<String>, vars: Vec<Variable<V>>) -> Self {
        let mut csp = Self::new(name);
        for var in vars {
            csp.add_variable(var);
        }
        csp
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_variable(&mut self, var: Variable<V>) -> VariableId {
        self.vars.push(var);
        self.cons_by_var.push(Vec::new());
        self.vars.len() - 1
    }

    /// Registers a constraint, indexing it under every scope variable. The
    /// scope must only reference variables already added to this CSP.
    pub fn add_constraint(&mut self, con: Constraint<V>) -> Result<ConstraintId> {
        for &var in con.scope() {
            if var >= self.vars.len() {
                return Err(Error::UnknownVariable {
                    constraint: con.name().to_string(),
                    variable: var,
                    registered: self.vars.len(),
                });
            }
        }
        let id = self.cons.len();
        for &var in con.scope() {
            self.cons_by_var[var].push(id);
        }
        self.cons.push(con);
        Ok(id)
    }

    pub fn variables(&self) -> &[Variable<V>] {
        &self.vars
    }

    pub fn var(&self, id: VariableId) -> &Variable<V> {
        &self.vars[id]
    }

    pub fn var_mut(&mut self, id: VariableId) -> &mut Variable<V> {
        &mut self.vars[id]
    }

    pub fn constraints(&self) -> &[Constraint<V>] {
        &self.cons
    }

    pub fn constraint(&self, id: ConstraintId) -> &Constraint<V> {
        &self.cons[id]
    }

    /// Ids of the constraints whose scope includes `var`, in declaration order.
    pub fn constraints_with_var(&self, var: VariableId) -> &[ConstraintId] {
        &self.cons_by_var[var]
    }

    /// Ids of currently unassigned variables, in declaration order.
    pub fn unassigned_variables(&self) -> Vec<VariableId> {
        self.vars
            .iter()
            .enumerate()
            .filter(|(_, var)| !var.is_assigned())
            .map(|(id, _)| id)
            .collect()
    }

    /// The assigned value of every variable in declaration order, or `None`
    /// if any variable is still unassigned.
    pub fn solution(&self) -> Option<Vec<V>> {
        self.vars
            .iter()
            .map(|var| var.assigned_value().cloned())
            .collect()
    }
}
