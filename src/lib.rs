//! Tabula is a finite-domain constraint satisfaction problem (CSP) solver
//! built around extensional ("table") constraints.
//!
//! A problem is modelled by declaring [`Variable`]s with finite discrete
//! domains and [`Constraint`]s that enumerate the jointly-allowed value
//! tuples over an ordered scope of variables. The [`BacktrackingSearch`]
//! driver then finds an assignment satisfying every constraint, or proves
//! that none exists, using one of three propagation strengths:
//!
//! - [`Propagator::BacktrackOnly`]: check fully-assigned constraints only.
//! - [`Propagator::ForwardChecking`]: prune the single unassigned variable of
//!   an almost-assigned constraint.
//! - [`Propagator::GeneralisedArcConsistency`]: a worklist fixpoint that
//!   prunes every value left without a supporting tuple.
//!
//! All pruning is trail-based: every propagation call reports exactly what it
//! pruned, and the driver restores it in reverse order on backtrack, so the
//! problem state is identical before and after an unsuccessful branch.
//!
//! # Example: A Simple 2-Variable Problem
//!
//! Solving `?A != ?B` where `?A` can be `1` or `2` and `?B` can only be `1`.
//! The solver should deduce that `?A` must be `2`.
//!
//! ```
//! use tabula::solver::constraint::Constraint;
//! use tabula::solver::csp::Csp;
//! use tabula::solver::propagate::Propagator;
//! use tabula::solver::search::{BacktrackingSearch, SearchOutcome};
//! use tabula::solver::variable::Variable;
//!
//! # fn main() -> tabula::error::Result<()> {
//! let mut csp = Csp::new("pair");
//! let a = csp.add_variable(Variable::new("A", vec![1, 2]));
//! let b = csp.add_variable(Variable::new("B", vec![1]));
//!
//! let mut not_equal = Constraint::new("A != B", vec![a, b]);
//! not_equal.add_satisfying_tuples(vec![vec![1, 2], vec![2, 1]])?;
//! csp.add_constraint(not_equal)?;
//!
//! let search = BacktrackingSearch::new(Propagator::GeneralisedArcConsistency);
//! let (outcome, _stats) = search.solve(&mut csp)?;
//!
//! assert_eq!(outcome, SearchOutcome::Satisfied);
//! assert_eq!(csp.var(a).assigned_value(), Some(&2));
//! assert_eq!(csp.var(b).assigned_value(), Some(&1));
//! # Ok(())
//! # }
//! ```
//!
//! [`Variable`]: solver::variable::Variable
//! [`Constraint`]: solver::constraint::Constraint
//! [`BacktrackingSearch`]: solver::search::BacktrackingSearch
//! [`Propagator::BacktrackOnly`]: solver::propagate::Propagator::BacktrackOnly
//! [`Propagator::ForwardChecking`]: solver::propagate::Propagator::ForwardChecking
//! [`Propagator::GeneralisedArcConsistency`]: solver::propagate::Propagator::GeneralisedArcConsistency

pub mod error;
pub mod problems;
pub mod solver;
