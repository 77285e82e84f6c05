//! Ready-made problem models: thin producers of [`Csp`](crate::solver::csp::Csp)
//! instances. The engine does not depend on anything here.

pub mod futoshiki;
pub mod n_queens;
