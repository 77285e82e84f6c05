pub mod constraint;
pub mod csp;
pub mod heuristics;
pub mod propagate;
pub mod search;
pub mod stats;
pub mod value;
pub mod variable;
pub mod work_list;
