pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while constructing or mutating a problem model.
///
/// Search dead ends are not errors: propagation failure and search exhaustion
/// are reported through ordinary return values. Every variant here indicates
/// a broken model or a caller bug, not an unsatisfiable problem.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("constraint `{constraint}` references variable id {variable}, but only {registered} variables are registered")]
    UnknownVariable {
        constraint: String,
        variable: usize,
        registered: usize,
    },

    #[error("constraint `{constraint}` has arity {expected}, but a satisfying tuple of length {got} was supplied")]
    ArityMismatch {
        constraint: String,
        expected: usize,
        got: usize,
    },

    #[error("board row {row} has a relation sign at cell position {position}")]
    MisplacedSign { row: usize, position: usize },

    #[error("pruned a value that is not in the current domain of variable `{variable}`")]
    DuplicatePrune { variable: String },

    #[error("restored a value that was never pruned from variable `{variable}`")]
    RestoreUnpruned { variable: String },
}
