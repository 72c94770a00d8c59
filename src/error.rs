use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required argument was empty or
    /// malformed, e.g. a match without patterns
    /// or a label without text.
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A builder operation was called out of
    /// sequence.
    #[error("{operation} is not allowed {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// An AST node that requires a symbolic name
    /// was built from a pattern element without
    /// one.
    #[error("Pattern element has no symbolic name")]
    MissingSymbolicName,
}
