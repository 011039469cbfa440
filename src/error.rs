use thiserror::Error;

/// Everything that can go wrong while loading source into a [`RuntimeImage`](
/// crate::RuntimeImage). All fatal for the load; no partial image is kept
/// (spec.md §7).
#[derive(Error, Clone, PartialEq, Debug)]
pub enum LoadError {
    #[error("source could not be read")]
    FileUnreadable,

    #[error("source is too large for the configured arena")]
    SourceTooLarge,

    #[error("{line}: name is longer than {limit} characters")]
    NameTooLong { line: u32, limit: usize },

    #[error("{line}: function declares more than {limit} variables")]
    TooManyVariables { line: u32, limit: usize },

    #[error("{line}: image would exceed {limit} functions")]
    TooManyFunctions { line: u32, limit: usize },

    #[error("{line}: unexpected token: {what}")]
    UnexpectedToken { line: u32, what: String },

    #[error("{line}: unresolved variable `{name}'")]
    UnresolvedVariable { line: u32, name: String },

    #[error("{line}: unbalanced parentheses in expression")]
    UnbalancedParens { line: u32 },

    #[error("{line}: expression nests more than {limit} values deep")]
    ExpressionTooDeep { line: u32, limit: usize },
}

/// Everything [`call`](crate::call) can return that isn't success.
#[derive(Error, Clone, Copy, PartialEq, Eq, Debug)]
pub enum CallError {
    #[error("function not found")]
    NotFound,
}
