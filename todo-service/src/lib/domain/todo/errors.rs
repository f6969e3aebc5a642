use thiserror::Error;

/// Error type for TodoId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoIdError {
    #[error("Invalid todo ID format: {0}")]
    InvalidFormat(String),
}

/// Error type for TodoTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoTitleError {
    #[error("Title must be at least {min} characters long.")]
    TooShort { min: usize, actual: usize },

    #[error("Title must not exceed {max} characters.")]
    TooLong { max: usize, actual: usize },
}

/// Error type for TodoDescription validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDescriptionError {
    #[error("Description must be at least {min} characters long.")]
    TooShort { min: usize, actual: usize },

    #[error("Description must not exceed {max} characters.")]
    TooLong { max: usize, actual: usize },
}

/// Error type for TodoStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoStatusError {
    #[error("Status must be one of pending, completed, deleted (got `{0}`).")]
    Unknown(String),
}

/// Top-level error type for all todo-related operations
#[derive(Debug, Clone, Error)]
pub enum TodoError {
    #[error("{0}")]
    InvalidTodoId(#[from] TodoIdError),

    #[error("{0}")]
    InvalidTitle(#[from] TodoTitleError),

    #[error("{0}")]
    InvalidDescription(#[from] TodoDescriptionError),

    #[error("{0}")]
    InvalidStatus(#[from] TodoStatusError),

    #[error("{0}")]
    Validation(String),

    #[error("Todo not found: {0}")]
    NotFound(String),

    #[error("No todos found for this user.")]
    NoTodosFound,

    #[error("{0}")]
    Forbidden(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
