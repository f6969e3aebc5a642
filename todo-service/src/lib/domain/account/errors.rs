use thiserror::Error;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid user ID format: {0}")]
    InvalidFormat(String),
}

/// Error for AccountName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountNameError {
    #[error("Name must be at least {min} characters long")]
    TooShort { min: usize, actual: usize },

    #[error("Name must not exceed {max} characters")]
    TooLong { max: usize, actual: usize },

    #[error("Name should only contain letters and spaces")]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email is not valid: {0}")]
    InvalidFormat(String),
}

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters long")]
    TooShort { min: usize },

    #[error("Password must contain at least one uppercase letter, one lowercase letter, and one number")]
    MissingCharacterClass,
}

/// Top-level error for all account-related operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("{0}")]
    InvalidAccountId(#[from] AccountIdError),

    #[error("{0}")]
    InvalidName(#[from] AccountNameError),

    #[error("{0}")]
    InvalidEmail(#[from] EmailError),

    #[error("{0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("{0}")]
    Validation(String),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Email is already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
