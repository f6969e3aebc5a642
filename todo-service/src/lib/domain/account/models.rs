use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::errors::AccountIdError;
use crate::domain::account::errors::AccountNameError;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::PasswordPolicyError;

/// Account aggregate entity.
///
/// `active_token` holds the only session token currently accepted for the
/// account; issuing a new one replaces it.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub name: AccountName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub active_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Check whether `token` is the account's current session token.
    pub fn holds_session(&self, token: &str) -> bool {
        self.active_token.as_deref() == Some(token)
    }
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }

    /// Allow an operation on this account only when the caller owns it.
    ///
    /// # Errors
    /// * `Forbidden` - Caller is a different account
    pub fn authorize_self_service(
        &self,
        caller: &AccountId,
        action: SelfServiceAction,
    ) -> Result<(), AccountError> {
        if self == caller {
            Ok(())
        } else {
            Err(AccountError::Forbidden(format!(
                "You can only {} your own account.",
                action.as_str()
            )))
        }
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Operations restricted to the account owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfServiceAction {
    Update,
    Delete,
}

impl SelfServiceAction {
    fn as_str(&self) -> &'static str {
        match self {
            SelfServiceAction::Update => "update",
            SelfServiceAction::Delete => "delete",
        }
    }
}

/// Display name value type
///
/// 5-255 characters, letters and spaces only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountName(String);

impl AccountName {
    const MIN_LENGTH: usize = 5;
    const MAX_LENGTH: usize = 255;

    /// Create a new valid name.
    ///
    /// Rules are checked in order and the first violation is returned.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 5 characters
    /// * `TooLong` - More than 255 characters
    /// * `InvalidCharacters` - Anything other than ASCII letters and spaces
    pub fn new(name: String) -> Result<Self, AccountNameError> {
        let name = Self::with_valid_length(name)?;
        let name = Self::with_valid_chars(name)?;
        Ok(Self(name))
    }

    fn with_valid_length(name: String) -> Result<String, AccountNameError> {
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(AccountNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(AccountNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(name)
        }
    }

    fn with_valid_chars(name: String) -> Result<String, AccountNameError> {
        if name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
            Ok(name)
        } else {
            Err(AccountNameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Lowercased, then validated with an RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated, lowercased email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfies the password policy.
///
/// Only lives long enough to be hashed; `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;

    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    /// * `MissingCharacterClass` - No digit, lowercase or uppercase letter
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_lower = password.chars().any(|c| c.is_lowercase());
        let has_upper = password.chars().any(|c| c.is_uppercase());
        if !(has_digit && has_lower && has_upper) {
            return Err(PasswordPolicyError::MissingCharacterClass);
        }

        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new account with validated fields
#[derive(Debug)]
pub struct RegisterAccountCommand {
    pub name: AccountName,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterAccountCommand {
    pub fn new(name: AccountName, email: EmailAddress, password: Password) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Command to update an existing account with optional validated fields.
///
/// Only provided fields will be updated. The session token is never part of
/// an update.
#[derive(Debug, Default)]
pub struct UpdateAccountCommand {
    pub name: Option<AccountName>,
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
}

/// Successful login: the freshly issued token and the account it belongs to.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub token: String,
    pub expires_in: i64,
    pub account: Account,
}
