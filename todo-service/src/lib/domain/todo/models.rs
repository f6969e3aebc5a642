use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::models::AccountId;
use crate::domain::todo::errors::TodoDescriptionError;
use crate::domain::todo::errors::TodoIdError;
use crate::domain::todo::errors::TodoStatusError;
use crate::domain::todo::errors::TodoTitleError;

/// Todo unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub Uuid);

impl TodoId {
    /// Generate a new random todo ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a todo ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TodoIdError> {
        Uuid::parse_str(s)
            .map(TodoId)
            .map_err(|e| TodoIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Todo aggregate.
///
/// `owner` is set once from the authenticated account at creation and never
/// reassigned.
#[derive(Debug, Clone)]
pub struct Todo {
    pub id: TodoId,
    pub title: TodoTitle,
    pub description: TodoDescription,
    pub status: TodoStatus,
    pub created_at: DateTime<Utc>,
    pub owner: AccountId,
}

impl Todo {
    pub fn is_owned_by(&self, account: &AccountId) -> bool {
        self.owner == *account
    }
}

/// Todo title, stored lowercase, 5-100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    const MIN_LENGTH: usize = 5;
    const MAX_LENGTH: usize = 100;

    /// Create a normalized, validated title.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 5 characters
    /// * `TooLong` - More than 100 characters
    pub fn new(title: String) -> Result<Self, TodoTitleError> {
        let title = title.to_lowercase();
        let length = title.chars().count();
        if length < Self::MIN_LENGTH {
            Err(TodoTitleError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(TodoTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Todo description, stored lowercase, 10-500 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDescription(String);

impl TodoDescription {
    const MIN_LENGTH: usize = 10;
    const MAX_LENGTH: usize = 500;

    /// Create a normalized, validated description.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 10 characters
    /// * `TooLong` - More than 500 characters
    pub fn new(description: String) -> Result<Self, TodoDescriptionError> {
        let description = description.to_lowercase();
        let length = description.chars().count();
        if length < Self::MIN_LENGTH {
            Err(TodoDescriptionError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(TodoDescriptionError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(description))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Todo lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TodoStatus {
    #[default]
    Pending,
    Completed,
    Deleted,
}

impl TodoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Pending => "pending",
            TodoStatus::Completed => "completed",
            TodoStatus::Deleted => "deleted",
        }
    }
}

impl FromStr for TodoStatus {
    type Err = TodoStatusError;

    /// Parse a status case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TodoStatus::Pending),
            "completed" => Ok(TodoStatus::Completed),
            "deleted" => Ok(TodoStatus::Deleted),
            _ => Err(TodoStatusError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether todo reads and writes by id are restricted to the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnershipPolicy {
    /// Any authenticated account may read, update or delete any todo.
    #[default]
    Unenforced,
    /// Only the owner may read, update or delete a todo.
    OwnerOnly,
}

impl From<bool> for OwnershipPolicy {
    fn from(enforce: bool) -> Self {
        if enforce {
            OwnershipPolicy::OwnerOnly
        } else {
            OwnershipPolicy::Unenforced
        }
    }
}

/// Command to create a todo for the authenticated account
#[derive(Debug)]
pub struct CreateTodoCommand {
    pub title: TodoTitle,
    pub description: TodoDescription,
    pub status: TodoStatus,
}

/// Command to update an existing todo.
///
/// All fields are optional; an empty command leaves the todo unchanged.
#[derive(Debug, Default)]
pub struct UpdateTodoCommand {
    pub title: Option<TodoTitle>,
    pub description: Option<TodoDescription>,
    pub status: Option<TodoStatus>,
}

impl UpdateTodoCommand {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}
