use async_trait::async_trait;

use crate::domain::account::models::AccountId;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;

/// Port for todo domain service operations.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// Create a todo owned by the authenticated account.
    ///
    /// # Arguments
    /// * `owner` - Authenticated account; never taken from the request body
    /// * `command` - Validated, normalized fields
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_todo(
        &self,
        owner: AccountId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// List the todos owned by an account.
    ///
    /// # Errors
    /// * `NoTodosFound` - The account owns no todos
    /// * `DatabaseError` - Database operation failed
    async fn list_todos_by_owner(&self, owner: &AccountId) -> Result<Vec<Todo>, TodoError>;

    /// Retrieve todo by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `Forbidden` - Ownership is enforced and the caller is not the owner
    /// * `DatabaseError` - Database operation failed
    async fn get_todo(&self, id: &TodoId, caller: &AccountId) -> Result<Todo, TodoError>;

    /// Apply the provided fields to a todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `Forbidden` - Ownership is enforced and the caller is not the owner
    /// * `DatabaseError` - Database operation failed
    async fn update_todo(
        &self,
        id: &TodoId,
        caller: &AccountId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// Delete a todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `Forbidden` - Ownership is enforced and the caller is not the owner
    /// * `DatabaseError` - Database operation failed
    async fn delete_todo(&self, id: &TodoId, caller: &AccountId) -> Result<(), TodoError>;
}

/// Persistence operations for todo aggregate.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Persist a new todo.
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Retrieve todo by identifier.
    ///
    /// # Returns
    /// Optional todo (None if not found)
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError>;

    /// Retrieve every todo owned by an account, oldest first.
    async fn find_by_owner(&self, owner: &AccountId) -> Result<Vec<Todo>, TodoError>;

    /// Write title, description and status of an existing todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Remove a todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    async fn delete(&self, id: &TodoId) -> Result<(), TodoError>;
}
