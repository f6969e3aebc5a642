use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::todo::models::Todo;

pub mod create_todo;
pub mod delete_todo;
pub mod get_todo;
pub mod list_todos;
pub mod update_todo;

pub use create_todo::create_todo;
pub use delete_todo::delete_todo;
pub use get_todo::get_todo;
pub use list_todos::list_todos;
pub use update_todo::update_todo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub owner: String,
}

impl From<&Todo> for TodoData {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            title: todo.title.as_str().to_string(),
            description: todo.description.as_str().to_string(),
            status: todo.status.as_str().to_string(),
            created_at: todo.created_at,
            owner: todo.owner.to_string(),
        }
    }
}
