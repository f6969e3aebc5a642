use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::account::models::AccountId;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoStatus;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoRepository;

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_todo(row: &PgRow) -> Result<Todo, TodoError> {
        let decode = |e: sqlx::Error| TodoError::DatabaseError(e.to_string());
        let status: String = row.try_get("status").map_err(decode)?;

        Ok(Todo {
            id: TodoId(row.try_get("id").map_err(decode)?),
            title: TodoTitle::new(row.try_get("title").map_err(decode)?)?,
            description: TodoDescription::new(row.try_get("description").map_err(decode)?)?,
            status: status.parse::<TodoStatus>()?,
            created_at: row.try_get("created_at").map_err(decode)?,
            owner: AccountId(row.try_get("owner_id").map_err(decode)?),
        })
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError> {
        sqlx::query(
            r#"
            INSERT INTO todos (id, title, description, status, created_at, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(todo.id.as_uuid())
        .bind(todo.title.as_str())
        .bind(todo.description.as_str())
        .bind(todo.status.as_str())
        .bind(todo.created_at)
        .bind(todo.owner.0)
        .execute(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        Ok(todo)
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, status, created_at, owner_id
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_todo).transpose()
    }

    async fn find_by_owner(&self, owner: &AccountId) -> Result<Vec<Todo>, TodoError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, status, created_at, owner_id
            FROM todos
            WHERE owner_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_todo).collect()
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET title = $2, description = $3, status = $4
            WHERE id = $1
            "#,
        )
        .bind(todo.id.as_uuid())
        .bind(todo.title.as_str())
        .bind(todo.description.as_str())
        .bind(todo.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(todo.id.to_string()));
        }

        Ok(todo)
    }

    async fn delete(&self, id: &TodoId) -> Result<(), TodoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
