use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::TodoError;
use super::models::CreateTodoCommand;
use super::models::OwnershipPolicy;
use super::models::Todo;
use super::models::TodoId;
use super::models::UpdateTodoCommand;
use super::ports::TodoRepository;
use super::ports::TodoServicePort;
use crate::domain::account::models::AccountId;

/// Concrete implementation of TodoServicePort.
///
/// Reads and writes by id are open to any authenticated account unless the
/// service is built with `OwnershipPolicy::OwnerOnly`.
pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    todo_repository: Arc<TR>,
    ownership: OwnershipPolicy,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    pub fn new(todo_repository: Arc<TR>, ownership: OwnershipPolicy) -> Self {
        Self {
            todo_repository,
            ownership,
        }
    }

    async fn load(&self, id: &TodoId, caller: &AccountId) -> Result<Todo, TodoError> {
        let todo = self
            .todo_repository
            .find_by_id(id)
            .await?
            .ok_or(TodoError::NotFound(id.to_string()))?;

        match self.ownership {
            OwnershipPolicy::OwnerOnly if !todo.is_owned_by(caller) => Err(TodoError::Forbidden(
                "You can only access your own todos.".to_string(),
            )),
            _ => Ok(todo),
        }
    }
}

#[async_trait]
impl<TR> TodoServicePort for TodoService<TR>
where
    TR: TodoRepository,
{
    async fn create_todo(
        &self,
        owner: AccountId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let todo = Todo {
            id: TodoId::new(),
            title: command.title,
            description: command.description,
            status: command.status,
            created_at: Utc::now(),
            owner,
        };

        let created = self.todo_repository.create(todo).await?;
        tracing::debug!(todo_id = %created.id, owner = %created.owner, "Todo created");

        Ok(created)
    }

    async fn list_todos_by_owner(&self, owner: &AccountId) -> Result<Vec<Todo>, TodoError> {
        let todos = self.todo_repository.find_by_owner(owner).await?;

        if todos.is_empty() {
            return Err(TodoError::NoTodosFound);
        }

        Ok(todos)
    }

    async fn get_todo(&self, id: &TodoId, caller: &AccountId) -> Result<Todo, TodoError> {
        self.load(id, caller).await
    }

    async fn update_todo(
        &self,
        id: &TodoId,
        caller: &AccountId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.load(id, caller).await?;

        if command.is_empty() {
            return Ok(todo);
        }

        if let Some(title) = command.title {
            todo.title = title;
        }

        if let Some(description) = command.description {
            todo.description = description;
        }

        if let Some(status) = command.status {
            todo.status = status;
        }

        self.todo_repository.update(todo).await
    }

    async fn delete_todo(&self, id: &TodoId, caller: &AccountId) -> Result<(), TodoError> {
        if self.ownership == OwnershipPolicy::OwnerOnly {
            self.load(id, caller).await?;
        }

        self.todo_repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::todo::models::TodoDescription;
    use crate::domain::todo::models::TodoStatus;
    use crate::domain::todo::models::TodoTitle;

    mock! {
        pub TestTodoRepository {}

        #[async_trait]
        impl TodoRepository for TestTodoRepository {
            async fn create(&self, todo: Todo) -> Result<Todo, TodoError>;
            async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError>;
            async fn find_by_owner(&self, owner: &AccountId) -> Result<Vec<Todo>, TodoError>;
            async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;
            async fn delete(&self, id: &TodoId) -> Result<(), TodoError>;
        }
    }

    fn todo_owned_by(owner: AccountId) -> Todo {
        Todo {
            id: TodoId::new(),
            title: TodoTitle::new("buy milk".to_string()).unwrap(),
            description: TodoDescription::new("two litres, semi skimmed".to_string()).unwrap(),
            status: TodoStatus::Pending,
            created_at: Utc::now(),
            owner,
        }
    }

    #[tokio::test]
    async fn test_create_todo_sets_owner_from_identity() {
        let owner = AccountId::new();

        let mut repository = MockTestTodoRepository::new();
        repository
            .expect_create()
            .withf(move |todo| {
                todo.owner == owner
                    && todo.title.as_str() == "buy milk"
                    && todo.status == TodoStatus::Pending
            })
            .times(1)
            .returning(|todo| Ok(todo));

        let service = TodoService::new(Arc::new(repository), OwnershipPolicy::Unenforced);

        let command = CreateTodoCommand {
            title: TodoTitle::new("Buy Milk".to_string()).unwrap(),
            description: TodoDescription::new("Two litres, semi skimmed".to_string()).unwrap(),
            status: TodoStatus::default(),
        };

        let todo = service.create_todo(owner, command).await.unwrap();
        assert_eq!(todo.owner, owner);
        assert_eq!(todo.description.as_str(), "two litres, semi skimmed");
    }

    #[tokio::test]
    async fn test_list_todos_empty_is_an_error() {
        let mut repository = MockTestTodoRepository::new();
        repository
            .expect_find_by_owner()
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = TodoService::new(Arc::new(repository), OwnershipPolicy::Unenforced);

        let result = service.list_todos_by_owner(&AccountId::new()).await;
        assert!(matches!(result, Err(TodoError::NoTodosFound)));
    }

    #[tokio::test]
    async fn test_list_todos_by_owner() {
        let owner = AccountId::new();
        let todos = vec![todo_owned_by(owner), todo_owned_by(owner)];

        let mut repository = MockTestTodoRepository::new();
        repository
            .expect_find_by_owner()
            .withf(move |id| *id == owner)
            .times(1)
            .returning(move |_| Ok(todos.clone()));

        let service = TodoService::new(Arc::new(repository), OwnershipPolicy::Unenforced);

        let result = service.list_todos_by_owner(&owner).await.unwrap();
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_get_todo_not_found() {
        let mut repository = MockTestTodoRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = TodoService::new(Arc::new(repository), OwnershipPolicy::Unenforced);

        let result = service.get_todo(&TodoId::new(), &AccountId::new()).await;
        assert!(matches!(result, Err(TodoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_todo_of_another_account_when_unenforced() {
        let todo = todo_owned_by(AccountId::new());
        let todo_id = todo.id;

        let mut repository = MockTestTodoRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(todo.clone())));

        let service = TodoService::new(Arc::new(repository), OwnershipPolicy::Unenforced);

        let result = service.get_todo(&todo_id, &AccountId::new()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_todo_of_another_account_when_owner_only() {
        let todo = todo_owned_by(AccountId::new());
        let todo_id = todo.id;

        let mut repository = MockTestTodoRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(todo.clone())));
        repository.expect_update().times(0);

        let service = TodoService::new(Arc::new(repository), OwnershipPolicy::OwnerOnly);

        let command = UpdateTodoCommand {
            status: Some(TodoStatus::Completed),
            ..Default::default()
        };
        let result = service
            .update_todo(&todo_id, &AccountId::new(), command)
            .await;
        assert!(matches!(result, Err(TodoError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_update_todo_status() {
        let owner = AccountId::new();
        let todo = todo_owned_by(owner);
        let todo_id = todo.id;

        let mut repository = MockTestTodoRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(todo.clone())));
        repository
            .expect_update()
            .withf(|todo| todo.status == TodoStatus::Completed && todo.title.as_str() == "buy milk")
            .times(1)
            .returning(|todo| Ok(todo));

        let service = TodoService::new(Arc::new(repository), OwnershipPolicy::OwnerOnly);

        let command = UpdateTodoCommand {
            status: Some(TodoStatus::Completed),
            ..Default::default()
        };
        let updated = service.update_todo(&todo_id, &owner, command).await.unwrap();
        assert_eq!(updated.status, TodoStatus::Completed);
    }

    #[tokio::test]
    async fn test_empty_update_returns_current_todo() {
        let todo = todo_owned_by(AccountId::new());
        let todo_id = todo.id;

        let mut repository = MockTestTodoRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(todo.clone())));
        repository.expect_update().times(0);

        let service = TodoService::new(Arc::new(repository), OwnershipPolicy::Unenforced);

        let result = service
            .update_todo(&todo_id, &AccountId::new(), UpdateTodoCommand::default())
            .await
            .unwrap();
        assert_eq!(result.id, todo_id);
    }

    #[tokio::test]
    async fn test_delete_todo_unenforced_skips_lookup() {
        let todo_id = TodoId::new();

        let mut repository = MockTestTodoRepository::new();
        repository.expect_find_by_id().times(0);
        repository
            .expect_delete()
            .withf(move |id| *id == todo_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = TodoService::new(Arc::new(repository), OwnershipPolicy::Unenforced);

        assert!(service
            .delete_todo(&todo_id, &AccountId::new())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_delete_todo_not_found() {
        let mut repository = MockTestTodoRepository::new();
        repository
            .expect_delete()
            .times(1)
            .returning(|id| Err(TodoError::NotFound(id.to_string())));

        let service = TodoService::new(Arc::new(repository), OwnershipPolicy::Unenforced);

        let result = service.delete_todo(&TodoId::new(), &AccountId::new()).await;
        assert!(matches!(result, Err(TodoError::NotFound(_))));
    }
}
