//! Todo service and its persistence gateway.
//!
//! The service is stateless: every operation is an independent interaction
//! with the gateway, and "not found" is reported as `None`/`false` rather
//! than as an error.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::RepositoryError;
use crate::models::todo::{Todo, TodoInput};

/// Storage operations the todo service depends on.
#[async_trait::async_trait]
pub trait TodoRepository: Send + Sync {
    /// All stored todos, in storage-defined order.
    async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, RepositoryError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, RepositoryError>;

    /// Inserts the todo when `id` is `None` (storage assigns the id),
    /// otherwise overwrites the stored row with that id.
    async fn save(&self, todo: Todo) -> Result<Todo, RepositoryError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;
}

/// Returns `existing` with title, description and completed replaced by
/// `changes`. The id is kept.
pub fn apply_changes(existing: &Todo, changes: TodoInput) -> Todo {
    Todo {
        id: existing.id,
        title: changes.title,
        description: changes.description,
        completed: changes.completed,
    }
}

/// CRUD operations over todos.
#[derive(Clone)]
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_all(&self) -> Result<Vec<Todo>, RepositoryError> {
        self.repository.find_all().await
    }

    /// Returns `None` when no todo has this id.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Todo>, RepositoryError> {
        let todo = self.repository.find_by_id(id).await?;
        if todo.is_none() {
            debug!(todo_id = id, "Todo not found");
        }
        Ok(todo)
    }

    /// Persists a new todo and returns it with its storage-assigned id.
    pub async fn create(&self, input: TodoInput) -> Result<Todo, RepositoryError> {
        let saved = self.repository.save(Todo::new(input)).await?;
        info!(todo_id = ?saved.id, title = %saved.title, "Todo created");
        Ok(saved)
    }

    /// Overwrites title, description and completed on an existing todo.
    ///
    /// Returns `None` without writing anything when the id is unknown.
    pub async fn update(&self, id: i64, input: TodoInput) -> Result<Option<Todo>, RepositoryError> {
        let Some(existing) = self.repository.find_by_id(id).await? else {
            debug!(todo_id = id, "Todo not found, nothing to update");
            return Ok(None);
        };

        let saved = self.repository.save(apply_changes(&existing, input)).await?;
        info!(todo_id = id, completed = saved.completed, "Todo updated");
        Ok(Some(saved))
    }

    /// Deletes a todo, returning whether it existed.
    ///
    /// The existence check and the delete are separate gateway calls. A
    /// concurrent delete between them still yields `true` here.
    pub async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        if !self.repository.exists_by_id(id).await? {
            debug!(todo_id = id, "Todo not found, nothing to delete");
            return Ok(false);
        }

        self.repository.delete_by_id(id).await?;
        info!(todo_id = id, "Todo deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::in_memory::InMemoryTodoRepository;
    use fake::faker::lorem::en::Words;
    use fake::Fake;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts gateway calls on top of an in-memory store.
    #[derive(Default)]
    struct RecordingRepository {
        inner: InMemoryTodoRepository,
        find_by_id_calls: AtomicUsize,
        exists_calls: AtomicUsize,
        save_calls: AtomicUsize,
        delete_calls: AtomicUsize,
    }

    impl RecordingRepository {
        fn count(counter: &AtomicUsize) -> usize {
            counter.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl TodoRepository for RecordingRepository {
        async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError> {
            self.inner.find_all().await
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, RepositoryError> {
            self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_id(id).await
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
            self.exists_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.exists_by_id(id).await
        }

        async fn save(&self, todo: Todo) -> Result<Todo, RepositoryError> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.save(todo).await
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.delete_by_id(id).await
        }
    }

    /// Gateway whose every call fails, for error propagation checks.
    struct FailingRepository;

    #[async_trait::async_trait]
    impl TodoRepository for FailingRepository {
        async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError> {
            Err(sqlx::Error::PoolTimedOut.into())
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<Todo>, RepositoryError> {
            Err(sqlx::Error::PoolTimedOut.into())
        }

        async fn exists_by_id(&self, _id: i64) -> Result<bool, RepositoryError> {
            Err(sqlx::Error::PoolTimedOut.into())
        }

        async fn save(&self, _todo: Todo) -> Result<Todo, RepositoryError> {
            Err(sqlx::Error::PoolTimedOut.into())
        }

        async fn delete_by_id(&self, _id: i64) -> Result<(), RepositoryError> {
            Err(sqlx::Error::PoolTimedOut.into())
        }
    }

    fn service() -> (TodoService, Arc<RecordingRepository>) {
        let repository = Arc::new(RecordingRepository::default());
        (TodoService::new(repository.clone()), repository)
    }

    fn random_input() -> TodoInput {
        let words: Vec<String> = Words(1..4).fake();
        TodoInput::new(words.join(" "), Some("generated"), false)
    }

    fn buy_milk() -> TodoInput {
        TodoInput::new("Buy milk", Some("2% fat"), false)
    }

    #[test]
    fn test_apply_changes_replaces_mutable_fields() {
        let existing = Todo {
            id: Some(4),
            title: "Old Title".to_string(),
            description: Some("old".to_string()),
            completed: false,
        };

        let updated = apply_changes(&existing, TodoInput::new("New Title", None, true));

        assert_eq!(updated.id, Some(4));
        assert_eq!(updated.title, "New Title");
        assert_eq!(updated.description, None);
        assert!(updated.completed);
        // existing record is left untouched
        assert_eq!(existing.title, "Old Title");
    }

    #[tokio::test]
    async fn test_list_all_empty() {
        let (service, _) = service();
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_all_returns_all_todos() {
        let (service, _) = service();
        service.create(random_input()).await.unwrap();
        service.create(random_input()).await.unwrap();

        assert_eq!(service.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let (service, repository) = service();

        let created = service.create(buy_milk()).await.unwrap();

        assert_eq!(created.id, Some(1));
        assert_eq!(created.title, "Buy milk");
        assert_eq!(created.description.as_deref(), Some("2% fat"));
        assert!(!created.completed);
        assert_eq!(RecordingRepository::count(&repository.save_calls), 1);
    }

    #[tokio::test]
    async fn test_get_by_id_returns_created_todo() {
        let (service, _) = service();
        let input = random_input();

        let created = service.create(input.clone()).await.unwrap();
        let found = service
            .get_by_id(created.id.unwrap())
            .await
            .unwrap()
            .expect("todo should exist");

        assert_eq!(found, created);
        assert_eq!(found.title, input.title);
        assert_eq!(found.description, input.description);
        assert_eq!(found.completed, input.completed);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_returns_none() {
        let (service, repository) = service();

        assert!(service.get_by_id(1).await.unwrap().is_none());
        assert_eq!(RecordingRepository::count(&repository.find_by_id_calls), 1);
    }

    #[tokio::test]
    async fn test_update_existing_overwrites_fields() {
        let (service, repository) = service();
        service.create(buy_milk()).await.unwrap();

        let updated = service
            .update(1, TodoInput::new("Buy oat milk", Some(""), true))
            .await
            .unwrap()
            .expect("todo should exist");

        assert_eq!(updated.id, Some(1));
        assert_eq!(updated.title, "Buy oat milk");
        assert_eq!(updated.description.as_deref(), Some(""));
        assert!(updated.completed);
        assert_eq!(RecordingRepository::count(&repository.save_calls), 2);

        let stored = service.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored, updated);
        assert_eq!(service.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none_without_saving() {
        let (service, repository) = service();
        service.create(buy_milk()).await.unwrap();

        let result = service
            .update(42, TodoInput::new("New Title", None, true))
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(RecordingRepository::count(&repository.find_by_id_calls), 1);
        assert_eq!(RecordingRepository::count(&repository.save_calls), 1);
        assert_eq!(service.list_all().await.unwrap().len(), 1);
        assert_eq!(service.get_by_id(1).await.unwrap().unwrap().title, "Buy milk");
    }

    #[tokio::test]
    async fn test_delete_existing_returns_true() {
        let (service, repository) = service();
        service.create(buy_milk()).await.unwrap();

        assert!(service.delete(1).await.unwrap());
        assert_eq!(RecordingRepository::count(&repository.exists_calls), 1);
        assert_eq!(RecordingRepository::count(&repository.delete_calls), 1);
        assert!(service.get_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false_without_deleting() {
        let (service, repository) = service();
        service.create(buy_milk()).await.unwrap();

        assert!(!service.delete(2).await.unwrap());
        assert_eq!(RecordingRepository::count(&repository.exists_calls), 1);
        assert_eq!(RecordingRepository::count(&repository.delete_calls), 0);
        assert_eq!(service.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_update_delete_scenario() {
        let (service, _) = service();

        let created = service.create(buy_milk()).await.unwrap();
        assert_eq!(created.id, Some(1));

        let updated = service
            .update(1, TodoInput::new("Buy oat milk", Some(""), true))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, Some(1));
        assert_eq!(updated.title, "Buy oat milk");
        assert!(updated.completed);

        assert!(service.delete(1).await.unwrap());
        assert!(service.get_by_id(1).await.unwrap().is_none());
        assert!(!service.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_all_tracks_deletions() {
        let (service, _) = service();
        for _ in 0..3 {
            service.create(random_input()).await.unwrap();
        }

        service.delete(2).await.unwrap();

        let ids: Vec<i64> = service
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .filter_map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_storage_failures_propagate() {
        let service = TodoService::new(Arc::new(FailingRepository));

        assert!(matches!(
            service.list_all().await,
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        ));
        assert!(service.get_by_id(1).await.is_err());
        assert!(service.create(buy_milk()).await.is_err());
        assert!(service.update(1, buy_milk()).await.is_err());
        assert!(service.delete(1).await.is_err());
    }

    #[tokio::test]
    async fn test_create_surfaces_constraint_violation() {
        let (service, _) = service();
        let input = TodoInput::new("x".repeat(51), None, false);

        let result = service.create(input).await;

        assert!(matches!(result, Err(RepositoryError::Constraint(_))));
        assert!(service.list_all().await.unwrap().is_empty());
    }
}
