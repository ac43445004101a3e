//! In-memory persistence gateway.
//!
//! Stands in for PostgreSQL in tests. It enforces the same
//! column limits as the `todos` table and assigns ids from a counter that
//! starts at 1, like an identity column.

use std::collections::BTreeMap;

use tokio::sync::Mutex;

use crate::error::RepositoryError;
use crate::models::todo::{Todo, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};
use crate::services::todo::TodoRepository;

#[derive(Debug, Default)]
struct Store {
    rows: BTreeMap<i64, Todo>,
    last_id: i64,
}

/// Todo gateway backed by an ordered map.
#[derive(Debug, Default)]
pub struct InMemoryTodoRepository {
    store: Mutex<Store>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored todos.
    pub async fn len(&self) -> usize {
        self.store.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn check_constraints(todo: &Todo) -> Result<(), RepositoryError> {
    if todo.title.chars().count() > MAX_TITLE_LENGTH {
        return Err(RepositoryError::Constraint(format!(
            "title exceeds {} characters",
            MAX_TITLE_LENGTH
        )));
    }

    if let Some(ref description) = todo.description {
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(RepositoryError::Constraint(format!(
                "description exceeds {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }
    }

    Ok(())
}

#[async_trait::async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store.rows.contains_key(&id))
    }

    async fn save(&self, mut todo: Todo) -> Result<Todo, RepositoryError> {
        check_constraints(&todo)?;

        let mut store = self.store.lock().await;
        let id = match todo.id {
            Some(id) if store.rows.contains_key(&id) => id,
            Some(id) => return Err(RepositoryError::NotFound(id)),
            None => {
                store.last_id += 1;
                store.last_id
            }
        };

        todo.id = Some(id);
        store.rows.insert(id, todo.clone());
        Ok(todo)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().await;
        store.rows.remove(&id);
        Ok(())
    }
}
