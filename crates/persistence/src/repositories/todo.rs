//! PostgreSQL todo gateway.

use sqlx::PgPool;

use domain::error::RepositoryError;
use domain::models::Todo;
use domain::services::TodoRepository;

use crate::entities::TodoEntity;
use crate::metrics::QueryTimer;

/// Todo gateway over the `todos` table.
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    /// Creates a new PgTodoRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, todo: &Todo) -> Result<TodoEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_todo");
        let result = sqlx::query_as::<_, TodoEntity>(
            r#"
            INSERT INTO todos (title, description, completed)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, completed
            "#,
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Overwrites every mutable column. Fails with `RowNotFound` when the
    /// row is gone.
    async fn overwrite(&self, id: i64, todo: &Todo) -> Result<TodoEntity, sqlx::Error> {
        let timer = QueryTimer::new("update_todo");
        let result = sqlx::query_as::<_, TodoEntity>(
            r#"
            UPDATE todos SET
                title = $2,
                description = $3,
                completed = $4
            WHERE id = $1
            RETURNING id, title, description, completed
            "#,
        )
        .bind(id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[async_trait::async_trait]
impl TodoRepository for PgTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError> {
        let timer = QueryTimer::new("find_all_todos");
        let result = sqlx::query_as::<_, TodoEntity>(
            r#"
            SELECT id, title, description, completed
            FROM todos
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Todo::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, RepositoryError> {
        let timer = QueryTimer::new("find_todo_by_id");
        let result = sqlx::query_as::<_, TodoEntity>(
            r#"
            SELECT id, title, description, completed
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Todo::from))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        let timer = QueryTimer::new("todo_exists_by_id");
        let result: Result<(bool,), sqlx::Error> = sqlx::query_as(
            r#"
            SELECT EXISTS(SELECT 1 FROM todos WHERE id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.0)
    }

    async fn save(&self, todo: Todo) -> Result<Todo, RepositoryError> {
        let entity = match todo.id {
            Some(id) => self.overwrite(id, &todo).await?,
            None => self.insert(&todo).await?,
        };
        tracing::debug!(todo_id = entity.id, "Todo row saved");
        Ok(entity.into())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let timer = QueryTimer::new("delete_todo_by_id");
        let result = sqlx::query(
            r#"
            DELETE FROM todos WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await;
        timer.record();
        let rows = result?.rows_affected();
        tracing::debug!(todo_id = id, rows, "Todo row deleted");
        Ok(())
    }
}
