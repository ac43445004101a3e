//! Todo endpoint handlers.
//!
//! Thin mapping of the todo service onto REST verbs. Absent todos become 404
//! here and nowhere else.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::middleware::metrics::{record_todo_created, record_todo_deleted};
use domain::models::{Todo, TodoInput};

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Todo {} not found", id))
}

/// List all todos.
///
/// GET /api/v1/todos
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.todos.list_all().await?;
    Ok(Json(todos))
}

/// Get a single todo.
///
/// GET /api/v1/todos/:id
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, ApiError> {
    state
        .todos
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Create a todo.
///
/// POST /api/v1/todos
pub async fn create_todo(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TodoInput>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = state.todos.create(request).await?;
    record_todo_created();
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Replace title, description and completed on a todo.
///
/// PUT /api/v1/todos/:id
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<TodoInput>,
) -> Result<Json<Todo>, ApiError> {
    state
        .todos
        .update(id, request)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Delete a todo.
///
/// DELETE /api/v1/todos/:id
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.todos.delete(id).await? {
        return Err(not_found(id));
    }

    record_todo_deleted();
    Ok(StatusCode::NO_CONTENT)
}
