//! Todo domain model.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maximum title length, matching the `todos.title` column.
pub const MAX_TITLE_LENGTH: usize = 50;

/// Maximum description length, matching the `todos.description` column.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// A todo item.
///
/// `id` is `None` until the todo has been saved for the first time; storage
/// assigns it and it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Todo {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl Todo {
    /// Builds an unsaved todo from caller-supplied fields.
    pub fn new(input: TodoInput) -> Self {
        Self {
            id: None,
            title: input.title,
            description: input.description,
            completed: input.completed,
        }
    }
}

/// Caller-supplied fields for creating or replacing a todo.
///
/// Carries no `id`; an `id` key in a JSON body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct TodoInput {
    #[validate(length(max = 50, message = "Title must be at most 50 characters"))]
    pub title: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub completed: bool,
}

impl TodoInput {
    pub fn new(title: impl Into<String>, description: Option<&str>, completed: bool) -> Self {
        Self {
            title: title.into(),
            description: description.map(str::to_string),
            completed,
        }
    }
}
