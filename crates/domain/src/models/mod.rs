//! Domain models for the Todo service.

pub mod todo;

pub use todo::{Todo, TodoInput, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};
