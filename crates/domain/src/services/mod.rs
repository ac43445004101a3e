//! Domain services for the Todo service.
//!
//! Services contain business logic that operates on domain models.

pub mod in_memory;
pub mod todo;

pub use in_memory::InMemoryTodoRepository;
pub use todo::{apply_changes, TodoRepository, TodoService};
