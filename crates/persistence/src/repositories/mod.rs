//! Repository implementations for database operations.

pub mod todo;

pub use todo::PgTodoRepository;
