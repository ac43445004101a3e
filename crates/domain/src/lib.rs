//! Domain layer for the Todo service.
//!
//! This crate contains:
//! - Domain models (Todo, TodoInput)
//! - The todo service and its persistence gateway trait
//! - Domain error types

pub mod error;
pub mod models;
pub mod services;
