//! Persistence layer for the Todo service.
//!
//! This crate contains:
//! - Database connection management and migrations
//! - Entity definitions (database row mappings)
//! - The PostgreSQL todo gateway

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
