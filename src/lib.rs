//! agora - a layered discussion-forum REST backend
//!
//! Request flow: delivery (`rest_api`) parses HTTP input, use cases
//! (`usecase`) resolve identifiers and enforce existence invariants,
//! the pagination planner (`pagination`) composes the query text, and
//! the storage layer (`storage`) executes it against PostgreSQL.

pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod pagination;
pub mod rest_api;
pub mod storage;
pub mod usecase;
