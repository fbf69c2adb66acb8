//! PostgreSQL record store
//!
//! Reads mobility applications from a relational table, one connection per
//! operation.

pub mod client;
pub mod store;

pub use client::PostgreSQLClient;
pub use store::PostgreSQLStore;
