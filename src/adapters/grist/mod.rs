//! Grist record store
//!
//! Reads mobility applications from a Grist document table over its REST API.

pub mod client;
pub mod models;
pub mod store;

pub use client::GristClient;
pub use models::{GristRecord, RecordsResponse};
pub use store::GristStore;
