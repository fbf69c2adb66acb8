//! Record store abstraction layer
//!
//! One trait, [`RecordStore`], implemented by the PostgreSQL and Grist
//! backends, and a factory choosing between them from configuration.

pub mod factory;
pub mod traits;

pub use factory::create_record_store;
pub use traits::{RecordStore, StoreFilter};
