//! External system integrations.
//!
//! - [`store`] - Record store abstraction (trait, filter, factory)
//! - [`postgresql`] - Relational table backend
//! - [`grist`] - Grist document backend
//!
//! The case provider client lives with the link builder in
//! [`crate::core::prefill`].
//!
//! # Example
//!
//! ```rust,no_run
//! use dossier_prefill::adapters::store::{create_record_store, StoreFilter};
//! use dossier_prefill::config::load_config;
//! use dossier_prefill::core::mapping::SourceField;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("prefill.toml")?;
//! let store = create_record_store(&config)?;
//!
//! let filter = StoreFilter::new().with(SourceField::LastName, "DUPONT");
//! let rows = store.query(&filter).await?;
//! println!("{} row(s)", rows.len());
//! # Ok(())
//! # }
//! ```

pub mod grist;
pub mod postgresql;
pub mod store;
