//! Core business logic.
//!
//! # Modules
//!
//! - [`dates`] - Date normalization
//! - [`mapping`] - Raw store rows to canonical records
//! - [`resolver`] - Search keys to not-found / single / ambiguous outcomes
//! - [`prefill`] - Canonical records to pre-filled case links
//!
//! # Workflow
//!
//! 1. **Resolve**: query the store with the search key
//! 2. **Select**: on ambiguity, the caller picks one candidate
//! 3. **Map**: normalize the chosen row
//! 4. **Link**: create the pre-filled case and return its URL
//!
//! # Example
//!
//! ```rust,no_run
//! use dossier_prefill::adapters::store::create_record_store;
//! use dossier_prefill::config::load_config;
//! use dossier_prefill::core::prefill::PrefillLinkBuilder;
//! use dossier_prefill::core::resolver::{RecordResolver, ResolutionOutcome};
//! use dossier_prefill::domain::SearchKey;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("prefill.toml")?;
//! let resolver = RecordResolver::new(create_record_store(&config)?, config.mapping_policy());
//! let builder = PrefillLinkBuilder::new(config.provider.clone())?;
//!
//! let key = SearchKey::new("Dupont", Some("EPLEFPA Toulouse"), None)?;
//! if let ResolutionOutcome::Single(record) = resolver.resolve(&key).await? {
//!     println!("{}", builder.build_prefill_url(&record).await?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod dates;
pub mod mapping;
pub mod prefill;
pub mod resolver;
