// Dossier Prefill - Learner Mobility Records to Pre-filled Cases
// Copyright (c) 2025 Dossier Prefill Contributors
// Licensed under the MIT License

//! # Dossier Prefill
//!
//! Finds an Erasmus learner-mobility record in a PostgreSQL table or a Grist
//! document, normalizes it, and creates a pre-filled case on Démarches
//! Simplifiées, returning the case URL to hand over to the learner.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Resolving** a learner from a last name, an institution and/or a case
//!   number, reporting why nothing matched or listing candidates when several do
//! - **Mapping** backend-specific rows to one canonical record under a named,
//!   versioned mapping policy
//! - **Linking** a canonical record to a newly created pre-filled case
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (dates, mapping, resolution, prefill)
//! - [`adapters`] - Record stores (PostgreSQL, Grist)
//! - [`domain`] - Identifiers, records, search keys and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dossier_prefill::adapters::store::create_record_store;
//! use dossier_prefill::config::load_config;
//! use dossier_prefill::core::prefill::PrefillLinkBuilder;
//! use dossier_prefill::core::resolver::{RecordResolver, ResolutionOutcome};
//! use dossier_prefill::domain::SearchKey;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("prefill.toml")?;
//!     let store = create_record_store(&config)?;
//!     let resolver = RecordResolver::new(store, config.mapping_policy());
//!
//!     let key = SearchKey::new("Dupont", None, Some("#12345"))?;
//!     match resolver.resolve(&key).await? {
//!         ResolutionOutcome::Single(record) => {
//!             let builder = PrefillLinkBuilder::new(config.provider.clone())?;
//!             println!("{}", builder.build_prefill_url(&record).await?);
//!         }
//!         ResolutionOutcome::Ambiguous(candidates) => {
//!             let chosen = resolver.select(&candidates, "12345")?;
//!             println!("{} {}", chosen.first_name, chosen.last_name);
//!         }
//!         ResolutionOutcome::NotFound(reason) => println!("{reason}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`]. Each
//! [`domain::PrefillError`] has an [`domain::ErrorKind`], which the CLI maps
//! to its exit code.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
