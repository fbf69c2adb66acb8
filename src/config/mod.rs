//! Configuration management.
//!
//! TOML configuration with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PREFILL_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [store]
//! backend = "grist"
//!
//! [grist]
//! server = "https://grist.numerique.gouv.fr"
//! api_key = "${GRIST_API_KEY}"
//! doc_id = "abc123"
//! table_id = "Table1"
//!
//! [provider]
//! procedure_id = "70018"
//! api_token = "${DS_API_TOKEN}"
//!
//! [mapping]
//! policy = "link"
//! ```
//!
//! Column names differing from the backend preset go under `[store.columns]`:
//!
//! ```toml
//! [store.columns]
//! institution = "eplefpa"
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use dossier_prefill::config::load_config;
//!
//! # fn example() {
//! match load_config("prefill.toml") {
//!     Ok(config) => println!("Store backend: {}", config.store.backend),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_from_str, DEFAULT_CONFIG_PATH};
pub use schema::{
    ApplicationConfig, GristConfig, LoggingConfig, MappingConfig, PostgreSQLConfig,
    PrefillConfig, ProviderConfig, StoreBackend, StoreConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
