//! CLI command implementations

pub mod check;
pub mod departures;
pub mod init;
pub mod institutions;
pub mod search;
pub mod validate;

use crate::adapters::store::create_record_store;
use crate::cli::exit_code;
use crate::config::{load_config, PrefillConfig};
use crate::core::resolver::RecordResolver;
use crate::domain::PrefillError;

/// Loads the configuration, printing the failure
fn load_or_report(config_path: &str) -> Option<PrefillConfig> {
    match load_config(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            println!("❌ Failed to load configuration file");
            println!("   Error: {e}");
            None
        }
    }
}

/// Builds a resolver over the configured store
fn resolver_for(config: &PrefillConfig) -> Result<RecordResolver, PrefillError> {
    let store = create_record_store(config)?;
    Ok(RecordResolver::new(store, config.mapping_policy()))
}

/// Prints an error and returns its exit code
fn report(error: &PrefillError) -> i32 {
    crate::log_error_with_context!(error, "Command failed");
    println!("❌ {error}");
    exit_code(error)
}
