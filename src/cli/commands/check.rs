//! Check command implementation
//!
//! Verifies that the configured store answers and that a provider token is
//! present. The provider itself is not contacted: any call creates a case.

use super::{load_or_report, report};
use crate::adapters::store::create_record_store;
use crate::core::prefill::PrefillLinkBuilder;
use clap::Args;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {}

impl CheckArgs {
    /// Execute the check command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(config) = load_or_report(config_path) else {
            return Ok(2);
        };

        println!("🔌 Checking record store ({})", config.store.backend);
        let store = match create_record_store(&config) {
            Ok(store) => store,
            Err(e) => return Ok(report(&e)),
        };

        if let Err(e) = store.test_connection().await {
            return Ok(report(&e));
        }
        println!("✅ Record store reachable");

        let builder = match PrefillLinkBuilder::new(config.provider.clone()) {
            Ok(b) => b,
            Err(e) => return Ok(report(&e)),
        };
        if builder.has_token() {
            println!(
                "✅ Provider token configured for procedure {}",
                config.provider.procedure_id
            );
        } else {
            println!("⚠️  No provider token configured; --link will fail");
        }

        Ok(0)
    }
}
