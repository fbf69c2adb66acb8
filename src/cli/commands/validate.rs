//! Validate config command implementation
//!
//! This module implements the `validate-config` command. Loading already
//! validates, so a loaded configuration is a valid one; the command prints
//! a summary with secrets masked.

use crate::config::{load_config, PrefillConfig, StoreBackend};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        for line in summary(&config) {
            println!("{line}");
        }
        println!();
        Ok(0)
    }
}

/// Host part of a connection string, credentials dropped
fn mask_connection_string(connection_string: &str) -> &str {
    match connection_string.rsplit_once('@') {
        Some((_, host)) => host,
        None => "***",
    }
}

fn summary(config: &PrefillConfig) -> Vec<String> {
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Store Backend: {}", config.store.backend),
    ];

    match config.store.backend {
        StoreBackend::PostgreSQL => {
            if let Some(ref pg) = config.postgresql {
                lines.push(format!(
                    "  PostgreSQL Connection: {}",
                    mask_connection_string(pg.connection_string.expose_secret().as_ref())
                ));
                lines.push(format!("  PostgreSQL Table: {}", pg.table));
            }
        }
        StoreBackend::Grist => {
            if let Some(ref grist) = config.grist {
                lines.push(format!("  Grist Server: {}", grist.server));
                lines.push(format!("  Grist Document: {}", grist.doc_id));
                lines.push(format!("  Grist Table: {}", grist.table_id));
            }
        }
    }

    lines.push(format!("  Provider: {}", config.provider.base_url));
    lines.push(format!("  Procedure: {}", config.provider.procedure_id));
    lines.push(format!(
        "  Provider Token: {}",
        if config.provider.api_token.is_some() {
            "configured"
        } else {
            "missing"
        }
    ));
    lines.push(format!("  Mapping Policy: {}", config.mapping_policy().id()));
    lines.push(format!(
        "  File Logging: {}",
        if config.logging.local_enabled {
            config.logging.local_path.as_str()
        } else {
            "disabled"
        }
    ));
    lines
}
