//! Record store factory
//!
//! Creates the store selected by `[store] backend`.

use crate::adapters::grist::{GristClient, GristStore};
use crate::adapters::postgresql::{PostgreSQLClient, PostgreSQLStore};
use crate::adapters::store::RecordStore;
use crate::config::{PrefillConfig, StoreBackend};
use crate::domain::{PrefillError, Result};
use std::sync::Arc;

/// Create the record store of the configured backend
///
/// No connection is opened; use [`RecordStore::test_connection`] to check
/// reachability.
///
/// # Errors
///
/// Returns a configuration error if the backend section is missing or its
/// client cannot be created.
pub fn create_record_store(config: &PrefillConfig) -> Result<Arc<dyn RecordStore>> {
    let columns = config.column_map();

    match config.store.backend {
        StoreBackend::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                PrefillError::Configuration(
                    "postgresql configuration is required when store.backend = 'postgresql'"
                        .to_string(),
                )
            })?;

            tracing::debug!(table = %pg_config.table, "Creating PostgreSQL store");
            let client = PostgreSQLClient::new(pg_config.clone())?;
            Ok(Arc::new(PostgreSQLStore::new(client, columns)))
        }
        StoreBackend::Grist => {
            let grist_config = config.grist.as_ref().ok_or_else(|| {
                PrefillError::Configuration(
                    "grist configuration is required when store.backend = 'grist'".to_string(),
                )
            })?;

            tracing::debug!(
                doc_id = %grist_config.doc_id,
                table_id = %grist_config.table_id,
                "Creating Grist store"
            );
            let client = GristClient::new(grist_config.clone())?;
            Ok(Arc::new(GristStore::new(client, columns)))
        }
    }
}
