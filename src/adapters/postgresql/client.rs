//! PostgreSQL client implementation
//!
//! Every call opens its own connection and drops it when done; nothing is
//! pooled or shared between operations.

use crate::config::PostgreSQLConfig;
use crate::domain::{PrefillError, Result, StoreError};
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::error::SqlState;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls, Row};

/// PostgreSQL client
pub struct PostgreSQLClient {
    /// Parsed connection parameters
    pg_config: tokio_postgres::Config,

    config: PostgreSQLConfig,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// No connection is opened here.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the connection string cannot be parsed.
    pub fn new(config: PostgreSQLConfig) -> Result<Self> {
        let mut pg_config: tokio_postgres::Config = config
            .connection_string
            .expose_secret()
            .as_ref()
            .parse()
            .map_err(|e| {
                PrefillError::Configuration(format!("Invalid PostgreSQL connection string: {e}"))
            })?;
        pg_config.connect_timeout(Duration::from_secs(config.connection_timeout_seconds));

        Ok(Self { pg_config, config })
    }

    pub fn table(&self) -> &str {
        &self.config.table
    }

    /// Opens a fresh connection with the statement timeout applied
    async fn connect(&self) -> Result<Client> {
        let (client, connection) = self.pg_config.connect(NoTls).await.map_err(map_connect_error)?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!(error = %e, "PostgreSQL connection closed with error");
            }
        });

        let timeout_query = format!(
            "SET statement_timeout = {}",
            self.config.statement_timeout_seconds.saturating_mul(1000)
        );
        client.batch_execute(&timeout_query).await.map_err(|e| {
            StoreError::QueryFailed(format!("Failed to set statement timeout: {e}"))
        })?;

        Ok(client)
    }

    /// Test the connection to PostgreSQL
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.connect().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| StoreError::QueryFailed(format!("Connection test failed: {e}")))?;

        tracing::info!("PostgreSQL connection test successful");
        Ok(())
    }

    /// Execute a query and return rows
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or the query fails.
    pub async fn query(&self, query: &str, params: &[&(dyn ToSql + Sync)]) -> Result<Vec<Row>> {
        let client = self.connect().await?;

        client.query(query, params).await.map_err(map_query_error)
    }
}

fn map_connect_error(e: tokio_postgres::Error) -> PrefillError {
    let auth_codes = [
        SqlState::INVALID_PASSWORD,
        SqlState::INVALID_AUTHORIZATION_SPECIFICATION,
    ];
    match e.code() {
        Some(code) if auth_codes.contains(code) => {
            StoreError::AuthenticationFailed(e.to_string()).into()
        }
        _ => StoreError::ConnectionFailed(e.to_string()).into(),
    }
}

fn map_query_error(e: tokio_postgres::Error) -> PrefillError {
    match e.code() {
        Some(code) if *code == SqlState::QUERY_CANCELED => {
            StoreError::Timeout(format!("Statement timed out: {e}")).into()
        }
        _ => StoreError::QueryFailed(format!("Query failed: {e}")).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn config(connection_string: &str) -> PostgreSQLConfig {
        PostgreSQLConfig {
            connection_string: secret_string(connection_string.to_string()),
            table: "ENSFEA_ERASMIP".to_string(),
            connection_timeout_seconds: 5,
            statement_timeout_seconds: 30,
            ssl_mode: "prefer".to_string(),
        }
    }

    #[test]
    fn test_new_parses_connection_string() {
        let client = PostgreSQLClient::new(config("postgresql://u:p@localhost:5432/erasmus"));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().table(), "ENSFEA_ERASMIP");
    }

    #[test]
    fn test_new_rejects_garbage() {
        let result = PostgreSQLClient::new(config("postgresql://u:p@localhost:notaport/db"));
        assert!(matches!(result, Err(PrefillError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_connection_error() {
        let client = PostgreSQLClient::new(config("postgresql://u:p@127.0.0.1:1/erasmus")).unwrap();
        let err = client.test_connection().await.unwrap_err();
        assert!(matches!(
            err,
            PrefillError::Store(StoreError::ConnectionFailed(_))
        ));
    }
}
