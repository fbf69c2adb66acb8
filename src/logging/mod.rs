//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - console output with configurable levels
//! - optional JSON file logging with rotation
//! - helper macros for store queries and provider calls
//!
//! Secrets never go through these macros; only column names, counts and
//! status codes are logged.
//!
//! # Example
//!
//! ```no_run
//! use dossier_prefill::logging::init_logging;
//! use dossier_prefill::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a completed store query
///
/// # Example
///
/// ```no_run
/// use dossier_prefill::log_store_query;
/// use std::time::Duration;
///
/// log_store_query!("grist", 2usize, 1usize, Duration::from_millis(120));
/// ```
#[macro_export]
macro_rules! log_store_query {
    ($backend:expr, $filter_fields:expr, $rows:expr, $duration:expr) => {
        tracing::debug!(
            backend = $backend,
            filter_fields = $filter_fields,
            rows = $rows,
            duration_ms = $duration.as_millis() as u64,
            "Store query completed"
        );
    };
}

/// Log a finished call to the case provider
///
/// # Example
///
/// ```no_run
/// use dossier_prefill::log_provider_call;
/// use std::time::Duration;
///
/// log_provider_call!("70018", 201u16, Duration::from_millis(350));
/// ```
#[macro_export]
macro_rules! log_provider_call {
    ($procedure_id:expr, $status:expr, $duration:expr) => {
        tracing::info!(
            procedure_id = %$procedure_id,
            status = $status,
            duration_ms = $duration.as_millis() as u64,
            "Case provider call completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use dossier_prefill::log_error_with_context;
/// use dossier_prefill::domain::PrefillError;
///
/// let error = PrefillError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    #[test]
    fn test_macros_expand_without_subscriber() {
        let error = crate::domain::PrefillError::Validation("bad".to_string());
        crate::log_store_query!("postgresql", 2usize, 0usize, Duration::from_millis(3));
        crate::log_provider_call!("70018", 201u16, Duration::from_millis(3));
        crate::log_error_with_context!(&error, "test");
    }
}
