//! Domain models and types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`RecordId`], [`CaseNumber`])
//! - **Records** ([`RawRecord`] as read from a store, [`CanonicalRecord`] after mapping)
//! - **Search input** ([`SearchKey`])
//! - **Error types** ([`PrefillError`], [`StoreError`], [`ProviderError`]) and the
//!   [`Result`] alias
//!
//! # Error Handling
//!
//! ```rust
//! use dossier_prefill::domain::{ErrorKind, PrefillError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(PrefillError::Validation("Last name cannot be empty".to_string()))
//! }
//!
//! assert_eq!(example().unwrap_err().kind(), ErrorKind::Validation);
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;
pub mod search;

pub use errors::{ErrorKind, PrefillError, ProviderError, StoreError};
pub use ids::{CaseNumber, RecordId};
pub use record::{
    display_date, CanonicalRecord, LearnerMobilityKind, NormalizedDate, RawRecord, RawValue,
    Salutation, SourceRef,
};
pub use result::Result;
pub use search::{is_valid_name, normalize_last_name, SearchKey};
