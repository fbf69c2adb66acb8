//! Result type alias for dossier-prefill

use super::errors::PrefillError;

/// Result type alias using [`PrefillError`] as the error type
///
/// # Examples
///
/// ```
/// use dossier_prefill::domain::result::Result;
/// use dossier_prefill::domain::errors::PrefillError;
///
/// fn failing_function() -> Result<()> {
///     Err(PrefillError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PrefillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
