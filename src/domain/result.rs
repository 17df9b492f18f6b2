//! Result type alias for ndws

use super::errors::NdwsError;

/// Result type alias for ndws operations
///
/// # Examples
///
/// ```
/// use ndws::domain::result::Result;
/// use ndws::domain::errors::NdwsError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(NdwsError::invalid_argument("bucket", "cannot be empty"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, NdwsError>;

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

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(NdwsError::Other("test error".to_string()));
        assert!(result.is_err());
    }
}
