//! Result type alias for piiredact

use super::errors::RedactError;

/// Result type alias for piiredact operations
///
/// # Examples
///
/// ```
/// use piiredact::domain::result::Result;
/// use piiredact::domain::errors::RedactError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RedactError::Configuration("missing template".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RedactError>;
