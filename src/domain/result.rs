//! Result type alias for Eligo

use super::errors::EligoError;

/// Result type alias for Eligo operations
///
/// # Examples
///
/// ```
/// use eligo::domain::result::Result;
/// use eligo::domain::errors::EligoError;
///
/// fn failing_function() -> Result<()> {
///     Err(EligoError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, EligoError>;
