//! Error types and argument guards.
//!
//! The comparison functions themselves are total and never fail. Errors only
//! come from constructing inputs: builders, rule definitions and record
//! projections.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A required argument was absent or blank
    #[error("Invalid argument : {0}")]
    InvalidArgument(String),

    /// A referenced item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The operation conflicts with the current state
    #[error("State conflict: {0}")]
    StateConflict(String),
}

impl CoreError {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(arg_name: impl Into<String>) -> Self {
        Self::InvalidArgument(arg_name.into())
    }

    /// Creates a new not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates a new state conflict error.
    pub fn state_conflict(message: impl Into<String>) -> Self {
        Self::StateConflict(message.into())
    }
}

/// Unwraps a required argument, failing with `InvalidArgument` when it is absent.
///
/// # Example
///
/// ```rust
/// use keys_core::{check_not_null, CoreError};
///
/// assert_eq!(check_not_null("schema", Some("donor")), Ok("donor"));
/// assert_eq!(
///     check_not_null::<&str>("schema", None),
///     Err(CoreError::InvalidArgument("schema".to_string()))
/// );
/// ```
pub fn check_not_null<T>(arg_name: &str, arg: Option<T>) -> Result<T> {
    arg.ok_or_else(|| CoreError::invalid_argument(arg_name))
}

/// Fails with `InvalidArgument` when `value` is empty or whitespace only.
pub fn check_not_blank<'a>(arg_name: &str, value: &'a str) -> Result<&'a str> {
    if is_blank(value) {
        return Err(CoreError::invalid_argument(arg_name));
    }
    Ok(value)
}

/// Returns true if the string is empty once surrounding whitespace is trimmed.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_invalid_argument_message() {
        let err = CoreError::invalid_argument("fieldsMapping");
        assert_eq!(err.to_string(), "Invalid argument : fieldsMapping");
    }

    #[test]
    fn test_check_not_null() {
        assert_eq!(check_not_null("count", Some(3)), Ok(3));
        assert!(matches!(
            check_not_null::<u32>("count", None),
            Err(CoreError::InvalidArgument(name)) if name == "count"
        ));
    }

    #[test]
    fn test_check_not_blank() {
        assert_eq!(check_not_blank("name", "donor"), Ok("donor"));
        assert!(check_not_blank("name", "").is_err());
        assert!(check_not_blank("name", "  \t").is_err());
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank(" a "));
    }
}
