//! Validation error types shared by all validators

use crate::phone::Region;

/// Result type for validator checks
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Error returned when a value fails a format or length check.
///
/// Every variant renders as the human-readable message shown next to the
/// offending form field. Validators built with a custom message report it
/// through the [`ValidationError::Custom`] variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
	#[error("Enter a valid email address")]
	InvalidEmail,
	#[error("Enter a valid {} phone number", .region.adjective())]
	InvalidPhoneNumber { region: Region },
	#[error("Ensure this value has at least {min} characters (it has {actual})")]
	MinLength { min: usize, actual: usize },
	#[error("Ensure this value has at most {max} characters (it has {actual})")]
	MaxLength { max: usize, actual: usize },
	#[error("{0}")]
	Custom(String),
}
