//! Email address validator

use crate::{ValidationError, ValidationResult, Validator};
use regex::Regex;
use std::sync::LazyLock;

// RFC-5322-approximating email pattern (the WHATWG input[type=email] form).
//
// Validates addresses with:
// - A dot-atom local part (no quoted strings)
// - Valid domain labels (no leading/trailing hyphens, max 63 chars each)
// - No requirement for a top-level domain, so user@localhost is accepted
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?)*$",
	)
	.expect("EMAIL_REGEX: invalid regex pattern")
});

/// Validates that a string value is a well-formed email address.
///
/// The validator checks:
/// - Local part must be a non-empty dot-atom (letters, digits, and the
///   RFC 5322 atom specials)
/// - Domain must consist of valid labels that do not start or end with
///   a hyphen
///
/// # Examples
///
/// ```
/// use fieldops_validators::{EmailValidator, Validator};
///
/// let validator = EmailValidator::new();
/// assert!(validator.validate("user@example.com").is_ok());
/// assert!(validator.validate("not-an-email").is_err());
/// assert!(validator.validate("").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct EmailValidator {
	/// Optional custom error message shown on validation failure
	message: Option<String>,
}

impl EmailValidator {
	/// Creates a new `EmailValidator` with the default error message.
	///
	/// # Examples
	///
	/// ```
	/// use fieldops_validators::{EmailValidator, Validator};
	///
	/// let validator = EmailValidator::new();
	/// assert!(validator.validate("admin@fieldops.my").is_ok());
	/// ```
	pub fn new() -> Self {
		Self { message: None }
	}

	/// Sets a custom error message returned on validation failure.
	///
	/// # Examples
	///
	/// ```
	/// use fieldops_validators::{EmailValidator, Validator};
	///
	/// let validator = EmailValidator::new().with_message("Please enter a valid work email");
	/// assert!(validator.validate("bad").is_err());
	/// ```
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl Default for EmailValidator {
	fn default() -> Self {
		Self::new()
	}
}

impl Validator<str> for EmailValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		if EMAIL_REGEX.is_match(value) {
			Ok(())
		} else {
			match &self.message {
				Some(msg) => Err(ValidationError::Custom(msg.clone())),
				None => Err(ValidationError::InvalidEmail),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("user@example.com")]
	#[case("first.last@example.com")]
	#[case("user+tag@example.co.uk")]
	#[case("user_name@sub.example.com")]
	#[case("u@example.com")]
	#[case("user@localhost")]
	#[case("user123@example-site.com")]
	fn test_email_validator_valid(#[case] email: &str) {
		// Arrange
		let validator = EmailValidator::new();

		// Act
		let result = validator.validate(email);

		// Assert
		assert!(result.is_ok(), "Expected '{email}' to be a valid email");
	}

	#[rstest]
	#[case("")]
	#[case("not-an-email")]
	#[case("@example.com")]
	#[case("user@")]
	#[case("user@@example.com")]
	#[case("user@-example.com")]
	#[case("user@example-.com")]
	#[case("user example@example.com")]
	#[case("user@exa mple.com")]
	fn test_email_validator_invalid(#[case] email: &str) {
		// Arrange
		let validator = EmailValidator::new();

		// Act
		let result = validator.validate(email);

		// Assert
		assert!(result.is_err(), "Expected '{email}' to be an invalid email");
	}

	#[rstest]
	fn test_email_validator_error_type() {
		// Arrange
		let validator = EmailValidator::new();

		// Act
		let result = validator.validate("not-an-email");

		// Assert
		assert_eq!(result, Err(ValidationError::InvalidEmail));
	}

	#[rstest]
	fn test_email_validator_custom_message() {
		// Arrange
		let validator = EmailValidator::new().with_message("Custom email error");

		// Act
		let result = validator.validate("bad-email");

		// Assert
		match result {
			Err(ValidationError::Custom(msg)) => {
				assert_eq!(msg, "Custom email error");
			}
			_ => panic!("Expected Custom error with custom message"),
		}
	}

	#[rstest]
	fn test_email_validator_default() {
		// Arrange
		let validator = EmailValidator::default();

		// Act + Assert
		assert!(validator.validate("user@example.com").is_ok());
	}
}
