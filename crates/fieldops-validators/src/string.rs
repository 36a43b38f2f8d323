//! String length validators
//!
//! Lengths are counted in characters, not bytes, so multi-byte input
//! (CJK, emoji, accented characters) is measured the way users see it.

use crate::{ValidationError, ValidationResult, Validator};

/// Validates that a string has at least `min` characters.
///
/// # Examples
///
/// ```
/// use fieldops_validators::{MinLengthValidator, Validator};
///
/// let validator = MinLengthValidator::new(3);
/// assert!(validator.validate("abc").is_ok());
/// assert!(validator.validate("ab").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
	min: usize,
	message: Option<String>,
}

impl MinLengthValidator {
	pub fn new(min: usize) -> Self {
		Self { min, message: None }
	}

	/// Sets a custom error message returned on validation failure.
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl Validator<str> for MinLengthValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		let actual = value.chars().count();
		if actual >= self.min {
			Ok(())
		} else {
			match &self.message {
				Some(msg) => Err(ValidationError::Custom(msg.clone())),
				None => Err(ValidationError::MinLength {
					min: self.min,
					actual,
				}),
			}
		}
	}
}

/// Validates that a string has at most `max` characters.
///
/// # Examples
///
/// ```
/// use fieldops_validators::{MaxLengthValidator, Validator};
///
/// let validator = MaxLengthValidator::new(5);
/// assert!(validator.validate("12345").is_ok());
/// assert!(validator.validate("123456").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
	max: usize,
	message: Option<String>,
}

impl MaxLengthValidator {
	pub fn new(max: usize) -> Self {
		Self { max, message: None }
	}

	/// Sets a custom error message returned on validation failure.
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl Validator<str> for MaxLengthValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		let actual = value.chars().count();
		if actual <= self.max {
			Ok(())
		} else {
			match &self.message {
				Some(msg) => Err(ValidationError::Custom(msg.clone())),
				None => Err(ValidationError::MaxLength {
					max: self.max,
					actual,
				}),
			}
		}
	}
}
