//! Phone number validator for region-specific subscriber number formats
//!
//! Validation is a digit-count heuristic, not full E.164 parsing: the
//! dashboards this crate serves accept numbers typed with spaces, hyphens,
//! or a leading `+`, and the backend normalizes them later. The heuristic
//! only has to reject values that cannot possibly be a subscriber number
//! for the region.

use crate::{ValidationError, ValidationResult, Validator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported regions for phone number validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
	/// Malaysia - 9-10 digit subscriber numbers, 11-12 digits with the
	/// `60` country code prefix
	Malaysia,
}

impl Region {
	/// Get the international dialing prefix for this region
	pub fn country_code(&self) -> &'static str {
		match self {
			Region::Malaysia => "60",
		}
	}

	/// Adjective used in error messages ("Malaysian phone number")
	pub(crate) fn adjective(&self) -> &'static str {
		match self {
			Region::Malaysia => "Malaysian",
		}
	}

	/// Accepted digit-count range for a number carrying the country code
	fn prefixed_digit_range(&self) -> (usize, usize) {
		match self {
			Region::Malaysia => (11, 12),
		}
	}

	/// Accepted digit-count range for a local number
	fn local_digit_range(&self) -> (usize, usize) {
		match self {
			Region::Malaysia => (9, 10),
		}
	}
}

impl fmt::Display for Region {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Region::Malaysia => write!(f, "Malaysia"),
		}
	}
}

/// Validates that a string value holds a plausible phone number for a region.
///
/// All non-digit characters are stripped before counting, so separators,
/// spaces, and a leading `+` never affect the verdict. The remaining digit
/// string is matched against the region's accepted counts: for Malaysia,
/// 11-12 digits when the string starts with the `60` country code, else
/// 9-10 digits.
///
/// # Examples
///
/// ```
/// use fieldops_validators::{PhoneNumberValidator, Region, Validator};
///
/// let validator = PhoneNumberValidator::for_region(Region::Malaysia);
/// assert!(validator.validate("012-345 6789").is_ok());
/// assert!(validator.validate("+60 12 345 6789").is_ok());
/// assert!(validator.validate("123").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PhoneNumberValidator {
	region: Region,
	/// Optional custom error message shown on validation failure
	message: Option<String>,
}

impl PhoneNumberValidator {
	/// Create a validator for a single region
	///
	/// # Examples
	///
	/// ```
	/// use fieldops_validators::{PhoneNumberValidator, Region, Validator};
	///
	/// let validator = PhoneNumberValidator::for_region(Region::Malaysia);
	/// assert!(validator.validate("0123456789").is_ok());
	/// ```
	pub fn for_region(region: Region) -> Self {
		Self {
			region,
			message: None,
		}
	}

	/// Sets a custom error message returned on validation failure.
	///
	/// # Examples
	///
	/// ```
	/// use fieldops_validators::{PhoneNumberValidator, Region, Validator};
	///
	/// let validator = PhoneNumberValidator::for_region(Region::Malaysia)
	///     .with_message("Enter the contact number we can reach you on");
	/// assert!(validator.validate("123").is_err());
	/// ```
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	/// The region this validator checks against
	pub fn region(&self) -> Region {
		self.region
	}
}

impl Validator<str> for PhoneNumberValidator {
	fn validate(&self, value: &str) -> ValidationResult<()> {
		let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();

		let (min, max) = if digits.starts_with(self.region.country_code()) {
			self.region.prefixed_digit_range()
		} else {
			self.region.local_digit_range()
		};

		if (min..=max).contains(&digits.len()) {
			Ok(())
		} else {
			match &self.message {
				Some(msg) => Err(ValidationError::Custom(msg.clone())),
				None => Err(ValidationError::InvalidPhoneNumber {
					region: self.region,
				}),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[case("012-345 6789")]
	#[case("0123456789")]
	#[case("03-1234 5678")]
	#[case("312345678")]
	#[case("60123456789")]
	#[case("+60 12-345 6789")]
	#[case("601234567890")]
	fn test_malaysian_phone_valid(#[case] phone: &str) {
		// Arrange
		let validator = PhoneNumberValidator::for_region(Region::Malaysia);

		// Act
		let result = validator.validate(phone);

		// Assert
		assert!(result.is_ok(), "Expected '{phone}' to be a valid number");
	}

	#[rstest]
	#[case("")]
	#[case("123")]
	#[case("12345678")]
	#[case("01234567890")]
	#[case("6012345678")]
	#[case("6012345678901")]
	#[case("no digits here")]
	fn test_malaysian_phone_invalid(#[case] phone: &str) {
		// Arrange
		let validator = PhoneNumberValidator::for_region(Region::Malaysia);

		// Act
		let result = validator.validate(phone);

		// Assert
		assert!(result.is_err(), "Expected '{phone}' to be an invalid number");
	}

	#[rstest]
	fn test_phone_validator_error_type() {
		// Arrange
		let validator = PhoneNumberValidator::for_region(Region::Malaysia);

		// Act
		let result = validator.validate("123");

		// Assert
		assert_eq!(
			result,
			Err(ValidationError::InvalidPhoneNumber {
				region: Region::Malaysia
			})
		);
	}

	#[rstest]
	fn test_phone_validator_custom_message() {
		// Arrange
		let validator =
			PhoneNumberValidator::for_region(Region::Malaysia).with_message("Custom phone error");

		// Act
		let result = validator.validate("123");

		// Assert
		match result {
			Err(ValidationError::Custom(msg)) => {
				assert_eq!(msg, "Custom phone error");
			}
			_ => panic!("Expected Custom error with custom message"),
		}
	}

	proptest! {
		#[test]
		fn prop_separators_never_change_the_verdict(digits in "[0-9]{1,14}", seps in "[- +()]{0,6}") {
			let validator = PhoneNumberValidator::for_region(Region::Malaysia);

			// Interleave separator characters into the digit string
			let mut decorated = String::new();
			decorated.push_str(&seps);
			for (i, ch) in digits.chars().enumerate() {
				decorated.push(ch);
				if i % 3 == 2 {
					decorated.push('-');
				}
			}

			prop_assert_eq!(
				validator.validate(&decorated).is_ok(),
				validator.validate(&digits).is_ok()
			);
		}

		#[test]
		fn prop_local_digit_count_decides(digits in "[1-5][0-9]{0,13}") {
			// First digit 1-5 keeps the number out of the 60-prefixed branch
			let validator = PhoneNumberValidator::for_region(Region::Malaysia);
			let expected = (9..=10).contains(&digits.len());

			prop_assert_eq!(validator.validate(&digits).is_ok(), expected);
		}
	}
}
