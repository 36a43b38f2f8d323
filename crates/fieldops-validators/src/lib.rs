//! Field format validators for fieldops
//!
//! This crate provides the standalone validators behind the form engine's
//! declarative rules:
//! - Email address format checks
//! - Region-aware phone number checks (digit-count heuristic, see
//!   [`phone`])
//! - Character-count string length bounds
//!
//! Validators are small value types built with `new`/`for_region` and an
//! optional `with_message` override, and all validate through the
//! [`Validator`] trait.

pub mod email;
pub mod errors;
pub mod phone;
pub mod string;

pub use email::EmailValidator;
pub use errors::{ValidationError, ValidationResult};
pub use phone::{PhoneNumberValidator, Region};
pub use string::{MaxLengthValidator, MinLengthValidator};

/// Trait for validators
pub trait Validator<T: ?Sized> {
	fn validate(&self, value: &T) -> ValidationResult<()>;
}
