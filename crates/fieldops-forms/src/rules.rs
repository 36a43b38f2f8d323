//! Declarative per-field validation rules
//!
//! A [`RuleSet`] maps field names to an ordered list of
//! [`ValidationRule`]s. Evaluation is first-failure-wins in list order, so
//! the order rules are added is the order they run. Fields absent from the
//! rule set are never validated.

use crate::validate::ValueMap;
use fieldops_validators::Region;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Cross-field aware check supplied by the caller.
///
/// Receives the field's current value and the whole value map; returns
/// `Some(message)` to fail the field with that exact message, `None` to
/// pass.
pub type CustomRuleFn = Arc<dyn Fn(&Value, &ValueMap) -> Option<String> + Send + Sync>;

/// A single constraint attached to one form field.
#[derive(Clone)]
pub enum ValidationRule {
	/// Value must pass the emptiness test (non-null, non-blank string,
	/// non-empty array/object)
	Required,
	/// String value must have at least this many characters
	MinLength(usize),
	/// String value must have at most this many characters
	MaxLength(usize),
	/// Value must be a well-formed email address
	Email,
	/// Value must be a plausible phone number for the region
	Phone(Region),
	/// String value must match the regex; fails with the given message
	Pattern { regex: Regex, message: String },
	/// Caller-supplied check, run against the value and the whole map
	Custom(CustomRuleFn),
}

impl fmt::Debug for ValidationRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ValidationRule::Required => write!(f, "Required"),
			ValidationRule::MinLength(min) => f.debug_tuple("MinLength").field(min).finish(),
			ValidationRule::MaxLength(max) => f.debug_tuple("MaxLength").field(max).finish(),
			ValidationRule::Email => write!(f, "Email"),
			ValidationRule::Phone(region) => f.debug_tuple("Phone").field(region).finish(),
			ValidationRule::Pattern { regex, .. } => {
				f.debug_tuple("Pattern").field(&regex.as_str()).finish()
			}
			ValidationRule::Custom(_) => write!(f, "Custom(..)"),
		}
	}
}

/// Ordered rule list for a single field, built fluently.
///
/// # Examples
///
/// ```
/// use fieldops_forms::FieldRules;
///
/// let rules = FieldRules::new().required().min_length(3).max_length(50);
/// assert!(rules.is_required());
/// assert_eq!(rules.rules().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
	rules: Vec<ValidationRule>,
}

impl FieldRules {
	/// Create an empty rule list
	pub fn new() -> Self {
		Self { rules: vec![] }
	}

	/// Require a non-empty value
	pub fn required(mut self) -> Self {
		self.rules.push(ValidationRule::Required);
		self
	}

	/// Require at least `min` characters
	pub fn min_length(mut self, min: usize) -> Self {
		self.rules.push(ValidationRule::MinLength(min));
		self
	}

	/// Require at most `max` characters
	pub fn max_length(mut self, max: usize) -> Self {
		self.rules.push(ValidationRule::MaxLength(max));
		self
	}

	/// Require a well-formed email address
	pub fn email(mut self) -> Self {
		self.rules.push(ValidationRule::Email);
		self
	}

	/// Require a plausible phone number for the region
	///
	/// # Examples
	///
	/// ```
	/// use fieldops_forms::{FieldRules, Region};
	///
	/// let rules = FieldRules::new().required().phone(Region::Malaysia);
	/// ```
	pub fn phone(mut self, region: Region) -> Self {
		self.rules.push(ValidationRule::Phone(region));
		self
	}

	/// Require the value to match `regex`, failing with `message`
	///
	/// # Examples
	///
	/// ```
	/// use fieldops_forms::FieldRules;
	/// use regex::Regex;
	///
	/// let code = Regex::new("^[A-Z]{3}-[0-9]{4}$").unwrap();
	/// let rules = FieldRules::new().pattern(code, "Job codes look like ABC-1234");
	/// ```
	pub fn pattern(mut self, regex: Regex, message: impl Into<String>) -> Self {
		self.rules.push(ValidationRule::Pattern {
			regex,
			message: message.into(),
		});
		self
	}

	/// Add a caller-supplied check with access to the whole value map.
	///
	/// The returned string is used verbatim as the field's error message.
	///
	/// # Examples
	///
	/// ```
	/// use fieldops_forms::FieldRules;
	///
	/// let rules = FieldRules::new().required().custom(|value, all| {
	///     let confirmed = all.get("password")?;
	///     (value != confirmed).then(|| "Passwords do not match".to_string())
	/// });
	/// ```
	pub fn custom<F>(mut self, check: F) -> Self
	where
		F: Fn(&Value, &ValueMap) -> Option<String> + Send + Sync + 'static,
	{
		self.rules.push(ValidationRule::Custom(Arc::new(check)));
		self
	}

	/// Whether the list contains a [`ValidationRule::Required`] entry
	pub fn is_required(&self) -> bool {
		self.rules
			.iter()
			.any(|rule| matches!(rule, ValidationRule::Required))
	}

	/// The rules in evaluation order
	pub fn rules(&self) -> &[ValidationRule] {
		&self.rules
	}
}

/// Mapping from field name to its rule list.
///
/// # Examples
///
/// ```
/// use fieldops_forms::{FieldRules, RuleSet};
///
/// let rules = RuleSet::new()
///     .field("name", FieldRules::new().required().min_length(3))
///     .field("email", FieldRules::new().required().email());
///
/// assert_eq!(rules.len(), 2);
/// assert!(rules.get("name").is_some());
/// assert!(rules.get("unknown").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
	fields: HashMap<String, FieldRules>,
}

impl RuleSet {
	/// Create an empty rule set (a form that is always valid)
	pub fn new() -> Self {
		Self {
			fields: HashMap::new(),
		}
	}

	/// Attach a rule list to a field name
	pub fn field(mut self, name: impl Into<String>, rules: FieldRules) -> Self {
		self.fields.insert(name.into(), rules);
		self
	}

	/// Get the rule list for a field, if one was declared
	pub fn get(&self, name: &str) -> Option<&FieldRules> {
		self.fields.get(name)
	}

	/// Iterate over declared `(field name, rules)` pairs
	pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldRules)> {
		self.fields.iter()
	}

	/// Iterate over declared field names
	pub fn field_names(&self) -> impl Iterator<Item = &String> {
		self.fields.keys()
	}

	/// Number of declared fields
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Whether no field has rules
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}
