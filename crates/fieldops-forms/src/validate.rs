//! Pure validation of a value map against a rule set
//!
//! Validation is an explicit function call, not a hidden reactive effect:
//! [`FormState`](crate::form::FormState) invokes [`validate`] after every
//! mutation, and callers holding raw maps can invoke it directly. The
//! whole pass is synchronous and re-checks every declared field.

use crate::rules::{FieldRules, RuleSet, ValidationRule};
use fieldops_validators::{
	EmailValidator, MaxLengthValidator, MinLengthValidator, PhoneNumberValidator, ValidationError,
	Validator,
};
use serde_json::Value;
use std::collections::HashMap;

/// Current form values, keyed by field name
pub type ValueMap = HashMap<String, Value>;

/// Validation errors, keyed by field name; a field present in the map is
/// invalid, absence means valid (or not yet validated)
pub type ErrorMap = HashMap<String, String>;

pub(crate) const REQUIRED_MESSAGE: &str = "This field is required.";

/// Validate every field declared in `rules` against `values`.
///
/// Per field, in rule-list order, first failure wins:
/// - a missing or empty value fails only when the field is required;
///   an optional blank field skips all remaining checks
/// - otherwise each rule runs in order and the first error message is
///   recorded
///
/// Fields present in `values` but not in `rules` are ignored, so forms can
/// carry auxiliary or computed values without declaring rules for them.
///
/// # Examples
///
/// ```
/// use fieldops_forms::{validate, FieldRules, RuleSet};
/// use std::collections::HashMap;
/// use serde_json::json;
///
/// let rules = RuleSet::new().field("name", FieldRules::new().required().min_length(3));
///
/// let mut values = HashMap::new();
/// values.insert("name".to_string(), json!("Al"));
///
/// let errors = validate(&values, &rules);
/// assert!(errors["name"].contains("at least 3 characters"));
/// ```
pub fn validate(values: &ValueMap, rules: &RuleSet) -> ErrorMap {
	let mut errors = ErrorMap::new();

	for (name, field_rules) in rules.iter() {
		if let Some(message) = validate_field(values.get(name), field_rules, values) {
			errors.insert(name.clone(), message);
		}
	}

	errors
}

/// Emptiness test used by the `Required` rule.
///
/// Empty means: `null`, a string that is blank after trimming, an empty
/// array, or an empty object. Numbers and booleans are never empty, so an
/// unchecked checkbox (`false`) still satisfies `Required`.
///
/// # Examples
///
/// ```
/// use fieldops_forms::is_empty_value;
/// use serde_json::json;
///
/// assert!(is_empty_value(&json!(null)));
/// assert!(is_empty_value(&json!("   ")));
/// assert!(is_empty_value(&json!([])));
/// assert!(!is_empty_value(&json!(0)));
/// assert!(!is_empty_value(&json!(false)));
/// ```
pub fn is_empty_value(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(s) => s.trim().is_empty(),
		Value::Array(items) => items.is_empty(),
		Value::Object(entries) => entries.is_empty(),
		_ => false,
	}
}

fn validate_field(
	value: Option<&Value>,
	field_rules: &FieldRules,
	values: &ValueMap,
) -> Option<String> {
	let required = field_rules.is_required();

	// Missing or empty short-circuits the whole rule list: required fields
	// fail here, optional fields are valid when blank.
	let Some(value) = value else {
		return required.then(|| REQUIRED_MESSAGE.to_string());
	};
	if is_empty_value(value) {
		return required.then(|| REQUIRED_MESSAGE.to_string());
	}

	for rule in field_rules.rules() {
		if let Some(message) = check_rule(rule, value, values) {
			return Some(message);
		}
	}

	None
}

fn check_rule(rule: &ValidationRule, value: &Value, values: &ValueMap) -> Option<String> {
	match rule {
		// Emptiness is handled before the per-rule pass
		ValidationRule::Required => None,
		// Length bounds apply to strings only; other value kinds have no
		// length to measure
		ValidationRule::MinLength(min) => value
			.as_str()
			.and_then(|s| MinLengthValidator::new(*min).validate(s).err())
			.map(|err| err.to_string()),
		ValidationRule::MaxLength(max) => value
			.as_str()
			.and_then(|s| MaxLengthValidator::new(*max).validate(s).err())
			.map(|err| err.to_string()),
		ValidationRule::Email => match value.as_str() {
			Some(s) => EmailValidator::new()
				.validate(s)
				.err()
				.map(|err| err.to_string()),
			None => Some(ValidationError::InvalidEmail.to_string()),
		},
		ValidationRule::Phone(region) => match value.as_str() {
			Some(s) => PhoneNumberValidator::for_region(*region)
				.validate(s)
				.err()
				.map(|err| err.to_string()),
			None => Some(ValidationError::InvalidPhoneNumber { region: *region }.to_string()),
		},
		ValidationRule::Pattern { regex, message } => match value.as_str() {
			Some(s) if regex.is_match(s) => None,
			_ => Some(message.clone()),
		},
		ValidationRule::Custom(check) => check(value, values),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::FieldRules;
	use fieldops_validators::Region;
	use rstest::rstest;
	use serde_json::json;

	fn values_with(name: &str, value: Value) -> ValueMap {
		let mut values = ValueMap::new();
		values.insert(name.to_string(), value);
		values
	}

	#[rstest]
	#[case(json!(null))]
	#[case(json!(""))]
	#[case(json!("   "))]
	#[case(json!([]))]
	#[case(json!({}))]
	fn test_required_rejects_empty_values(#[case] value: Value) {
		// Arrange
		let rules = RuleSet::new().field("name", FieldRules::new().required());
		let values = values_with("name", value);

		// Act
		let errors = validate(&values, &rules);

		// Assert
		assert_eq!(errors.get("name"), Some(&REQUIRED_MESSAGE.to_string()));
	}

	#[rstest]
	fn test_required_rejects_absent_value() {
		// Arrange
		let rules = RuleSet::new().field("name", FieldRules::new().required());
		let values = ValueMap::new();

		// Act
		let errors = validate(&values, &rules);

		// Assert
		assert_eq!(errors.get("name"), Some(&REQUIRED_MESSAGE.to_string()));
	}

	#[rstest]
	#[case(json!(false))]
	#[case(json!(0))]
	fn test_required_accepts_falsy_non_empty_values(#[case] value: Value) {
		// Arrange: unchecked checkboxes and zero amounts are present values
		let rules = RuleSet::new().field("agree", FieldRules::new().required());
		let values = values_with("agree", value);

		// Act
		let errors = validate(&values, &rules);

		// Assert
		assert!(errors.is_empty());
	}

	#[rstest]
	#[case(json!(""))]
	#[case(json!(null))]
	fn test_optional_blank_field_skips_all_checks(#[case] value: Value) {
		// Arrange: min_length would fail on "", but optional-and-blank is valid
		let rules = RuleSet::new().field("nickname", FieldRules::new().min_length(5).email());
		let values = values_with("nickname", value);

		// Act
		let errors = validate(&values, &rules);

		// Assert
		assert!(errors.is_empty());
	}

	#[rstest]
	fn test_absent_optional_field_is_not_validated() {
		// Arrange
		let rules = RuleSet::new().field("nickname", FieldRules::new().min_length(5));
		let values = ValueMap::new();

		// Act
		let errors = validate(&values, &rules);

		// Assert
		assert!(errors.is_empty());
	}

	#[rstest]
	#[case("ab", false)]
	#[case("abc", true)]
	#[case("abcde", true)]
	#[case("abcdef", false)]
	fn test_length_bounds(#[case] input: &str, #[case] valid: bool) {
		// Arrange
		let rules = RuleSet::new().field("code", FieldRules::new().min_length(3).max_length(5));
		let values = values_with("code", json!(input));

		// Act
		let errors = validate(&values, &rules);

		// Assert
		assert_eq!(errors.is_empty(), valid, "input: '{input}'");
	}

	#[rstest]
	fn test_length_bound_messages_name_the_bound() {
		// Arrange
		let rules = RuleSet::new().field("code", FieldRules::new().min_length(3).max_length(5));

		// Act
		let too_short = validate(&values_with("code", json!("ab")), &rules);
		let too_long = validate(&values_with("code", json!("abcdef")), &rules);

		// Assert
		assert_eq!(
			too_short["code"],
			"Ensure this value has at least 3 characters (it has 2)"
		);
		assert_eq!(
			too_long["code"],
			"Ensure this value has at most 5 characters (it has 6)"
		);
	}

	#[rstest]
	fn test_email_rule() {
		// Arrange
		let rules = RuleSet::new().field("email", FieldRules::new().required().email());

		// Act & Assert
		let errors = validate(&values_with("email", json!("user@example.com")), &rules);
		assert!(errors.is_empty());

		let errors = validate(&values_with("email", json!("not-an-email")), &rules);
		assert_eq!(errors["email"], "Enter a valid email address");
	}

	#[rstest]
	fn test_email_rule_rejects_non_string_values() {
		// Arrange
		let rules = RuleSet::new().field("email", FieldRules::new().email());
		let values = values_with("email", json!(42));

		// Act
		let errors = validate(&values, &rules);

		// Assert
		assert_eq!(errors["email"], "Enter a valid email address");
	}

	#[rstest]
	fn test_phone_rule() {
		// Arrange
		let rules = RuleSet::new().field(
			"contact_no",
			FieldRules::new().required().phone(Region::Malaysia),
		);

		// Act & Assert
		let errors = validate(&values_with("contact_no", json!("012-345 6789")), &rules);
		assert!(errors.is_empty());

		let errors = validate(&values_with("contact_no", json!("123")), &rules);
		assert_eq!(errors["contact_no"], "Enter a valid Malaysian phone number");
	}

	#[rstest]
	fn test_pattern_rule_uses_its_message() {
		// Arrange
		let regex = regex::Regex::new("^[A-Z]{3}$").unwrap();
		let rules = RuleSet::new().field(
			"code",
			FieldRules::new().pattern(regex, "Code must be 3 uppercase letters"),
		);

		// Act & Assert
		let errors = validate(&values_with("code", json!("ABC")), &rules);
		assert!(errors.is_empty());

		let errors = validate(&values_with("code", json!("abc")), &rules);
		assert_eq!(errors["code"], "Code must be 3 uppercase letters");
	}

	#[rstest]
	fn test_custom_message_wins_when_earlier_rules_pass() {
		// Arrange: "taken" satisfies min_length(3), so the custom check runs
		// and its exact message is the field's error
		let rules = RuleSet::new().field(
			"username",
			FieldRules::new().min_length(3).custom(|value, _all| {
				(value == &json!("taken")).then(|| "That username is taken".to_string())
			}),
		);

		// Act
		let errors = validate(&values_with("username", json!("taken")), &rules);

		// Assert
		assert_eq!(errors["username"], "That username is taken");
	}

	#[rstest]
	fn test_first_failure_wins_within_a_field() {
		// Arrange: value fails min_length, so the later custom rule never runs
		let rules = RuleSet::new().field(
			"username",
			FieldRules::new().min_length(5).custom(|_value, _all| {
				Some("custom should not be reached".to_string())
			}),
		);

		// Act
		let errors = validate(&values_with("username", json!("ab")), &rules);

		// Assert
		assert_eq!(
			errors["username"],
			"Ensure this value has at least 5 characters (it has 2)"
		);
	}

	#[rstest]
	fn test_undeclared_fields_are_ignored() {
		// Arrange
		let rules = RuleSet::new().field("name", FieldRules::new().required());
		let mut values = values_with("name", json!("Alice"));
		values.insert("total_amount".to_string(), json!(129.90));

		// Act
		let errors = validate(&values, &rules);

		// Assert
		assert!(errors.is_empty());
	}

	#[rstest]
	fn test_empty_rule_set_is_always_valid() {
		// Arrange
		let rules = RuleSet::new();
		let values = values_with("anything", json!(null));

		// Act & Assert
		assert!(validate(&values, &rules).is_empty());
	}

	#[rstest]
	fn test_length_rules_skip_non_string_values() {
		// Arrange: numbers have no character count to measure
		let rules = RuleSet::new().field("quantity", FieldRules::new().min_length(3));
		let values = values_with("quantity", json!(7));

		// Act
		let errors = validate(&values, &rules);

		// Assert
		assert!(errors.is_empty());
	}
}
