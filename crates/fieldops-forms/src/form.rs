//! Live form state and the guarded submission lifecycle

use crate::rules::RuleSet;
use crate::validate::{ErrorMap, ValueMap, validate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::future::Future;

/// Reserved key for form-level (non-field-specific) errors.
///
/// A failed submission records its message under this key so callers can
/// render a banner that is not attached to any single field. Field names
/// in a rule set must not collide with it.
pub const FORM_ERROR_KEY: &str = "form";

const SUBMIT_FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Terminal state of one [`FormState::submit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
	/// The handler ran and resolved successfully
	Submitted,
	/// Validation failed; the handler was never invoked
	Invalid,
	/// The handler ran and returned an error, now recorded under
	/// [`FORM_ERROR_KEY`]
	Failed,
	/// A submission was already in flight; nothing happened
	InFlight,
}

// Clears the submitting flag even when the submit future is dropped
// mid-await, so an abandoned submission never leaves the form stuck.
struct ClearOnDrop<'a>(&'a mut bool);

impl Drop for ClearOnDrop<'_> {
	fn drop(&mut self) {
		*self.0 = false;
	}
}

/// State of one form instance: current values, validation errors, which
/// fields the user has interacted with, and the submission flag.
///
/// Errors are recomputed synchronously on every mutation, so reads of
/// [`is_valid`](FormState::is_valid) never see stale state. The `touched`
/// set exists purely to gate error *display*: the convention every
/// consumer follows is "show the error for field `f` only when `f` is
/// touched and has an error", which [`visible_error`](FormState::visible_error)
/// encodes. Validity itself never depends on `touched`.
///
/// # Examples
///
/// ```
/// use fieldops_forms::{FieldRules, FormState, RuleSet};
/// use std::collections::HashMap;
/// use serde_json::json;
///
/// let rules = RuleSet::new().field("name", FieldRules::new().required().min_length(3));
/// let mut initial = HashMap::new();
/// initial.insert("name".to_string(), json!(""));
///
/// let mut form = FormState::new(initial, rules);
/// assert!(form.is_valid());
///
/// form.handle_change("name", "Al");
/// assert!(!form.is_valid());
/// assert!(form.visible_error("name").unwrap().contains("at least 3"));
///
/// form.handle_change("name", "Alice");
/// assert!(form.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct FormState {
	/// Snapshot taken at construction, restored by `reset`
	initial: ValueMap,
	values: ValueMap,
	rules: RuleSet,
	errors: ErrorMap,
	touched: HashSet<String>,
	submitting: bool,
}

impl FormState {
	/// Create form state from initial values and a fixed rule set.
	///
	/// Errors start empty: nothing has been validated until the first
	/// change or submission, so a pristine form reads as valid even when
	/// required fields are still blank.
	///
	/// # Examples
	///
	/// ```
	/// use fieldops_forms::{FormState, RuleSet};
	/// use std::collections::HashMap;
	///
	/// let form = FormState::new(HashMap::new(), RuleSet::new());
	/// assert!(form.errors().is_empty());
	/// assert!(!form.is_submitting());
	/// ```
	pub fn new(initial: ValueMap, rules: RuleSet) -> Self {
		Self {
			values: initial.clone(),
			initial,
			rules,
			errors: ErrorMap::new(),
			touched: HashSet::new(),
			submitting: false,
		}
	}

	/// Current field values
	pub fn values(&self) -> &ValueMap {
		&self.values
	}

	/// Current value of one field
	pub fn value(&self, field: &str) -> Option<&Value> {
		self.values.get(field)
	}

	/// The initial values snapshot
	pub fn initial(&self) -> &ValueMap {
		&self.initial
	}

	/// The rule set this form validates against
	pub fn rules(&self) -> &RuleSet {
		&self.rules
	}

	/// Current validation errors (including any form-level error)
	pub fn errors(&self) -> &ErrorMap {
		&self.errors
	}

	/// Current error for one field, whether or not it is touched
	pub fn error(&self, field: &str) -> Option<&str> {
		self.errors.get(field).map(String::as_str)
	}

	/// The form-level error from the last failed submission, if any
	pub fn form_error(&self) -> Option<&str> {
		self.error(FORM_ERROR_KEY)
	}

	/// Whether the user has changed or blurred this field
	pub fn is_touched(&self, field: &str) -> bool {
		self.touched.contains(field)
	}

	/// The error for a field, only once the user has interacted with it.
	///
	/// This is the display convention consumers wire to their inputs;
	/// untouched fields keep their errors hidden even when invalid.
	///
	/// # Examples
	///
	/// ```
	/// use fieldops_forms::{FieldRules, FormState, RuleSet};
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let rules = RuleSet::new().field("name", FieldRules::new().required());
	/// let mut initial = HashMap::new();
	/// initial.insert("name".to_string(), json!(""));
	/// let mut form = FormState::new(initial, rules);
	///
	/// // Another field's change computes an error for "name"...
	/// form.set_value("other", json!("x"));
	/// assert!(form.error("name").is_some());
	/// // ...but it stays hidden until "name" itself is touched
	/// assert!(form.visible_error("name").is_none());
	///
	/// form.handle_blur("name");
	/// assert!(form.visible_error("name").is_some());
	/// ```
	pub fn visible_error(&self, field: &str) -> Option<&str> {
		if self.touched.contains(field) {
			self.error(field)
		} else {
			None
		}
	}

	/// Whether the error map is empty
	pub fn is_valid(&self) -> bool {
		self.errors.is_empty()
	}

	/// Whether a submission handler is currently awaited
	pub fn is_submitting(&self) -> bool {
		self.submitting
	}

	/// Record a user edit: store the value, mark the field touched, and
	/// revalidate the whole form.
	///
	/// The value is whatever the input produced: `Value::Bool` for a
	/// checkbox's checked state, `Value::String` for text, a number for
	/// numeric inputs. Fields without declared rules are stored but never
	/// validated.
	///
	/// # Examples
	///
	/// ```
	/// use fieldops_forms::{FieldRules, FormState, RuleSet};
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let rules = RuleSet::new().field("name", FieldRules::new().required());
	/// let mut form = FormState::new(HashMap::new(), rules);
	///
	/// form.handle_change("name", "Alice");
	/// form.handle_change("subscribed", true);
	///
	/// assert_eq!(form.value("name"), Some(&json!("Alice")));
	/// assert_eq!(form.value("subscribed"), Some(&json!(true)));
	/// assert!(form.is_touched("name"));
	/// ```
	pub fn handle_change(&mut self, field: impl Into<String>, value: impl Into<Value>) {
		let field = field.into();
		self.values.insert(field.clone(), value.into());
		self.touched.insert(field);
		self.revalidate();
	}

	/// Mark a field touched without altering its value.
	///
	/// Used by blur handlers so that errors become visible once the user
	/// leaves a field.
	pub fn handle_blur(&mut self, field: impl Into<String>) {
		self.touched.insert(field.into());
	}

	/// Programmatically set one value without marking it touched.
	///
	/// Goes through the same revalidation path as user edits; computed
	/// fields are not exempt from validation.
	pub fn set_value(&mut self, field: impl Into<String>, value: impl Into<Value>) {
		self.values.insert(field.into(), value.into());
		self.revalidate();
	}

	/// Programmatically merge several values without marking them touched.
	///
	/// # Examples
	///
	/// ```
	/// use fieldops_forms::{FormState, RuleSet};
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let mut form = FormState::new(HashMap::new(), RuleSet::new());
	///
	/// let mut totals = HashMap::new();
	/// totals.insert("subtotal".to_string(), json!(120.0));
	/// totals.insert("total_amount".to_string(), json!(129.90));
	/// form.set_values(totals);
	///
	/// assert_eq!(form.value("total_amount"), Some(&json!(129.90)));
	/// assert!(!form.is_touched("total_amount"));
	/// ```
	pub fn set_values(&mut self, partial: ValueMap) {
		self.values.extend(partial);
		self.revalidate();
	}

	/// Discard all edits: restore the initial snapshot and clear errors,
	/// touched state, and the submitting flag.
	///
	/// # Examples
	///
	/// ```
	/// use fieldops_forms::{FieldRules, FormState, RuleSet};
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let rules = RuleSet::new().field("name", FieldRules::new().min_length(3));
	/// let mut initial = HashMap::new();
	/// initial.insert("name".to_string(), json!("Alice"));
	/// let mut form = FormState::new(initial.clone(), rules);
	///
	/// form.handle_change("name", "Al");
	/// assert!(!form.is_valid());
	///
	/// form.reset();
	/// assert_eq!(form.values(), &initial);
	/// assert!(form.errors().is_empty());
	/// assert!(!form.is_touched("name"));
	/// ```
	pub fn reset(&mut self) {
		self.values = self.initial.clone();
		self.errors.clear();
		self.touched.clear();
		self.submitting = false;
	}

	/// Run the guarded submission lifecycle.
	///
	/// Touches every declared field (so pre-existing errors become
	/// visible), revalidates unconditionally, and only then invokes the
	/// handler with an owned snapshot of the current values:
	///
	/// - invalid form: the handler is never invoked and the populated
	///   errors/touched state is the only observable effect
	///   ([`SubmitOutcome::Invalid`])
	/// - handler resolves: [`SubmitOutcome::Submitted`]; resetting or
	///   navigating afterwards is the caller's decision
	/// - handler errors: the message (or a generic fallback when blank) is
	///   recorded under [`FORM_ERROR_KEY`] and never re-thrown
	///   ([`SubmitOutcome::Failed`])
	/// - a submission already in flight: no-op ([`SubmitOutcome::InFlight`])
	///
	/// Dropping the returned future cancels the in-flight handler and
	/// clears the submitting flag; no write to the form can happen after
	/// the drop, because every post-await update lives in the same future.
	///
	/// # Examples
	///
	/// ```
	/// use fieldops_forms::{FieldRules, FormState, RuleSet, SubmitOutcome};
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let rules = RuleSet::new().field("name", FieldRules::new().required());
	/// let mut initial = HashMap::new();
	/// initial.insert("name".to_string(), json!("Alice"));
	/// let mut form = FormState::new(initial, rules);
	///
	/// let outcome = tokio_test::block_on(form.submit(|values| async move {
	///     assert_eq!(values["name"], json!("Alice"));
	///     anyhow::Ok(())
	/// }));
	/// assert_eq!(outcome, SubmitOutcome::Submitted);
	/// assert!(!form.is_submitting());
	/// ```
	pub async fn submit<F, Fut>(&mut self, on_submit: F) -> SubmitOutcome
	where
		F: FnOnce(ValueMap) -> Fut,
		Fut: Future<Output = anyhow::Result<()>>,
	{
		if self.submitting {
			return SubmitOutcome::InFlight;
		}

		for name in self.rules.field_names() {
			self.touched.insert(name.clone());
		}

		self.errors = validate(&self.values, &self.rules);
		if !self.errors.is_empty() {
			tracing::debug!(errors = self.errors.len(), "submission blocked by validation");
			return SubmitOutcome::Invalid;
		}

		let snapshot = self.values.clone();
		self.submitting = true;
		let result = {
			let _reset = ClearOnDrop(&mut self.submitting);
			on_submit(snapshot).await
		};

		match result {
			Ok(()) => {
				tracing::debug!("submission completed");
				SubmitOutcome::Submitted
			}
			Err(err) => {
				let mut message = err.to_string();
				if message.trim().is_empty() {
					message = SUBMIT_FALLBACK_MESSAGE.to_string();
				}
				tracing::debug!(error = %message, "submission handler failed");
				self.errors.insert(FORM_ERROR_KEY.to_string(), message);
				SubmitOutcome::Failed
			}
		}
	}

	fn revalidate(&mut self) {
		self.errors = validate(&self.values, &self.rules);
	}
}
