//! Form state and validation for fieldops dashboards
//!
//! This crate provides the form engine behind every create/edit screen:
//! - Declarative per-field rules with first-failure-wins ordering
//! - Live form state: values, errors, touched fields, submitting flag
//! - Synchronous revalidation on every mutation, so validity is never stale
//! - A guarded async submission lifecycle that validates before invoking
//!   the caller's handler and surfaces handler failures as a form-level
//!   error instead of propagating them
//!
//! The engine owns no rendering and no transport. Consumers read
//! `values`/`errors`/`touched`/`is_submitting` and wire their input events
//! to [`FormState::handle_change`], [`FormState::handle_blur`], and
//! [`FormState::submit`]; the submit handler is an async closure that
//! typically calls a REST client.

pub mod form;
pub mod rules;
pub mod validate;

pub use fieldops_validators::Region;
pub use form::{FORM_ERROR_KEY, FormState, SubmitOutcome};
pub use rules::{CustomRuleFn, FieldRules, RuleSet, ValidationRule};
pub use validate::{ErrorMap, ValueMap, is_empty_value, validate};
