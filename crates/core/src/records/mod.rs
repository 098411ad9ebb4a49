//! The record contract and per-entity validation rules.
//!
//! Each entity implements [`Record`]: it names its payload types and turns
//! a raw create payload into an insertable record (required fields present,
//! defaults applied, optional blanks dropped) or rejects it with every
//! failing field listed.

mod account;
mod contact;
mod deal;
mod email;
mod lead;
mod project;
mod project_task;
mod task;

use std::fmt::Debug;

use keystone_common::validation::{
    EmailValidator, FieldValidator, RangeValidator, ValidationError, ValidationResult, Validator,
};
use keystone_domain::constants::{PERCENT_MAX, PERCENT_MIN};
use keystone_domain::{CrmError, EntityKind, FieldIssue};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A CRM record type and its payload shapes.
pub trait Record: Debug + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Create payload as received.
    type Input: Debug + Default + Serialize + DeserializeOwned + Send + 'static;
    /// Validated insert with defaults applied.
    type New: Debug + Send + 'static;
    /// Partial update.
    type Patch: Debug + Default + Serialize + DeserializeOwned + Send + 'static;
    /// The record with its relations expanded.
    type View: Debug + Clone + Serialize + DeserializeOwned + Send + Sync + 'static;

    fn id(&self) -> &str;

    /// Validate a create payload and apply defaults.
    fn prepare(input: Self::Input) -> ValidationResult<Self::New>;

    /// Validate a patch and normalize it: blank optional strings become
    /// clears, `null` lists become empty lists.
    fn prepare_patch(patch: Self::Patch) -> ValidationResult<Self::Patch>;
}

/// Convert a validation failure into the domain error.
pub fn validation_failed(err: ValidationError) -> CrmError {
    CrmError::Validation(
        err.errors.into_iter().map(|e| FieldIssue::new(e.field, e.message)).collect(),
    )
}

// Normalization ------------------------------------------------------------

/// Trim; blank becomes `None`.
pub(crate) fn text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// A field already checked by `Validator::require`.
pub(crate) fn required_text(value: Option<String>) -> String {
    text(value).unwrap_or_default()
}

pub(crate) fn text_or(value: Option<String>, default: &str) -> String {
    text(value).unwrap_or_else(|| default.to_string())
}

/// Trim entries and drop blanks.
pub(crate) fn list(value: Option<Vec<String>>) -> Vec<String> {
    value
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Patch form of [`text`]: a blank value clears the field.
pub(crate) fn patch_text(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(text)
}

/// Patch form of a required or defaulted string: trimmed, never cleared.
pub(crate) fn patch_required(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(|v| v.map(|s| s.trim().to_string()))
}

/// Patch form of [`list`]: `null` clears to an empty list.
pub(crate) fn patch_list(value: Option<Option<Vec<String>>>) -> Option<Option<Vec<String>>> {
    value.map(|v| Some(list(v)))
}

// Checks ---------------------------------------------------------------------

/// Require a non-blank, well-formed email address.
pub(crate) fn require_email(v: &mut Validator, field: &str, value: Option<&str>) {
    match value.map(str::trim) {
        Some(email) if !email.is_empty() => {
            v.validate_field(field, email, &EmailValidator::new());
        }
        other => {
            v.require(field, other);
        }
    }
}

/// Every entry of an address list must be a valid email.
pub(crate) fn check_addresses(v: &mut Validator, field: &str, values: Option<&[String]>) {
    let validator = EmailValidator::new();
    let invalid = values
        .unwrap_or_default()
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .any(|a| FieldValidator::<str>::validate(&validator, a).is_err());
    if invalid {
        v.add_error(field, "contains an invalid email address");
    }
}

pub(crate) fn check_percent(v: &mut Validator, field: &str, value: Option<i64>) {
    v.validate_optional(field, value.as_ref(), &RangeValidator::new(PERCENT_MIN, PERCENT_MAX));
}

pub(crate) fn check_amount(v: &mut Validator, field: &str, value: Option<f64>) {
    match value {
        Some(amount) if !amount.is_finite() => v.add_error(field, "must be a finite number"),
        Some(amount) => {
            v.validate_field(field, &amount, &RangeValidator::empty().min(0.0));
        }
        None => {}
    }
}

/// A required field in a patch may be omitted but not cleared or blanked.
pub(crate) fn check_patch_required(v: &mut Validator, field: &str, value: Option<&Option<String>>) {
    match value {
        Some(None) => v.add_error(field, "cannot be null"),
        Some(Some(s)) if s.trim().is_empty() => v.add_error(field, "cannot be empty"),
        _ => {}
    }
}

/// A non-nullable scalar in a patch may be omitted but not cleared.
pub(crate) fn check_patch_present<T>(v: &mut Validator, field: &str, value: Option<&Option<T>>) {
    if matches!(value, Some(None)) {
        v.add_error(field, "cannot be null");
    }
}

/// Email check for a patch field that must stay present.
pub(crate) fn check_patch_email(v: &mut Validator, field: &str, value: Option<&Option<String>>) {
    match value {
        Some(Some(email)) if !email.trim().is_empty() => {
            v.validate_field(field, email.trim(), &EmailValidator::new());
        }
        other => check_patch_required(v, field, other),
    }
}
