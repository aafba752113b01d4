//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns a domain `invalid_request` error carrying the
//! offending field and a stable machine-readable code in `details`.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, Version};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    BlankField,
    InvalidUuid,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::BlankField => "blank_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("missing required field: {name}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn blank_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must not be blank"))
        .with_code(ErrorCode::BlankField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn invalid_value_error(field: FieldName, value: &str, expected: &str) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be {expected}"))
        .with_value(ErrorCode::InvalidValue, value)
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse a typed identifier from its string form.
pub(crate) fn parse_id<T: From<Uuid>>(value: &str, field: FieldName) -> Result<T, Error> {
    parse_uuid(value, field).map(T::from)
}

/// Parse an optional reference field; absent stays absent.
pub(crate) fn parse_optional_id<T: From<Uuid>>(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<T>, Error> {
    value.map(|raw| parse_id(&raw, field)).transpose()
}

/// The expected version asserted by the caller.
pub(crate) fn require_version(value: Option<u32>) -> Result<Version, Error> {
    value
        .map(Version::new)
        .ok_or_else(|| missing_field_error(FieldName::new("version")))
}

/// A required text field that must not be blank.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    let value = value.ok_or_else(|| missing_field_error(field))?;
    non_blank(value, field)
}

/// An optional text field that, when present, must not be blank.
pub(crate) fn optional_text(value: Option<String>, field: FieldName) -> Result<Option<String>, Error> {
    value.map(|raw| non_blank(raw, field)).transpose()
}

fn non_blank(value: String, field: FieldName) -> Result<String, Error> {
    if value.trim().is_empty() {
        Err(blank_field_error(field))
    } else {
        Ok(value)
    }
}
