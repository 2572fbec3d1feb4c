//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` [`Error`] whose details name the
//! offending field and a stable machine-readable code.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::json;

use crate::domain::{
    DegreeOfAlcohol, Error, LiqueurId, LiqueurName, LiqueurValidationError, ManufacturingDate,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
    InvalidId,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::MalformedBody => "malformed_body",
        }
    }
}

/// Wire name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const DEGREE_OF_ALCOHOL: FieldName = FieldName::new("degreeOfAlcohol");
pub(crate) const MANUFACTURING_DATE: FieldName = FieldName::new("manufacturingDate");
pub(crate) const ID: FieldName = FieldName::new("id");

struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
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
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_value_error(
    field: FieldName,
    reason: &LiqueurValidationError,
    value: &str,
) -> Error {
    ValidationError::new(field.as_str(), reason.to_string())
        .with_value(ErrorCode::InvalidValue, value)
}

/// Require a field that the body type declares optional.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_id(value: &str) -> Result<LiqueurId, Error> {
    LiqueurId::new(value).map_err(|reason| {
        ValidationError::new(ID.as_str(), reason.to_string())
            .with_value(ErrorCode::InvalidId, value)
    })
}

pub(crate) fn parse_name(value: String) -> Result<LiqueurName, Error> {
    LiqueurName::new(value.as_str()).map_err(|reason| invalid_value_error(NAME, &reason, &value))
}

/// Accept a JSON number as-is and coerce numeric strings such as `"40"`.
pub(crate) fn parse_degree(value: DegreeInput) -> Result<DegreeOfAlcohol, Error> {
    let invalid = |raw: String| {
        invalid_value_error(DEGREE_OF_ALCOHOL, &LiqueurValidationError::NonFiniteDegree, &raw)
    };
    match value {
        DegreeInput::Number(number) => {
            DegreeOfAlcohol::new(number).map_err(|_| invalid(number.to_string()))
        }
        DegreeInput::Text(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(|number| DegreeOfAlcohol::new(number).ok())
            .ok_or_else(|| invalid(text)),
    }
}

/// Accept a date or timestamp string, or epoch milliseconds.
pub(crate) fn parse_manufacturing_date(value: DateInput) -> Result<ManufacturingDate, Error> {
    match value {
        DateInput::Millis(millis) => ManufacturingDate::from_timestamp_millis(millis)
            .map_err(|reason| invalid_value_error(MANUFACTURING_DATE, &reason, &millis.to_string())),
        DateInput::Text(text) => text
            .parse()
            .map_err(|reason| invalid_value_error(MANUFACTURING_DATE, &reason, &text)),
    }
}

/// Raw `degreeOfAlcohol` as supplied by the client.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum DegreeInput {
    Number(f64),
    Text(String),
}

/// Raw `manufacturingDate` as supplied by the client.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Millis(i64),
    Text(String),
}

/// JSON extractor configuration turning body errors into `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "request body must be application/json".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("malformed JSON body: {inner}"),
        other => format!("unreadable request body: {other}"),
    };
    ValidationError::new("body", message)
        .with_code(ErrorCode::MalformedBody)
        .into()
}
