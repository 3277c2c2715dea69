//! Error types for the API client and a single decoder that turns any backend
//! failure into one line a form can show.

use http::StatusCode;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("backend returned {status}")]
    Status { status: StatusCode, body: Value },
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Builds a status error from a raw response body, keeping it as JSON
    /// when it parses and as a plain string otherwise.
    pub fn from_response(status: StatusCode, raw: &str) -> Self {
        let body = if raw.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        };
        ApiError::Status { status, body }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Client-side form check failures. The field name is the backend's name for
/// the input, so the same label table serves both kinds of errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} is required", field_label(.0))]
    Required(&'static str),
    #[error("{} must be at least {min} characters", field_label(.field))]
    TooShort { field: &'static str, min: usize },
    #[error("{} must be at most {max} characters", field_label(.field))]
    TooLong { field: &'static str, max: usize },
    #[error("{0}")]
    Rejected(&'static str),
}

/// What a form shows after a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorReport {
    Field { field: String, messages: Vec<String> },
    Generic { message: String },
}

impl ErrorReport {
    pub fn generic(message: impl Into<String>) -> Self {
        ErrorReport::Generic {
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorReport::Field { field, messages } => {
                write!(f, "{}: {}", field_label(field), messages.join(", "))
            }
            ErrorReport::Generic { message } => f.write_str(message),
        }
    }
}

/// Human label for a backend field name.
pub fn field_label(field: &str) -> &str {
    match field {
        "name" => "Name",
        "subjects" => "Subjects",
        "username" => "Username",
        "password" => "Password",
        "email" => "Email",
        "content" => "Review",
        "course" => "Course",
        "tag" => "Tag",
        "tags" => "Tags",
        "overall_rating" => "Overall rating",
        "non_field_errors" => "Sign-in",
        "image" => "Image",
        other => other,
    }
}

pub const UNKNOWN_ERROR: &str = "Operation failed";

/// Decodes an API failure by probing, in order: `detail`, the known `fields`
/// (top level or nested under `errors`), `message`, a raw dump of any other
/// non-empty body, and finally `fallback`.
pub fn decode_error(error: &ApiError, fields: &[&str], fallback: &str) -> ErrorReport {
    match error {
        ApiError::Status { body, .. } => decode_body(body, fields, fallback),
        ApiError::Network(message) => ErrorReport::generic(format!("Network error: {message}")),
        ApiError::Timeout => ErrorReport::generic("Network error: request timed out"),
        ApiError::Decode(_) => ErrorReport::generic(fallback),
    }
}

fn decode_body(body: &Value, fields: &[&str], fallback: &str) -> ErrorReport {
    let object = match body {
        Value::Object(object) => object,
        Value::String(text) if !text.trim().is_empty() => return ErrorReport::generic(text.trim()),
        _ => return ErrorReport::generic(fallback),
    };

    if let Some(detail) = object.get("detail").and_then(text_of) {
        return ErrorReport::generic(detail);
    }

    let nested = object.get("errors").and_then(Value::as_object);
    for field in fields {
        let found = object
            .get(*field)
            .or_else(|| nested.and_then(|errors| errors.get(*field)));
        if let Some(messages) = found.map(messages_of).filter(|m| !m.is_empty()) {
            return ErrorReport::Field {
                field: (*field).to_string(),
                messages,
            };
        }
    }

    if let Some(message) = object.get("message").and_then(text_of) {
        return ErrorReport::generic(message);
    }

    match nested {
        Some(errors) if !errors.is_empty() => ErrorReport::generic(dump(errors)),
        _ if !object.is_empty() => ErrorReport::generic(dump(object)),
        _ => ErrorReport::generic(fallback),
    }
}

fn text_of(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn messages_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(text_of).collect(),
        other => text_of(other).into_iter().collect(),
    }
}

fn dump(object: &Map<String, Value>) -> String {
    serde_json::to_string(object).unwrap_or_else(|_| UNKNOWN_ERROR.to_string())
}
