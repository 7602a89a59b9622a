use itertools::Itertools;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error on JSON stream: {:?}", _0)]
    Stream(#[from] io::Error),
    #[error("Invalid JSON: {}", _0)]
    Syntax(serde_json::Error),
    #[error("Malformed attribute values: {}", _0.iter().join("; "))]
    Malformed(Vec<FieldError>),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Stream(err.into())
        } else {
            Error::Syntax(err)
        }
    }
}

/// A value that could not be converted to the declared type of its attribute.
///
/// These are collected while decoding continues with the sibling attributes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("\"{}\": {}", path, reason)]
pub struct FieldError {
    /// Location of the value, e.g. `aws.sts.operator_iam_roles[1].role_arn`.
    /// Map keys containing separators appear quoted: `properties["a.b"]`.
    pub path: String,
    pub reason: FieldErrorReason,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldErrorReason {
    #[error("expected {}, found {}", expected, found)]
    UnexpectedType { expected: &'static str, found: &'static str },
    #[error("invalid RFC 3339 timestamp {:?}: {}", value, source)]
    Timestamp { value: String, source: chrono::ParseError },
}

impl FieldErrorReason {
    pub(crate) fn unexpected(expected: &'static str, found: &serde_json::Value) -> Self {
        let found = match found {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        };
        FieldErrorReason::UnexpectedType { expected, found }
    }
}
