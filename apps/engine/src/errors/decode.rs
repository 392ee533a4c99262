//! Errors raised while decoding ISS wire tokens.
//!
//! A decode error drops the offending message; it never affects the connection.
//! Malformed card codes inside an otherwise recognised message are not errors:
//! they decode to `CardSlot::Unknown` and flag the move as degraded.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The token matches none of the known move shapes.
    UnrecognizedShape,
    /// A seat token was not one of `w`, `0`, `1`, `2`.
    BadSeat,
    /// A numeric field did not parse.
    BadNumber,
    /// A required field or token was missing.
    MissingField,
    /// A table line carried an unknown command.
    UnknownCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("decode error {kind:?}: {detail} (token: {token:?})")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub token: String,
    pub detail: String,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind, token: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            token: token.into(),
            detail: detail.into(),
        }
    }

    pub fn unrecognized(token: impl Into<String>) -> Self {
        Self::new(
            DecodeErrorKind::UnrecognizedShape,
            token,
            "no known move shape",
        )
    }

    pub fn missing(token: impl Into<String>, what: &str) -> Self {
        Self::new(DecodeErrorKind::MissingField, token, format!("missing {what}"))
    }

    pub fn bad_number(token: impl Into<String>) -> Self {
        Self::new(DecodeErrorKind::BadNumber, token, "not a number")
    }
}
