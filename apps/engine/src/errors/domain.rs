//! Domain-level error type used by the rule engine and the state machine.
//!
//! This error type is transport-agnostic. Services wrap it into
//! `crate::error::AppError` through the provided `From<DomainError>` impl.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Reasons a move is rejected as invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    PhaseMismatch,
    OutOfTurn,
    CardNotInHand,
    CardAlreadyPlayed,
    MustFollowSuit,
    InvalidBid,
    InvalidDiscard,
    InvalidAnnouncement,
    InvalidDeal,
    ParseCard,
    InvalidTrumpConversion,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A move that is illegal for the current phase, turn, or hand.
    /// The state that rejected it is left unchanged.
    Validation(ValidationKind, String),
    /// A remote server reported a move that the locally tracked state cannot explain.
    ProtocolStateMismatch(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "invalid move {kind:?}: {d}"),
            DomainError::ProtocolStateMismatch(d) => write!(f, "protocol state mismatch: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }

    pub fn protocol_mismatch(detail: impl Into<String>) -> Self {
        Self::ProtocolStateMismatch(detail.into())
    }

    /// True for every rejection that a player may retry with a different move.
    pub fn is_invalid_move(&self) -> bool {
        matches!(self, DomainError::Validation(..))
    }

    pub fn kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            DomainError::ProtocolStateMismatch(_) => None,
        }
    }
}
