//! Error handling for the Skat engine.

pub mod decode;
pub mod domain;

pub use decode::{DecodeError, DecodeErrorKind};
pub use domain::{DomainError, ValidationKind};
