//! The module contains the errors the engine can return.
//!
//! Credential failures are deliberately coarse: [`InvalidCredentials`] is
//! returned both for an unknown email and for a wrong password, and the
//! server boundary collapses [`TokenInvalid`] and [`TokenExpired`] into one
//! generic unauthenticated response.
//!
//! [`InvalidCredentials`]: EngineError::InvalidCredentials
//! [`TokenInvalid`]: EngineError::TokenInvalid
//! [`TokenExpired`]: EngineError::TokenExpired
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("identity already registered")]
    DuplicateIdentity,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid session token")]
    TokenInvalid,
    #[error("session token expired")]
    TokenExpired,
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Hash(#[from] bcrypt::BcryptError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DuplicateIdentity, Self::DuplicateIdentity) => true,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::TokenInvalid, Self::TokenInvalid) => true,
            (Self::TokenExpired, Self::TokenExpired) => true,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::Hash(a), Self::Hash(b)) => a.to_string() == b.to_string(),
            (Self::Internal(a), Self::Internal(b)) => a == b,
            _ => false,
        }
    }
}
