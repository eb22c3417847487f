//! Signed session tokens.
//!
//! A session is a stateless JWT bound to a user id; there is no server-side
//! session table and no revocation list. Logout is client-side cookie
//! clearing, so a captured token stays technically valid until its natural
//! expiry.

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// How long an issued session stays valid, in days.
pub const SESSION_VALIDITY_DAYS: i64 = 7;

/// Claims carried by a session token.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Owning user id.
    pub sub: u64,
    /// Issued at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

impl Claims {
    /// Builds claims for `user_id`, valid for `validity` from now.
    pub fn new(user_id: u64, validity: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + validity).timestamp(),
        }
    }
}

/// Mints and validates session tokens with a fixed signing secret.
pub struct SessionIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionIssuer {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::default();
        // A token one second past `exp` is expired; no grace window.
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issues a token for `user_id` with the standard validity window.
    pub fn issue(&self, user_id: u64) -> ResultEngine<String> {
        self.sign(&Claims::new(user_id, Duration::days(SESSION_VALIDITY_DAYS)))
    }

    /// Signs arbitrary claims; [`issue`] is the common path.
    ///
    /// [`issue`]: Self::issue
    pub fn sign(&self, claims: &Claims) -> ResultEngine<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|err| EngineError::Internal(format!("token signing failed: {err}")))
    }

    /// Verifies signature and expiry, returning the bound user id.
    pub fn validate(&self, token: &str) -> ResultEngine<u64> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims.sub),
            Err(err) => match err.kind() {
                ErrorKind::ExpiredSignature => Err(EngineError::TokenExpired),
                _ => Err(EngineError::TokenInvalid),
            },
        }
    }
}

impl fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never expose key material.
        f.debug_struct("SessionIssuer").finish_non_exhaustive()
    }
}
