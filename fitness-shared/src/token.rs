//! # Access token payload decoding
//!
//! Reads the identity claims out of an OAuth access token so the dashboard can
//! greet the user. This is display-only: the signature and expiry are never
//! checked here, the backend validates the token on every request.

use base64::{
    Engine,
    engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::UserProfile;

/// Why a token could not be turned into a [`UserProfile`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Nothing to decode.
    #[error("token is empty")]
    Empty,
    /// Not a three-part JWT.
    #[error("expected 3 dot-separated segments, found {0}")]
    Segments(usize),
    /// The payload segment is not base64.
    #[error("payload is not valid base64")]
    Encoding,
    /// The payload is not a JSON object.
    #[error("payload is not a JSON object: {0}")]
    Payload(String),
    /// No usable `sub` claim.
    #[error("payload has no subject claim")]
    MissingSubject,
}

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    preferred_username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Decodes the middle segment of a JWT.
///
/// The segment is expected to be base64url; padding and the standard alphabet
/// are tolerated since some providers emit either.
///
/// # Errors
/// Returns a [`TokenError`] describing the first check that failed.
pub fn decode_payload(token: &str) -> Result<serde_json::Value, TokenError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(TokenError::Empty);
    }
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Segments(segments.len()));
    }
    let encoded = segments[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .or_else(|_| STANDARD_NO_PAD.decode(encoded))
        .map_err(|_| TokenError::Encoding)?;
    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|err| TokenError::Payload(err.to_string()))?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(TokenError::Payload("not an object".to_string()))
    }
}

/// Extracts the user identity from an access token.
///
/// `name` falls back to `preferred_username` and then to `"User"`; `email` and
/// `picture` default to empty strings. A subject is mandatory because it
/// becomes the `X-User-ID` sent with every API call.
///
/// # Errors
/// Returns a [`TokenError`] for malformed tokens or a missing subject.
pub fn decode_token(token: &str) -> Result<UserProfile, TokenError> {
    let payload = decode_payload(token)?;
    let claims: Claims =
        serde_json::from_value(payload).map_err(|err| TokenError::Payload(err.to_string()))?;
    let sub = non_empty(claims.sub).ok_or(TokenError::MissingSubject)?;
    let profile = UserProfile {
        sub,
        name: non_empty(claims.name)
            .or_else(|| non_empty(claims.preferred_username))
            .unwrap_or_else(|| "User".to_string()),
        email: claims.email.unwrap_or_default(),
        picture: claims.picture.unwrap_or_default(),
    };
    debug!(sub = %profile.sub, "decoded token payload");
    Ok(profile)
}

/// Builds an unsigned token around the given claims. Only useful for tests and demos.
#[must_use]
pub fn encode_unsigned(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}
