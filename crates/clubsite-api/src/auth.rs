//! Admin authentication: HTTP Basic credentials checked against a single
//! argon2-hashed account.

use argon2::{Argon2, PasswordHash, PasswordVerifier, password_hash};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use clubsite_core::store::RecordStore;

use crate::{AppState, error::ApiError};

/// The administrator account.
#[derive(Clone)]
pub struct AuthConfig {
  username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  password_hash: String,
}

impl AuthConfig {
  /// Fails if `password_hash` is not a PHC string.
  pub fn new(
    username: impl Into<String>,
    password_hash: impl Into<String>,
  ) -> Result<Self, password_hash::Error> {
    let password_hash = password_hash.into();
    PasswordHash::new(&password_hash)?;
    Ok(Self { username: username.into(), password_hash })
  }

  pub fn accepts(&self, creds: &Credentials) -> bool {
    creds.username == self.username
      && PasswordHash::new(&self.password_hash).is_ok_and(|hash| {
        Argon2::default()
          .verify_password(creds.password.as_bytes(), &hash)
          .is_ok()
      })
  }
}

/// A username and password from an `Authorization: Basic` header.
#[derive(Debug, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

impl Credentials {
  /// `None` when the header is absent, not Basic, or not valid base64 UTF-8
  /// of the form `user:password`.
  pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
    let encoded = headers
      .get(AUTHORIZATION)?
      .to_str()
      .ok()?
      .strip_prefix("Basic ")?;
    let decoded = String::from_utf8(B64.decode(encoded).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(Self { username: username.to_owned(), password: password.to_owned() })
  }
}

/// Present in a handler's arguments means the request came from the admin.
pub struct Admin;

impl<S> FromRequestParts<AppState<S>> for Admin
where
  S: RecordStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let path = parts.uri.path();
    match Credentials::from_headers(&parts.headers) {
      Some(creds) if state.auth.accepts(&creds) => Ok(Admin),
      Some(creds) => {
        tracing::warn!(%path, username = %creds.username, "admin credentials rejected");
        Err(ApiError::Unauthorized)
      }
      None => {
        tracing::debug!(%path, "admin credentials missing");
        Err(ApiError::Unauthorized)
      }
    }
  }
}
