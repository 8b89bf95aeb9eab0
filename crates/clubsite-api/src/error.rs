//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use clubsite_core::{
  error::{SchemaError, ValidationError},
  store::CleanError,
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unauthorized")]
  Unauthorized,

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// Submitted data failed a check; the save was rejected.
  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// A declared schema is malformed. Never the client's fault.
  #[error(transparent)]
  Schema(#[from] SchemaError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

impl From<clubsite_core::Error> for ApiError {
  fn from(e: clubsite_core::Error) -> Self {
    match e {
      clubsite_core::Error::Validation(e) => Self::Validation(e),
      clubsite_core::Error::Schema(e) => Self::Schema(e),
      clubsite_core::Error::Serialization(e) => Self::BadRequest(e.to_string()),
    }
  }
}

impl<E> From<CleanError<E>> for ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  fn from(e: CleanError<E>) -> Self {
    match e {
      CleanError::Record(e) => e.into(),
      CleanError::Store(e) => Self::store(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.message.clone()),
      ApiError::Schema(e) => {
        tracing::error!(error = %e, "malformed schema");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    let mut res = (status, Json(json!({ "error": message }))).into_response();
    if matches!(self, ApiError::Unauthorized) {
      res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"clubsite\""),
      );
    }
    res
  }
}
