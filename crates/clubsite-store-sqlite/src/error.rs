//! Error type for `clubsite-store-sqlite`.

use clubsite_core::relation::RecordKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] clubsite_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown record kind: {0:?}")]
  UnknownKind(String),

  /// An update tried to change the kind of an existing record.
  #[error("record {id} is a {stored}, not a {given}")]
  KindMismatch {
    id:     uuid::Uuid,
    stored: RecordKind,
    given:  RecordKind,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
