//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings and UUIDs are hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use clubsite_core::{
  record::{RecordValue, StoredRecord},
  relation::RecordKind,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn decode_kind(s: &str) -> Result<RecordKind> {
  s.parse().map_err(|_| Error::UnknownKind(s.to_owned()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const RECORD_COLUMNS: &str =
  "record_id, kind, value_json, created_at, updated_at";

/// Raw strings read directly from a `records` row.
pub struct RawRecord {
  pub record_id:  String,
  pub kind:       String,
  pub value_json: String,
  pub created_at: String,
  pub updated_at: String,
}

impl RawRecord {
  /// Map a row selected with [`RECORD_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record_id:  row.get(0)?,
      kind:       row.get(1)?,
      value_json: row.get(2)?,
      created_at: row.get(3)?,
      updated_at: row.get(4)?,
    })
  }

  pub fn into_record(self) -> Result<StoredRecord> {
    let kind = decode_kind(&self.kind)?;
    let data: serde_json::Value = serde_json::from_str(&self.value_json)?;
    Ok(StoredRecord {
      record_id:  decode_uuid(&self.record_id)?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
      value:      RecordValue::from_parts(kind, data)?,
    })
  }
}

/// The column values written for `value`: kind, target id and payload.
pub fn encode_value(
  value: &RecordValue,
) -> Result<(&'static str, Option<String>, String)> {
  let target = value.relation().map(|(_, id)| encode_uuid(id));
  Ok((value.kind().as_str(), target, value.to_json()?.to_string()))
}
