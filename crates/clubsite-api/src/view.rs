//! JSON representation of stored records.

use chrono::{DateTime, Utc};
use clubsite_core::{
  record::StoredRecord,
  relation::RecordKind,
  store::RecordStore,
};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

/// A record's fields flattened next to its id and timestamps.
#[derive(Debug, Serialize)]
pub struct RecordView {
  pub id:         Uuid,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  #[serde(flatten)]
  pub data:       Value,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub contacts:   Option<Vec<RecordView>>,
}

impl RecordView {
  pub fn new(record: &StoredRecord) -> Result<Self, ApiError> {
    Ok(Self {
      id:         record.record_id,
      created_at: record.created_at,
      updated_at: record.updated_at,
      data:       record.value.to_json()?,
      contacts:   None,
    })
  }

  /// The view with the record's contact infos attached.
  pub async fn with_contacts<S: RecordStore>(
    record: &StoredRecord,
    store: &S,
  ) -> Result<Self, ApiError> {
    let contacts = store
      .related(record.record_id, RecordKind::ContactInfo)
      .await
      .map_err(ApiError::store)?;
    Ok(Self {
      contacts: Some(views(&contacts)?),
      ..Self::new(record)?
    })
  }
}

pub fn views(records: &[StoredRecord]) -> Result<Vec<RecordView>, ApiError> {
  records.iter().map(RecordView::new).collect()
}

/// `record` if it exists and is of `kind`; otherwise a 404.
pub async fn find<S: RecordStore>(
  store: &S,
  kind: RecordKind,
  id: Uuid,
) -> Result<StoredRecord, ApiError> {
  store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .filter(|r| r.kind() == kind)
    .ok_or_else(|| ApiError::NotFound(format!("{kind} {id} not found")))
}
