//! Read handlers for `/events`. Writes go through [`crate::collections`].
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/events` | Optional `?upcoming=true`; ordered by start |
//! | `GET`  | `/events/{id}` | 404 if not found |
//!
//! Both include each event's contact infos.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::Utc;
use clubsite_core::{
  record::{RecordValue, StoredRecord},
  relation::RecordKind,
  store::RecordStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  AppState,
  error::ApiError,
  view::{RecordView, find},
};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  /// Only events that have not started yet.
  #[serde(default)]
  pub upcoming: bool,
}

fn start_of(record: &StoredRecord) -> Option<chrono::DateTime<Utc>> {
  match &record.value {
    RecordValue::Event(e) => Some(e.start),
    _ => None,
  }
}

/// `GET /events[?upcoming=true]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<RecordView>>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let now = Utc::now();
  let mut events = state
    .store
    .list(RecordKind::Event)
    .await
    .map_err(ApiError::store)?;
  if params.upcoming {
    events.retain(|r| start_of(r).is_some_and(|start| start > now));
  }
  events.sort_by_key(start_of);

  let mut out = Vec::with_capacity(events.len());
  for record in &events {
    out.push(RecordView::with_contacts(record, state.store.as_ref()).await?);
  }
  Ok(Json(out))
}

/// `GET /events/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<RecordView>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let record = find(state.store.as_ref(), RecordKind::Event, id).await?;
  Ok(Json(RecordView::with_contacts(&record, state.store.as_ref()).await?))
}
