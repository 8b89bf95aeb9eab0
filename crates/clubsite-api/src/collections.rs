//! Generic CRUD handlers for the site's record collections.
//!
//! | Method   | Path | Auth |
//! |----------|------|------|
//! | `GET`    | `/<collection>` | public (meeting addresses: admin) |
//! | `GET`    | `/<collection>/{id}` | public (meeting addresses: admin) |
//! | `POST`   | `/<collection>` | admin |
//! | `PUT`    | `/<collection>/{id}` | admin |
//! | `DELETE` | `/<collection>/{id}` | admin |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use clubsite_core::{
  record::{RecordValue, StoredRecord},
  relation::RecordKind,
  store::{RecordStore, validate_record},
  task::Task,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
  AppState,
  auth::Admin,
  error::ApiError,
  view::{RecordView, find, views},
};

// ─── Collections ─────────────────────────────────────────────────────────────

/// A record kind served as a REST collection.
pub trait Collection: Send + Sync + 'static {
  const KIND: RecordKind;
  const NEWEST_FIRST: bool = false;

  /// Task to send after a successful create.
  fn on_create(_saved: &RecordValue) -> Option<Task> { None }

  /// Task to send after a successful update.
  fn on_update(_previous: &RecordValue, _saved: &RecordValue) -> Option<Task> {
    None
  }
}

pub struct Affiliates;
pub struct Announcements;
pub struct Events;
pub struct MeetingAddresses;
pub struct Projects;

impl Collection for Affiliates {
  const KIND: RecordKind = RecordKind::Affiliate;
}

impl Collection for Announcements {
  const KIND: RecordKind = RecordKind::Announcement;
  const NEWEST_FIRST: bool = true;
}

impl Collection for Events {
  const KIND: RecordKind = RecordKind::Event;

  fn on_create(saved: &RecordValue) -> Option<Task> {
    match saved {
      RecordValue::Event(e) => Task::for_event(None, e),
      _ => None,
    }
  }

  fn on_update(previous: &RecordValue, saved: &RecordValue) -> Option<Task> {
    match (previous, saved) {
      (RecordValue::Event(prev), RecordValue::Event(e)) => {
        Task::for_event(Some(prev), e)
      }
      _ => None,
    }
  }
}

impl Collection for MeetingAddresses {
  const KIND: RecordKind = RecordKind::MeetingAddress;
}

impl Collection for Projects {
  const KIND: RecordKind = RecordKind::Project;

  fn on_create(saved: &RecordValue) -> Option<Task> {
    match saved {
      RecordValue::Project(p) => Some(Task::for_new_project(p)),
      _ => None,
    }
  }
}

/// All records of `C`, in the collection's order.
pub async fn list_records<S, C>(store: &S) -> Result<Vec<StoredRecord>, ApiError>
where
  S: RecordStore,
  C: Collection,
{
  let mut records = store.list(C::KIND).await.map_err(ApiError::store)?;
  if C::NEWEST_FIRST {
    records.reverse();
  }
  Ok(records)
}

// ─── Read ────────────────────────────────────────────────────────────────────

/// `GET /<collection>`
pub async fn list<S, C>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<RecordView>>, ApiError>
where
  S: RecordStore + Clone + 'static,
  C: Collection,
{
  let records = list_records::<S, C>(state.store.as_ref()).await?;
  Ok(Json(views(&records)?))
}

/// `GET /<collection>/{id}`
pub async fn get_one<S, C>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<RecordView>, ApiError>
where
  S: RecordStore + Clone + 'static,
  C: Collection,
{
  let record = find(state.store.as_ref(), C::KIND, id).await?;
  Ok(Json(RecordView::new(&record)?))
}

/// `GET /meeting-addresses[/{id}]` for the admin only.
pub async fn admin_list<S, C>(
  _: Admin,
  state: State<AppState<S>>,
) -> Result<Json<Vec<RecordView>>, ApiError>
where
  S: RecordStore + Clone + 'static,
  C: Collection,
{
  list::<S, C>(state).await
}

pub async fn admin_get_one<S, C>(
  _: Admin,
  state: State<AppState<S>>,
  id: Path<Uuid>,
) -> Result<Json<RecordView>, ApiError>
where
  S: RecordStore + Clone + 'static,
  C: Collection,
{
  get_one::<S, C>(state, id).await
}

// ─── Write ───────────────────────────────────────────────────────────────────

/// `POST /<collection>`: body is the record's fields.
pub async fn create<S, C>(
  _: Admin,
  State(state): State<AppState<S>>,
  Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + 'static,
  C: Collection,
{
  let value = RecordValue::from_parts(C::KIND, body)?;
  let value = validate_record(state.store.as_ref(), value).await?;
  let record = state.store.create(value).await.map_err(ApiError::store)?;

  if let Some(task) = C::on_create(&record.value) {
    state.tasks.send(task);
  }
  Ok((StatusCode::CREATED, Json(RecordView::new(&record)?)))
}

/// `PUT /<collection>/{id}`: body is the full replacement.
pub async fn update<S, C>(
  _: Admin,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<Value>,
) -> Result<Json<RecordView>, ApiError>
where
  S: RecordStore + Clone + 'static,
  C: Collection,
{
  let previous = find(state.store.as_ref(), C::KIND, id).await?;
  let value = RecordValue::from_parts(C::KIND, body)?;
  let value = validate_record(state.store.as_ref(), value).await?;
  let record = state
    .store
    .update(id, value)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("{} {id} not found", C::KIND)))?;

  if let Some(task) = C::on_update(&previous.value, &record.value) {
    state.tasks.send(task);
  }
  Ok(Json(RecordView::new(&record)?))
}

/// `DELETE /<collection>/{id}`
pub async fn delete<S, C>(
  _: Admin,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: RecordStore + Clone + 'static,
  C: Collection,
{
  find(state.store.as_ref(), C::KIND, id).await?;
  state.store.delete(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
