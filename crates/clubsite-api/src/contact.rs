//! Handlers for contact forms, their contact infos and admin comments.
//!
//! | Method   | Path | Auth |
//! |----------|------|------|
//! | `POST`   | `/contact/{kind}` | public |
//! | `GET`    | `/contact/{kind}` | admin |
//! | `GET`    | `/contact/{kind}/{id}` | admin |
//! | `PUT`    | `/contact/{kind}/{id}` | admin |
//! | `DELETE` | `/contact/{kind}/{id}` | admin |
//! | `GET`    | `/contact/{kind}/{id}/comments` | admin |
//! | `POST`   | `/contact/{kind}/{id}/comments` | admin |
//! | `POST`   | `/contact-infos` | admin |
//! | `DELETE` | `/contact-infos/{id}` | admin |
//!
//! `{kind}` is one of `guest-speaker`, `mentor`, `event-organizer`,
//! `partner`.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use clubsite_core::{
  contact::ContactType,
  record::{AdminComment, ContactInfo, RecordValue},
  relation::{RecordKind, Relation},
  store::{RecordStore, validate_record},
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{
  AppState,
  auth::Admin,
  error::ApiError,
  view::{RecordView, find, views},
};

// ─── Path and body types ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
  GuestSpeaker,
  Mentor,
  EventOrganizer,
  Partner,
}

impl FormKind {
  pub fn record_kind(self) -> RecordKind {
    match self {
      Self::GuestSpeaker => RecordKind::GuestSpeakerForm,
      Self::Mentor => RecordKind::MentorForm,
      Self::EventOrganizer => RecordKind::EventOrganizerForm,
      Self::Partner => RecordKind::PartnerForm,
    }
  }
}

/// A contact submitted together with a form.
#[derive(Debug, Deserialize)]
pub struct NewContact {
  #[serde(rename = "type", default)]
  pub info_type: ContactType,
  #[serde(default)]
  pub preferred: bool,
  pub value:     String,
}

#[derive(Debug, Deserialize)]
pub struct NewComment {
  pub first_name: String,
  pub last_name:  String,
  pub content:    String,
}

/// Fields the public may not set on a submission.
const ADMIN_ONLY_FIELDS: [&str; 2] = ["reviewed", "ignored"];

// ─── Public submission ───────────────────────────────────────────────────────

/// `POST /contact/{kind}`: body is the form's fields plus a `contacts` array.
///
/// The form and every contact are cleaned before anything is stored, and
/// they are stored in one transaction, so a submission is never left with
/// only some of its contacts.
pub async fn submit<S>(
  State(state): State<AppState<S>>,
  Path(kind): Path<FormKind>,
  Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let Value::Object(mut fields) = body else {
    return Err(ApiError::BadRequest("expected a JSON object".into()));
  };
  let contacts = fields
    .remove("contacts")
    .ok_or_else(|| ApiError::BadRequest("contacts: this field is required".into()))?;
  let contacts: Vec<NewContact> = serde_json::from_value(contacts)
    .map_err(|e| ApiError::BadRequest(format!("contacts: {e}")))?;
  for field in ADMIN_ONLY_FIELDS {
    fields.remove(field);
  }

  let form = RecordValue::from_parts(kind.record_kind(), Value::Object(fields))?
    .clean()?;
  Relation::ContactInfoOwner.check(form.kind())?;
  let infos = contacts
    .into_iter()
    .map(|c| {
      ContactInfo {
        info_type: c.info_type,
        preferred: c.preferred,
        value:     c.value,
        target:    Uuid::nil(),
      }
      .clean()
    })
    .collect::<Result<Vec<_>, _>>()?;

  let (record, contacts) = state
    .store
    .create_with_contacts(form, infos)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(
    id = %record.record_id,
    kind = %record.kind(),
    contacts = contacts.len(),
    "contact form submitted"
  );

  let view = RecordView {
    contacts: Some(views(&contacts)?),
    ..RecordView::new(&record)?
  };
  Ok((StatusCode::CREATED, Json(view)))
}

// ─── Admin: forms ────────────────────────────────────────────────────────────

/// `GET /contact/{kind}`, newest first.
pub async fn list<S>(
  _: Admin,
  State(state): State<AppState<S>>,
  Path(kind): Path<FormKind>,
) -> Result<Json<Vec<RecordView>>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let store = state.store.as_ref();
  let forms = store
    .list(kind.record_kind())
    .await
    .map_err(ApiError::store)?;

  let mut out = Vec::with_capacity(forms.len());
  for record in forms.iter().rev() {
    out.push(RecordView::with_contacts(record, store).await?);
  }
  Ok(Json(out))
}

/// `GET /contact/{kind}/{id}`
pub async fn get_one<S>(
  _: Admin,
  State(state): State<AppState<S>>,
  Path((kind, id)): Path<(FormKind, Uuid)>,
) -> Result<Json<RecordView>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let store = state.store.as_ref();
  let record = find(store, kind.record_kind(), id).await?;
  Ok(Json(RecordView::with_contacts(&record, store).await?))
}

/// `PUT /contact/{kind}/{id}`: full replacement of the form's fields, e.g. to
/// mark it reviewed. Contacts are managed through `/contact-infos`.
pub async fn update<S>(
  _: Admin,
  State(state): State<AppState<S>>,
  Path((kind, id)): Path<(FormKind, Uuid)>,
  Json(body): Json<Value>,
) -> Result<Json<RecordView>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let store = state.store.as_ref();
  find(store, kind.record_kind(), id).await?;
  let value = RecordValue::from_parts(kind.record_kind(), body)?;
  let value = validate_record(store, value).await?;
  let record = store
    .update(id, value)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("{} {id} not found", kind.record_kind())))?;
  Ok(Json(RecordView::with_contacts(&record, store).await?))
}

/// `DELETE /contact/{kind}/{id}`; contacts and comments go with it.
pub async fn delete<S>(
  _: Admin,
  State(state): State<AppState<S>>,
  Path((kind, id)): Path<(FormKind, Uuid)>,
) -> Result<StatusCode, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  find(state.store.as_ref(), kind.record_kind(), id).await?;
  state.store.delete(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Admin: comments ─────────────────────────────────────────────────────────

/// `GET /contact/{kind}/{id}/comments`
pub async fn list_comments<S>(
  _: Admin,
  State(state): State<AppState<S>>,
  Path((kind, id)): Path<(FormKind, Uuid)>,
) -> Result<Json<Vec<RecordView>>, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let store = state.store.as_ref();
  find(store, kind.record_kind(), id).await?;
  let comments = store
    .related(id, RecordKind::AdminComment)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(views(&comments)?))
}

/// `POST /contact/{kind}/{id}/comments`
pub async fn add_comment<S>(
  _: Admin,
  State(state): State<AppState<S>>,
  Path((kind, id)): Path<(FormKind, Uuid)>,
  Json(body): Json<NewComment>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let store = state.store.as_ref();
  find(store, kind.record_kind(), id).await?;
  let comment = RecordValue::AdminComment(AdminComment {
    first_name: body.first_name,
    last_name:  body.last_name,
    content:    body.content,
    form:       id,
  });
  let comment = validate_record(store, comment).await?;
  let record = store.create(comment).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(RecordView::new(&record)?)))
}

// ─── Admin: contact infos ────────────────────────────────────────────────────

/// `POST /contact-infos`: body is `{type, preferred, value, target}`.
pub async fn add_contact_info<S>(
  _: Admin,
  State(state): State<AppState<S>>,
  Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  let store = state.store.as_ref();
  let value = RecordValue::from_parts(RecordKind::ContactInfo, body)?;
  let value = validate_record(store, value).await?;
  let record = store.create(value).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(RecordView::new(&record)?)))
}

/// `DELETE /contact-infos/{id}`
pub async fn delete_contact_info<S>(
  _: Admin,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: RecordStore + Clone + 'static,
{
  find(state.store.as_ref(), RecordKind::ContactInfo, id).await?;
  state.store.delete(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
