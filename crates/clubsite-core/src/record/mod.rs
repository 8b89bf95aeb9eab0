//! Domain records and their `clean` hooks.
//!
//! Every record type has a `clean(self) -> Result<Self>` that runs the checks
//! for its fields and returns the (possibly normalized) value. [`RecordValue`]
//! wraps them for storage; its tag is the [`RecordKind`].

mod affiliate;
mod announcement;
mod comment;
mod contact_form;
mod contact_info;
mod event;
mod project;

use std::fmt::Display;

pub use affiliate::Affiliate;
pub use announcement::Announcement;
use chrono::{DateTime, Utc};
pub use comment::AdminComment;
pub use contact_form::{
  ContactFormBase, EventOrganizerForm, GuestSpeakerForm, MentorForm,
  PartnerForm,
};
pub use contact_info::ContactInfo;
pub use event::{Event, EventType, MeetingAddress, UsState};
pub use project::{Project, ProjectStatus};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::{
  Result,
  error::ValidationError,
  relation::{RecordKind, Relation},
};

// ─── Field helpers ───────────────────────────────────────────────────────────

/// A required text field: not blank and at most `max` characters.
pub(crate) fn require_text(
  label: &str,
  value: &str,
  max: usize,
) -> Result<(), ValidationError> {
  if value.trim().is_empty() {
    return Err(ValidationError::new(format!("{label} must not be blank.")));
  }
  check_length(label, value, max)
}

/// An optional text field: at most `max` characters when present.
pub(crate) fn optional_text(
  label: &str,
  value: Option<&str>,
  max: usize,
) -> Result<(), ValidationError> {
  value.map_or(Ok(()), |v| check_length(label, v, max))
}

fn check_length(
  label: &str,
  value: &str,
  max: usize,
) -> Result<(), ValidationError> {
  if value.chars().count() > max {
    Err(ValidationError::new(format!(
      "{label} must be at most {max} characters."
    )))
  } else {
    Ok(())
  }
}

/// A required absolute URL of at most `max` characters.
pub(crate) fn require_url(
  label: &str,
  value: &str,
  max: usize,
) -> Result<(), ValidationError> {
  require_text(label, value, max)?;
  Url::parse(value)
    .map(|_| ())
    .map_err(|_| ValidationError::new(format!("{label} must be a valid URL.")))
}

/// An optional URL; `None` and the empty string both mean "no link".
pub(crate) fn optional_url(
  label: &str,
  value: Option<&str>,
  max: usize,
) -> Result<(), ValidationError> {
  match value {
    Some(v) if !v.is_empty() => require_url(label, v, max),
    _ => Ok(()),
  }
}

pub(crate) fn require_min<T: PartialOrd + Display>(
  label: &str,
  value: T,
  min: T,
) -> Result<(), ValidationError> {
  if value < min {
    Err(ValidationError::new(format!("{label} too small.")))
  } else {
    Ok(())
  }
}

// ─── RecordValue ─────────────────────────────────────────────────────────────

/// Any record, tagged with its kind. The kind is the discriminant stored
/// alongside the JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum RecordValue {
  Affiliate(Affiliate),
  Announcement(Announcement),
  MeetingAddress(MeetingAddress),
  Event(Event),
  Project(Project),
  GuestSpeakerForm(GuestSpeakerForm),
  MentorForm(MentorForm),
  EventOrganizerForm(EventOrganizerForm),
  PartnerForm(PartnerForm),
  ContactInfo(ContactInfo),
  AdminComment(AdminComment),
}

impl RecordValue {
  pub fn kind(&self) -> RecordKind {
    match self {
      Self::Affiliate(_) => RecordKind::Affiliate,
      Self::Announcement(_) => RecordKind::Announcement,
      Self::MeetingAddress(_) => RecordKind::MeetingAddress,
      Self::Event(_) => RecordKind::Event,
      Self::Project(_) => RecordKind::Project,
      Self::GuestSpeakerForm(_) => RecordKind::GuestSpeakerForm,
      Self::MentorForm(_) => RecordKind::MentorForm,
      Self::EventOrganizerForm(_) => RecordKind::EventOrganizerForm,
      Self::PartnerForm(_) => RecordKind::PartnerForm,
      Self::ContactInfo(_) => RecordKind::ContactInfo,
      Self::AdminComment(_) => RecordKind::AdminComment,
    }
  }

  /// Run the record's field checks. Relation targets are not resolved here;
  /// see [`RecordValue::relation`].
  pub fn clean(self) -> Result<Self> {
    Ok(match self {
      Self::Affiliate(v) => Self::Affiliate(v.clean()?),
      Self::Announcement(v) => Self::Announcement(v.clean()?),
      Self::MeetingAddress(v) => Self::MeetingAddress(v.clean()?),
      Self::Event(v) => Self::Event(v.clean()?),
      Self::Project(v) => Self::Project(v.clean()?),
      Self::GuestSpeakerForm(v) => Self::GuestSpeakerForm(v.clean()?),
      Self::MentorForm(v) => Self::MentorForm(v.clean()?),
      Self::EventOrganizerForm(v) => Self::EventOrganizerForm(v.clean()?),
      Self::PartnerForm(v) => Self::PartnerForm(v.clean()?),
      Self::ContactInfo(v) => Self::ContactInfo(v.clean()?),
      Self::AdminComment(v) => Self::AdminComment(v.clean()?),
    })
  }

  /// The restricted reference this record holds, if any.
  pub fn relation(&self) -> Option<(Relation, Uuid)> {
    match self {
      Self::ContactInfo(v) => Some((Relation::ContactInfoOwner, v.target)),
      Self::AdminComment(v) => Some((Relation::CommentOnForm, v.form)),
      Self::Event(v) => v.meeting_address.map(|id| (Relation::EventAddress, id)),
      _ => None,
    }
  }

  /// The payload without the kind tag, for the `value_json` column.
  pub fn to_json(&self) -> Result<serde_json::Value> {
    let full = serde_json::to_value(self)?;
    Ok(full.get("data").cloned().unwrap_or(serde_json::Value::Null))
  }

  /// Rebuild from the stored kind and payload.
  pub fn from_parts(kind: RecordKind, data: serde_json::Value) -> Result<Self> {
    let wrapped = serde_json::json!({ "kind": kind.as_str(), "data": data });
    Ok(serde_json::from_value(wrapped)?)
  }
}

// ─── StoredRecord ────────────────────────────────────────────────────────────

/// A record as persisted. `created_at` doubles as the submission time of
/// contact forms and the creation time of announcements and comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
  pub record_id:  Uuid,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub value:      RecordValue,
}

impl StoredRecord {
  pub fn kind(&self) -> RecordKind { self.value.kind() }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn affiliate() -> RecordValue {
    RecordValue::Affiliate(Affiliate {
      name:    "NC State".into(),
      logo:    None,
      website: "https://ncsu.edu".into(),
    })
  }

  #[test]
  fn parts_round_trip() {
    let value = affiliate();
    let data = value.to_json().unwrap();
    assert_eq!(data["name"], "NC State");
    assert_eq!(RecordValue::from_parts(value.kind(), data).unwrap(), value);
  }

  #[test]
  fn serde_tag_matches_kind() {
    let full = serde_json::to_value(affiliate()).unwrap();
    assert_eq!(full["kind"], RecordKind::Affiliate.as_str());
  }

  #[test]
  fn wrong_payload_for_kind_fails() {
    let data = json!({ "title": "x", "body": [] });
    assert!(RecordValue::from_parts(RecordKind::Affiliate, data).is_err());
  }

  #[test]
  fn relation_of_contact_info() {
    let target = Uuid::new_v4();
    let info = RecordValue::ContactInfo(ContactInfo {
      info_type: Default::default(),
      preferred: false,
      value: "a@b.co".into(),
      target,
    });
    assert_eq!(info.relation(), Some((Relation::ContactInfoOwner, target)));
    assert_eq!(affiliate().relation(), None);
  }

  #[test]
  fn clean_dispatches_to_the_record() {
    let bad = RecordValue::Affiliate(Affiliate {
      name:    "".into(),
      logo:    None,
      website: "https://ncsu.edu".into(),
    });
    assert!(bad.clean().unwrap_err().is_validation());
  }

  #[test]
  fn helpers() {
    assert!(require_text("name", "  ", 10).is_err());
    assert!(require_text("name", "abcdef", 5).is_err());
    assert!(optional_text("name", None, 0).is_ok());
    assert!(optional_text("name", Some(""), 0).is_ok());
    assert!(optional_url("link", Some(""), 10).is_ok());
    assert!(require_url("link", "/relative", 50).is_err());
    assert!(require_min("Number of minutes", 0, 1).is_err());
  }
}
