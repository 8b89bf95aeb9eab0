//! Record kinds and the allow-lists for polymorphic relations.
//!
//! Contact infos and admin comments reference "any record"; the guard here
//! restricts what that record may actually be.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::ValidationError;

/// Every kind of record the store holds.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecordKind {
  Affiliate,
  Announcement,
  MeetingAddress,
  Event,
  Project,
  GuestSpeakerForm,
  MentorForm,
  EventOrganizerForm,
  PartnerForm,
  ContactInfo,
  AdminComment,
}

impl RecordKind {
  pub const CONTACT_FORMS: [RecordKind; 4] = [
    RecordKind::GuestSpeakerForm,
    RecordKind::MentorForm,
    RecordKind::EventOrganizerForm,
    RecordKind::PartnerForm,
  ];

  pub fn is_contact_form(self) -> bool { Self::CONTACT_FORMS.contains(&self) }

  /// The discriminant stored in the `kind` column.
  pub fn as_str(self) -> &'static str { self.into() }
}

/// A polymorphic reference whose target kind is restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
  /// `AdminComment.form`
  CommentOnForm,
  /// `ContactInfo.content_object`
  ContactInfoOwner,
  /// `Event.meeting_address`
  EventAddress,
}

impl Relation {
  /// The record kind that owns the reference.
  pub fn owner(self) -> RecordKind {
    match self {
      Self::CommentOnForm => RecordKind::AdminComment,
      Self::ContactInfoOwner => RecordKind::ContactInfo,
      Self::EventAddress => RecordKind::Event,
    }
  }

  pub fn allowed(self) -> &'static [RecordKind] {
    match self {
      Self::CommentOnForm => &RecordKind::CONTACT_FORMS,
      Self::ContactInfoOwner => &[
        RecordKind::Event,
        RecordKind::GuestSpeakerForm,
        RecordKind::MentorForm,
        RecordKind::EventOrganizerForm,
        RecordKind::PartnerForm,
      ],
      Self::EventAddress => &[RecordKind::MeetingAddress],
    }
  }

  pub fn check(self, target: RecordKind) -> Result<(), ValidationError> {
    check_relation(self.owner(), target, self.allowed())
  }
}

/// Fail unless `target` is one of `allowed`.
pub fn check_relation(
  owner: RecordKind,
  target: RecordKind,
  allowed: &[RecordKind],
) -> Result<(), ValidationError> {
  if allowed.contains(&target) {
    Ok(())
  } else {
    Err(ValidationError::new(format!(
      "Unsupported relation: a {owner} cannot be attached to a {target}."
    )))
  }
}
