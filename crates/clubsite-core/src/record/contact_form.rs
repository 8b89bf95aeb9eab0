//! Contact forms submitted through the public site.
//!
//! The four kinds share [`ContactFormBase`], flattened into each form's JSON.
//! Submission time is the stored record's `created_at`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{optional_text, require_min, require_text};
use crate::{
  Result,
  error::ValidationError,
  fields::{GUEST_SPEAKER_AVAILABILITY, MENTOR_MEETING_INFORMATION},
  range::{RangePair, Strictness, check_range},
  schema,
};

// ─── Shared fields ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactFormBase {
  pub first_name:  String,
  pub last_name:   String,
  pub affiliation: Option<String>,
  pub thoughts:    Option<String>,
  #[serde(default)]
  pub reviewed:    bool,
  #[serde(default)]
  pub ignored:     bool,
}

impl ContactFormBase {
  fn clean(&self) -> Result<(), ValidationError> {
    require_text("first_name", &self.first_name, 80)?;
    require_text("last_name", &self.last_name, 80)?;
    optional_text("affiliation", self.affiliation.as_deref(), 150)?;
    Ok(())
  }
}

impl std::fmt::Display for ContactFormBase {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} {}", self.first_name, self.last_name)
  }
}

fn one() -> u16 { 1 }

// ─── Guest speaker ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestSpeakerForm {
  #[serde(flatten)]
  pub base:              ContactFormBase,
  pub topic:             String,
  /// One to three `{date, time}` slots; see [`GUEST_SPEAKER_AVAILABILITY`].
  pub availability:      Value,
  /// Presentation length in minutes.
  #[serde(default = "one")]
  pub length:            u16,
  pub visual_aids:       Option<String>,
  pub addl_visual_aids:  Option<String>,
  pub addl_tech:         Option<String>,
  #[serde(default)]
  pub consent_audio_rec: bool,
  #[serde(default)]
  pub consent_video_rec: bool,
  #[serde(default)]
  pub consent_streaming: bool,
  #[serde(default)]
  pub consent_materials: bool,
}

impl GuestSpeakerForm {
  pub fn clean(self) -> Result<Self> {
    self.base.clean()?;
    require_text("topic", &self.topic, 250)?;
    schema::validate(&self.availability, &GUEST_SPEAKER_AVAILABILITY)?;
    optional_text("visual_aids", self.visual_aids.as_deref(), 300)?;
    optional_text("addl_visual_aids", self.addl_visual_aids.as_deref(), 300)?;
    optional_text("addl_tech", self.addl_tech.as_deref(), 300)?;
    Ok(self)
  }
}

// ─── Mentor ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorForm {
  #[serde(flatten)]
  pub base:                ContactFormBase,
  #[serde(default = "one")]
  pub students:            u16,
  pub field_type:          String,
  pub field_name:          String,
  pub field_description:   Option<String>,
  pub availability_start:  NaiveDate,
  pub availability_end:    Option<NaiveDate>,
  /// Weekday/time pairs; see [`MENTOR_MEETING_INFORMATION`].
  pub meeting_information: Value,
  #[serde(default = "one")]
  pub weekly_minutes:      u16,
}

impl MentorForm {
  pub const MAX_STUDENTS: u16 = 6;

  pub fn clean(self) -> Result<Self> {
    self.base.clean()?;
    require_min("Number of students", self.students, 1)?;
    if self.students > Self::MAX_STUDENTS {
      return Err(ValidationError::new("Number of students too large.").into());
    }
    require_text("field_type", &self.field_type, 60)?;
    require_text("field_name", &self.field_name, 200)?;
    check_range(
      "availability date",
      &RangePair::new(Some(self.availability_start), self.availability_end),
      Strictness::Le,
    )?;
    schema::validate(&self.meeting_information, &MENTOR_MEETING_INFORMATION)?;
    require_min("Number of minutes", self.weekly_minutes, 1)?;
    Ok(self)
  }
}

// ─── Event organizer ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOrganizerForm {
  #[serde(flatten)]
  pub base:                 ContactFormBase,
  pub event_type:           String,
  #[serde(default)]
  pub financial_assistance: bool,
  pub min_attendees:        Option<u16>,
  pub max_attendees:        Option<u16>,
  pub advertising:          String,
}

impl EventOrganizerForm {
  pub fn clean(self) -> Result<Self> {
    self.base.clean()?;
    require_text("event_type", &self.event_type, 120)?;
    if let Some(min) = self.min_attendees {
      require_min("Minimum attendees", min, 1)?;
    }
    if let Some(max) = self.max_attendees {
      require_min("Maximum attendees", max, 1)?;
    }
    check_range(
      "attendees",
      &RangePair::new(self.min_attendees, self.max_attendees),
      Strictness::Lt,
    )?;
    require_text("advertising", &self.advertising, usize::MAX)?;
    Ok(self)
  }
}

// ─── Partner ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerForm {
  #[serde(flatten)]
  pub base:         ContactFormBase,
  #[serde(default)]
  pub commercial:   bool,
  pub industry:     Option<String>,
  pub min_org_size: Option<u32>,
  pub max_org_size: Option<u32>,
  #[serde(default)]
  pub funding:      bool,
  pub initiatives:  Option<String>,
}

impl PartnerForm {
  pub fn clean(self) -> Result<Self> {
    self.base.clean()?;
    optional_text("industry", self.industry.as_deref(), 300)?;
    if let Some(min) = self.min_org_size {
      require_min("Minimum organization size", min, 1)?;
    }
    if let Some(max) = self.max_org_size {
      require_min("Maximum organization size", max, 1)?;
    }
    check_range(
      "organization size",
      &RangePair::new(self.min_org_size, self.max_org_size),
      Strictness::Lt,
    )?;
    Ok(self)
  }
}
