//! Club events and meeting locations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;
use uuid::Uuid;

use super::{optional_url, require_text};
use crate::{
  Result,
  error::ValidationError,
  fields::EVENT_TOPICS,
  schema,
};

// ─── Event ───────────────────────────────────────────────────────────────────

/// Serialized as a two-letter code; `Display` gives the human label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
pub enum EventType {
  #[serde(rename = "GS")]
  #[strum(to_string = "Guest Speaker Presentation")]
  GuestSpeaker,
  #[serde(rename = "WS")]
  #[strum(to_string = "Workshop")]
  Workshop,
  #[serde(rename = "IP")]
  #[strum(to_string = "Interview Prep Session")]
  InterviewPrep,
  #[serde(rename = "DI")]
  #[strum(to_string = "Free Form Discussion")]
  Discussion,
  #[serde(rename = "PM")]
  #[strum(to_string = "Group Project Meeting")]
  ProjectMeeting,
  #[serde(rename = "HM")]
  #[strum(to_string = "Hackathon Meeting")]
  HackathonMeeting,
  #[default]
  #[serde(rename = "OT")]
  #[strum(to_string = "Other Event")]
  Other,
}

fn empty_list() -> Value { Value::Array(Vec::new()) }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
  #[serde(rename = "type", default)]
  pub event_type:      EventType,
  /// Non-blank topic strings; see [`EVENT_TOPICS`].
  #[serde(default = "empty_list")]
  pub topics:          Value,
  pub start:           DateTime<Utc>,
  pub end:             DateTime<Utc>,
  pub calendar_link:   Option<String>,
  pub meeting_link:    Option<String>,
  /// A [`MeetingAddress`] record.
  pub meeting_address: Option<Uuid>,
}

impl Event {
  pub fn clean(self) -> Result<Self> {
    schema::validate(&self.topics, &EVENT_TOPICS)?;
    if self.start >= self.end {
      return Err(
        ValidationError::new(
          "Event start date and time must fall before its end date and time.",
        )
        .into(),
      );
    }
    optional_url("calendar_link", self.calendar_link.as_deref(), 400)?;
    optional_url("meeting_link", self.meeting_link.as_deref(), 200)?;
    Ok(self)
  }

  /// Whether the event has yet to start at `now`.
  pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool { self.start > now }
}

impl std::fmt::Display for Event {
  /// `"Workshop on 04-20-2021"` or `"Workshop from 04-20-2021 to 04-22-2021"`.
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let start = self.start.format("%m-%d-%Y");
    if self.start.date_naive() == self.end.date_naive() {
      write!(f, "{} on {start}", self.event_type)
    } else {
      write!(f, "{} from {start} to {}", self.event_type, self.end.format("%m-%d-%Y"))
    }
  }
}

// ─── Meeting address ─────────────────────────────────────────────────────────

/// US states plus DC, serialized as their postal abbreviation.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum UsState {
  #[strum(to_string = "Alabama")] AL,
  #[strum(to_string = "Alaska")] AK,
  #[strum(to_string = "Arizona")] AZ,
  #[strum(to_string = "Arkansas")] AR,
  #[strum(to_string = "California")] CA,
  #[strum(to_string = "Colorado")] CO,
  #[strum(to_string = "Connecticut")] CT,
  #[strum(to_string = "Washington D.C.")] DC,
  #[strum(to_string = "Delaware")] DE,
  #[strum(to_string = "Florida")] FL,
  #[strum(to_string = "Georgia")] GA,
  #[strum(to_string = "Hawaii")] HI,
  #[strum(to_string = "Idaho")] ID,
  #[strum(to_string = "Illinois")] IL,
  #[strum(to_string = "Indiana")] IN,
  #[strum(to_string = "Iowa")] IA,
  #[strum(to_string = "Kansas")] KS,
  #[strum(to_string = "Louisiana")] LA,
  #[strum(to_string = "Maine")] ME,
  #[strum(to_string = "Maryland")] MD,
  #[strum(to_string = "Massachusetts")] MA,
  #[strum(to_string = "Michigan")] MI,
  #[strum(to_string = "Minnesota")] MN,
  #[strum(to_string = "Mississippi")] MS,
  #[strum(to_string = "Missouri")] MO,
  #[strum(to_string = "Montana")] MT,
  #[strum(to_string = "Nebraska")] NE,
  #[strum(to_string = "Nevada")] NV,
  #[strum(to_string = "New Hampshire")] NH,
  #[strum(to_string = "New Jersey")] NJ,
  #[strum(to_string = "New Mexico")] NM,
  #[strum(to_string = "New York")] NY,
  #[strum(to_string = "North Carolina")] NC,
  #[strum(to_string = "North Dakota")] ND,
  #[strum(to_string = "Ohio")] OH,
  #[strum(to_string = "Oklahoma")] OK,
  #[strum(to_string = "Oregon")] OR,
  #[strum(to_string = "Pennsylvania")] PA,
  #[strum(to_string = "Rhode Island")] RI,
  #[strum(to_string = "South Carolina")] SC,
  #[strum(to_string = "South Dakota")] SD,
  #[strum(to_string = "Tennessee")] TN,
  #[strum(to_string = "Texas")] TX,
  #[strum(to_string = "Utah")] UT,
  #[strum(to_string = "Vermont")] VT,
  #[strum(to_string = "Virginia")] VA,
  #[strum(to_string = "Washington")] WA,
  #[strum(to_string = "Wisconsin")] WI,
  #[strum(to_string = "West Virginia")] WV,
  #[strum(to_string = "Wyoming")] WY,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingAddress {
  pub street_address: String,
  pub city:           String,
  pub state:          UsState,
  pub zip_code:       u32,
  pub building_name:  String,
  pub room:           String,
}

impl MeetingAddress {
  pub fn clean(self) -> Result<Self> {
    require_text("street_address", &self.street_address, 100)?;
    require_text("city", &self.city, 50)?;
    if !(10000..=99999).contains(&self.zip_code) {
      return Err(ValidationError::new("Zip code must contain 5 digits.").into());
    }
    require_text("building_name", &self.building_name, 75)?;
    require_text("room", &self.room, 75)?;
    Ok(self)
  }
}
