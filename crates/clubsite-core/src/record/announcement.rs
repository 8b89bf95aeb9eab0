//! Club announcements.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::require_text;
use crate::{Result, fields::ANNOUNCEMENT_BODY, schema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
  pub title: String,
  /// Serialized HTML elements; see [`ANNOUNCEMENT_BODY`].
  pub body:  Value,
}

impl Announcement {
  pub fn new(title: impl Into<String>, body: Value) -> Self {
    Self { title: title.into(), body }
  }

  pub fn clean(self) -> Result<Self> {
    require_text("title", &self.title, 250)?;
    schema::validate(&self.body, &ANNOUNCEMENT_BODY)?;
    Ok(self)
  }
}

impl std::fmt::Display for Announcement {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.title)
  }
}
