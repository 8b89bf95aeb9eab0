//! A point of contact attached to an event or a contact form.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Result,
  contact::{ContactType, ContactValue},
  error::ValidationError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
  #[serde(rename = "type", default)]
  pub info_type: ContactType,
  #[serde(default)]
  pub preferred: bool,
  pub value:     String,
  /// The record this contact belongs to.
  pub target:    Uuid,
}

impl ContactInfo {
  pub const MAX_VALUE_LENGTH: usize = 50;

  /// Normalizes `value` and, for `Other`, replaces `info_type` with the
  /// reclassified type. The target's kind is checked by the caller.
  pub fn clean(self) -> Result<Self> {
    if self.value.chars().count() > Self::MAX_VALUE_LENGTH {
      return Err(
        ValidationError::new(format!(
          "Contact value must be at most {} characters.",
          Self::MAX_VALUE_LENGTH
        ))
        .into(),
      );
    }
    let normalized = ContactValue::new(self.info_type, &self.value).normalize()?;
    Ok(Self { info_type: normalized.declared, ..self })
  }
}

impl std::fmt::Display for ContactInfo {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: {}", self.info_type, self.value)
  }
}
