//! Contact values and their normalization.
//!
//! A contact value is a raw string with a caller-asserted [`ContactType`].
//! [`ContactValue::normalize`] validates the raw string against that type and,
//! for [`ContactType::Other`], reclassifies it to the most specific type the
//! string supports. Precedence is email, then phone, then "any non-blank
//! string".

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{email, error::ValidationError, phone};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display,
)]
pub enum ContactType {
  #[default]
  #[serde(rename = "EM")]
  #[strum(to_string = "Email Address")]
  Email,
  #[serde(rename = "PH")]
  #[strum(to_string = "Phone Number")]
  Phone,
  #[serde(rename = "OT")]
  #[strum(to_string = "Other Form of Contact")]
  Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactValue {
  #[serde(rename = "type")]
  pub declared: ContactType,
  pub raw:      String,
}

impl ContactValue {
  pub fn new(declared: ContactType, raw: impl Into<String>) -> Self {
    Self { declared, raw: raw.into() }
  }

  /// Validate and, for `Other`, reclassify. Returns the normalized value;
  /// `raw` is carried over unchanged.
  pub fn normalize(&self) -> Result<Self, ValidationError> {
    match self.declared {
      ContactType::Email => {
        email::validate_email(&self.raw)?;
        Ok(self.clone())
      }
      ContactType::Phone => {
        phone::validate_phone(&self.raw)?;
        Ok(self.clone())
      }
      ContactType::Other => {
        if email::is_valid_email(&self.raw) {
          tracing::debug!(value = %self.raw, "reclassified contact value as email");
          Ok(Self::new(ContactType::Email, self.raw.clone()))
        } else if phone::is_valid_phone(&self.raw) {
          tracing::debug!(value = %self.raw, "reclassified contact value as phone");
          Ok(Self::new(ContactType::Phone, self.raw.clone()))
        } else if self.raw.trim().is_empty() {
          Err(ValidationError::new(
            "Contact value must not only contain whitespace",
          ))
        } else {
          Ok(self.clone())
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn normalize(declared: ContactType, raw: &str) -> Result<ContactValue, ValidationError> {
    ContactValue::new(declared, raw).normalize()
  }

  #[test]
  fn email_type() {
    assert!(normalize(ContactType::Email, "valid@email.com").is_ok());
    assert!(normalize(ContactType::Email, "invalid.email").is_err());
    assert!(normalize(ContactType::Email, "").is_err());
  }

  #[test]
  fn declared_email_is_never_reclassified() {
    // A phone-shaped value is not rescued when declared as email.
    assert!(normalize(ContactType::Email, "123-456-7890").is_err());
  }

  #[test]
  fn phone_type() {
    assert!(normalize(ContactType::Phone, "(123)-456-7890").is_ok());
    assert!(normalize(ContactType::Phone, "(123)-456-789").is_err());
    assert!(normalize(ContactType::Phone, "1 (123)-456-7890").is_err());
    assert!(normalize(ContactType::Phone, "").is_err());
  }

  #[test]
  fn other_reclassified_as_email() {
    let v = normalize(ContactType::Other, "valid@email.com").unwrap();
    assert_eq!(v, ContactValue::new(ContactType::Email, "valid@email.com"));
  }

  #[test]
  fn other_reclassified_as_phone() {
    let v = normalize(ContactType::Other, "(123)-456-7890").unwrap();
    assert_eq!(v.declared, ContactType::Phone);
    assert_eq!(v.raw, "(123)-456-7890");
  }

  #[test]
  fn other_stays_other_for_free_text() {
    let v = normalize(ContactType::Other, "@ai_club on Discord").unwrap();
    assert_eq!(v.declared, ContactType::Other);
  }

  #[test]
  fn other_whitespace_only_fails() {
    assert!(normalize(ContactType::Other, "   ").is_err());
    assert!(normalize(ContactType::Other, " \t\n  \r").is_err());
    assert!(normalize(ContactType::Other, "").is_err());
  }

  #[test]
  fn normalization_is_idempotent() {
    for (declared, raw) in [
      (ContactType::Other, "valid@email.com"),
      (ContactType::Other, "+1 (123)-456-7890"),
      (ContactType::Other, "Find us at the club fair"),
    ] {
      let once = normalize(declared, raw).unwrap();
      assert_eq!(once.normalize().unwrap(), once);
    }
  }

  #[test]
  fn input_is_not_mutated() {
    let original = ContactValue::new(ContactType::Other, "valid@email.com");
    let _ = original.normalize().unwrap();
    assert_eq!(original.declared, ContactType::Other);
  }

  #[test]
  fn serialized_as_two_letter_codes() {
    assert_eq!(serde_json::to_value(ContactType::Email).unwrap(), "EM");
    assert_eq!(serde_json::to_value(ContactType::Phone).unwrap(), "PH");
    let other: ContactType = serde_json::from_value("OT".into()).unwrap();
    assert_eq!(other, ContactType::Other);
    assert!(serde_json::from_value::<ContactType>("email".into()).is_err());
  }

  #[test]
  fn labels() {
    assert_eq!(ContactType::Email.to_string(), "Email Address");
    assert_eq!(ContactType::Other.to_string(), "Other Form of Contact");
  }
}
