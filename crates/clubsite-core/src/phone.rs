//! Phone number check by digit count.
//!
//! Formatting is not inspected: after removing a `+1` country code that
//! appears before the first digit, exactly ten digits must remain.

use crate::error::ValidationError;

const COUNTRY_CODE: &str = "+1";
const DIGITS: usize = 10;

/// `raw` with a leading `+1` removed, if one precedes every digit.
fn strip_country_code(raw: &str) -> &str {
  match raw.find(COUNTRY_CODE) {
    Some(at) if !raw[..at].chars().any(|c| c.is_ascii_digit()) => {
      &raw[at + COUNTRY_CODE.len()..]
    }
    _ => raw,
  }
}

pub fn is_valid_phone(raw: &str) -> bool {
  strip_country_code(raw)
    .chars()
    .filter(char::is_ascii_digit)
    .count()
    == DIGITS
}

pub fn validate_phone(raw: &str) -> Result<(), ValidationError> {
  if is_valid_phone(raw) {
    Ok(())
  } else {
    Err(ValidationError::new(format!(
      "{raw:?} is not a valid phone number"
    )))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ten_digits() {
    assert!(validate_phone("123-456-7890").is_ok());
    assert!(validate_phone("(123) 456 7890").is_ok());
    assert!(validate_phone("1234567890").is_ok());
  }

  #[test]
  fn country_code_is_stripped() {
    assert!(validate_phone("+1 (123)-456-7890").is_ok());
    assert!(validate_phone("+11234567890").is_ok());
  }

  #[test]
  fn eleven_digits_without_plus_is_too_long() {
    assert!(validate_phone("1 (123)-456-7890").is_err());
  }

  #[test]
  fn nine_digits_is_too_short() {
    assert!(validate_phone("(123)-456-789").is_err());
  }

  #[test]
  fn plus_one_after_digits_is_not_a_country_code() {
    assert!(validate_phone("123-456-7890 +1").is_err());
  }

  #[test]
  fn empty_is_invalid() {
    assert!(validate_phone("").is_err());
    assert!(validate_phone("   ").is_err());
  }
}
