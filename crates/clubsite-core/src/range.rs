//! Cross-field `min`/`max` consistency.

use std::fmt::Display;

use crate::error::ValidationError;

/// Whether the bounds of a [`RangePair`] may be equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
  /// `min < max`
  Lt,
  /// `min <= max`
  Le,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangePair<T> {
  pub min: Option<T>,
  pub max: Option<T>,
}

impl<T> RangePair<T> {
  pub fn new(min: Option<T>, max: Option<T>) -> Self { Self { min, max } }
}

/// Check a pair of optional bounds. Succeeds when either bound is absent.
///
/// `label` names the quantity in the error message, e.g. `"attendees"`.
pub fn check_range<T: PartialOrd + Display>(
  label: &str,
  pair: &RangePair<T>,
  strictness: Strictness,
) -> Result<(), ValidationError> {
  let (Some(min), Some(max)) = (&pair.min, &pair.max) else {
    return Ok(());
  };
  match strictness {
    Strictness::Lt if min >= max => Err(ValidationError::new(format!(
      "Minimum {label} ({min}) must be less than maximum {label} ({max})."
    ))),
    Strictness::Le if min > max => Err(ValidationError::new(format!(
      "Minimum {label} ({min}) must not exceed maximum {label} ({max})."
    ))),
    _ => Ok(()),
  }
}
