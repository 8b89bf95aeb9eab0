//! Administrator notes on a submitted contact form.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::require_text;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminComment {
  pub first_name: String,
  pub last_name:  String,
  pub content:    String,
  /// The contact form being commented on.
  pub form:       Uuid,
}

impl AdminComment {
  pub fn clean(self) -> Result<Self> {
    require_text("first_name", &self.first_name, 80)?;
    require_text("last_name", &self.last_name, 80)?;
    require_text("content", &self.content, usize::MAX)?;
    Ok(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_content_is_rejected() {
    let comment = AdminComment {
      first_name: "Grace".into(),
      last_name:  "Hopper".into(),
      content:    "\n".into(),
      form:       Uuid::new_v4(),
    };
    assert!(comment.clean().is_err());
  }
}
