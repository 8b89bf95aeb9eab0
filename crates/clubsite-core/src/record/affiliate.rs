//! Affiliate organizations shown on the site.

use serde::{Deserialize, Serialize};

use super::{optional_text, require_text, require_url};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliate {
  pub name:    String,
  /// Storage path of the uploaded logo.
  pub logo:    Option<String>,
  pub website: String,
}

impl Affiliate {
  pub fn clean(self) -> Result<Self> {
    require_text("name", &self.name, 100)?;
    optional_text("logo", self.logo.as_deref(), 100)?;
    require_url("website", &self.website, 150)?;
    Ok(self)
  }
}

impl std::fmt::Display for Affiliate {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.name)
  }
}
