//! Group projects.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;

use super::{optional_text, optional_url, require_text};
use crate::{Result, fields::PROJECT_AUTHORS, schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
pub enum ProjectStatus {
  #[serde(rename = "CO")]
  #[strum(to_string = "Complete")]
  Complete,
  #[serde(rename = "IP")]
  #[strum(to_string = "In Progress")]
  InProgress,
  #[default]
  #[serde(rename = "PL")]
  #[strum(to_string = "Planned")]
  Planned,
  #[serde(rename = "OT")]
  #[strum(to_string = "Other")]
  Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
  pub name:        String,
  /// Author names; see [`PROJECT_AUTHORS`].
  pub authors:     Value,
  pub description: String,
  pub image:       Option<String>,
  pub url:         Option<String>,
  #[serde(default)]
  pub status:      ProjectStatus,
}

impl Project {
  pub fn clean(self) -> Result<Self> {
    require_text("name", &self.name, 250)?;
    schema::validate(&self.authors, &PROJECT_AUTHORS)?;
    require_text("description", &self.description, usize::MAX)?;
    optional_text("image", self.image.as_deref(), 100)?;
    optional_url("url", self.url.as_deref(), 200)?;
    Ok(self)
  }

  /// Author names as strings, skipping anything that is not one.
  pub fn author_names(&self) -> Vec<&str> {
    self
      .authors
      .as_array()
      .map(|a| a.iter().filter_map(Value::as_str).collect())
      .unwrap_or_default()
  }
}

impl std::fmt::Display for Project {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.name)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn project(authors: Value) -> Project {
    Project {
      name: "Club Site".into(),
      authors,
      description: "The club's website.".into(),
      image: None,
      url: Some("https://github.com/example/club-site".into()),
      status: ProjectStatus::InProgress,
    }
  }

  #[test]
  fn valid() {
    assert!(project(json!(["Ada", "Grace"])).clean().is_ok());
  }

  #[test]
  fn needs_an_author() {
    assert!(project(json!([])).clean().is_err());
    assert!(project(json!([" "])).clean().is_err());
  }

  #[test]
  fn bad_url() {
    let mut p = project(json!(["Ada"]));
    p.url = Some("github".into());
    assert!(p.clean().is_err());
  }

  #[test]
  fn author_names() {
    assert_eq!(project(json!(["Ada", "Grace"])).author_names(), ["Ada", "Grace"]);
  }

  #[test]
  fn status_defaults_to_planned() {
    let p: Project = serde_json::from_value(json!({
      "name": "x", "authors": ["a"], "description": "d", "image": null, "url": null
    }))
    .unwrap();
    assert_eq!(p.status, ProjectStatus::Planned);
    assert_eq!(serde_json::to_value(ProjectStatus::Complete).unwrap(), json!("CO"));
  }
}
