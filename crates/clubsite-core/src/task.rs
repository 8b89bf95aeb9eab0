//! Announcement tasks sent after events and projects are saved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::record::{Announcement, Event, EventType, Project};

/// A deferred unit of work. Each task turns into one announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Task {
  EventCreated {
    event_type: EventType,
    start:      DateTime<Utc>,
  },
  EventRescheduled {
    event_type: EventType,
    start:      DateTime<Utc>,
  },
  ProjectCreated {
    name:        String,
    authors:     Vec<String>,
    description: String,
    url:         Option<String>,
  },
}

impl Task {
  /// The task to send after saving `saved`, given the stored value it
  /// replaced (`None` on create). Only a changed start reschedules.
  pub fn for_event(previous: Option<&Event>, saved: &Event) -> Option<Self> {
    match previous {
      None => Some(Self::EventCreated {
        event_type: saved.event_type,
        start:      saved.start,
      }),
      Some(prev) if prev.start != saved.start => Some(Self::EventRescheduled {
        event_type: saved.event_type,
        start:      saved.start,
      }),
      Some(_) => None,
    }
  }

  pub fn for_new_project(project: &Project) -> Self {
    Self::ProjectCreated {
      name:        project.name.clone(),
      authors:     project.author_names().into_iter().map(String::from).collect(),
      description: project.description.clone(),
      url:         project.url.clone(),
    }
  }

  /// The announcement this task stores. Not yet cleaned.
  pub fn announcement(&self) -> Announcement {
    match self {
      Self::EventCreated { event_type, start } => Announcement::new(
        "New Event!",
        json!([paragraph(format!(
          "A new {event_type} has been scheduled for {}.",
          format_start(start)
        ))]),
      ),
      Self::EventRescheduled { event_type, start } => Announcement::new(
        "Event Rescheduled",
        json!([paragraph(format!(
          "The {event_type} has been rescheduled to {}.",
          format_start(start)
        ))]),
      ),
      Self::ProjectCreated { name, authors, description, url } => {
        let mut body = vec![
          json!({ "element": "h3", "content": name }),
          json!({ "element": "h6", "content": authors.join(", ") }),
          paragraph(description.clone()),
          json!({ "element": "hr" }),
        ];
        if let Some(url) = url.as_deref().filter(|u| !u.is_empty()) {
          body.push(json!({ "element": "a", "href": url, "content": "Read More" }));
        }
        Announcement::new("New Project!", Value::Array(body))
      }
    }
  }
}

fn paragraph(content: String) -> Value {
  json!({ "element": "p", "content": content })
}

fn format_start(start: &DateTime<Utc>) -> String {
  start.format("%B %-d, %Y at %-I:%M %p UTC").to_string()
}

/// Fire-and-forget delivery of [`Task`]s. Failures are the implementation's
/// to log; the sender never learns about them.
pub trait TaskQueue: Send + Sync {
  fn send(&self, task: Task);
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};

  use super::*;
  use crate::record::ProjectStatus;

  fn event(start: DateTime<Utc>) -> Event {
    Event {
      event_type:      EventType::Workshop,
      topics:          json!([]),
      start,
      end:             start + Duration::hours(2),
      calendar_link:   None,
      meeting_link:    None,
      meeting_address: None,
    }
  }

  fn start() -> DateTime<Utc> { Utc.with_ymd_and_hms(2021, 4, 20, 18, 30, 0).unwrap() }

  #[test]
  fn created_event_announcement() {
    let task = Task::for_event(None, &event(start())).unwrap();
    let a = task.announcement();
    assert_eq!(a.title, "New Event!");
    assert_eq!(
      a.body[0]["content"],
      "A new Workshop has been scheduled for April 20, 2021 at 6:30 PM UTC."
    );
    assert!(a.clean().is_ok());
  }

  #[test]
  fn rescheduled_only_when_start_changes() {
    let old = event(start());
    let mut moved = old.clone();
    moved.start += Duration::days(1);
    moved.end += Duration::days(1);
    assert!(matches!(
      Task::for_event(Some(&old), &moved),
      Some(Task::EventRescheduled { .. })
    ));

    let mut renamed = old.clone();
    renamed.meeting_link = Some("https://meet.example.com".into());
    assert_eq!(Task::for_event(Some(&old), &renamed), None);
  }

  #[test]
  fn rescheduled_announcement_is_valid() {
    let task = Task::EventRescheduled { event_type: EventType::Discussion, start: start() };
    let a = task.announcement();
    assert_eq!(a.title, "Event Rescheduled");
    assert!(a.clean().is_ok());
  }

  #[test]
  fn project_announcement() {
    let project = Project {
      name:        "Club Site".into(),
      authors:     json!(["Ada", "Grace"]),
      description: "Our website.".into(),
      image:       None,
      url:         Some("https://github.com/example/club-site".into()),
      status:      ProjectStatus::InProgress,
    };
    let a = Task::for_new_project(&project).announcement();
    assert_eq!(a.title, "New Project!");
    let body = a.body.as_array().unwrap();
    assert_eq!(body.len(), 5);
    assert_eq!(body[1]["content"], "Ada, Grace");
    assert_eq!(body[4]["content"], "Read More");
    assert!(a.clean().is_ok());
  }

  #[test]
  fn project_without_url_has_no_link() {
    let task = Task::ProjectCreated {
      name:        "Robot".into(),
      authors:     vec!["Ada".into()],
      description: "Beep.".into(),
      url:         None,
    };
    let a = task.announcement();
    assert_eq!(a.body.as_array().unwrap().len(), 4);
    assert!(a.clean().is_ok());
  }
}
