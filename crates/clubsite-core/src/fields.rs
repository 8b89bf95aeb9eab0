//! Schemas for the semi-structured JSON fields of each record.

use std::sync::LazyLock;

use crate::schema::{Format, Schema};

pub const WEEKDAYS: [&str; 7] = [
  "Sunday",
  "Monday",
  "Tuesday",
  "Wednesday",
  "Thursday",
  "Friday",
  "Saturday",
];

pub const HEADER_ELEMENTS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// `Announcement.body`: a non-empty list of serialized HTML elements.
///
/// | element | required keys |
/// |---|---|
/// | `hr` | `element` |
/// | `p` | `element`, `content` |
/// | `img` | `element`, `alt`, `url` |
/// | `h1`..`h6` | `element`, `content` |
/// | `a` | `element`, `href`, `content` |
pub static ANNOUNCEMENT_BODY: LazyLock<Schema> = LazyLock::new(|| {
  let horizontal_rule =
    Schema::closed_object(vec![("element", Schema::choice(&["hr"]))], vec![]);
  let paragraph = Schema::closed_object(
    vec![
      ("element", Schema::choice(&["p"])),
      ("content", Schema::not_blank()),
    ],
    vec![],
  );
  let image = Schema::closed_object(
    vec![
      ("element", Schema::choice(&["img"])),
      ("alt", Schema::not_blank()),
      ("url", Schema::formatted(Format::Uri)),
    ],
    vec![],
  );
  let header = Schema::closed_object(
    vec![
      ("element", Schema::choice(&HEADER_ELEMENTS)),
      ("content", Schema::not_blank()),
    ],
    vec![],
  );
  let anchor = Schema::closed_object(
    vec![
      ("element", Schema::choice(&["a"])),
      ("href", Schema::formatted(Format::Uri)),
      ("content", Schema::not_blank()),
    ],
    vec![],
  );
  Schema::array_of(
    Schema::AnyOf(vec![horizontal_rule, paragraph, image, header, anchor]),
    Some(1),
    None,
  )
});

/// `Event.topics`: possibly empty, since some events have no set topics.
pub static EVENT_TOPICS: LazyLock<Schema> =
  LazyLock::new(|| Schema::array_of(Schema::not_blank(), None, None));

/// `GuestSpeakerForm.availability`: one to three date/time pairs.
pub static GUEST_SPEAKER_AVAILABILITY: LazyLock<Schema> = LazyLock::new(|| {
  Schema::array_of(
    Schema::closed_object(
      vec![
        ("date", Schema::formatted(Format::Date)),
        ("time", Schema::formatted(Format::Time)),
      ],
      vec![],
    ),
    Some(1),
    Some(3),
  )
});

/// `MentorForm.meeting_information`: at least one weekday/time pair.
pub static MENTOR_MEETING_INFORMATION: LazyLock<Schema> = LazyLock::new(|| {
  Schema::array_of(
    Schema::closed_object(
      vec![
        ("weekday", Schema::choice(&WEEKDAYS)),
        ("time", Schema::formatted(Format::Time)),
      ],
      vec![],
    ),
    Some(1),
    None,
  )
});

/// `Project.authors`: at least one author name.
pub static PROJECT_AUTHORS: LazyLock<Schema> =
  LazyLock::new(|| Schema::array_of(Schema::not_blank(), Some(1), None));
