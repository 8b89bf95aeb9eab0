//! Schema descriptions for semi-structured JSON fields.
//!
//! The fields each record declares are described by a typed [`Schema`] tree;
//! [`validate`] walks it against a [`serde_json::Value`] with a plain
//! recursive match. Schema documents supplied as JSON are compiled by
//! `jsonschema` into a [`SchemaDocument`] instead.
//!
//! Conformance failures surface as a single uniform
//! [`ValidationError`](crate::error::ValidationError) regardless of which rule
//! failed. A malformed schema surfaces as
//! [`SchemaError`](crate::error::SchemaError) and is never downgraded.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use jsonschema::{Draft, Validator};
use serde_json::{Map, Value};
use url::Url;

use crate::{
  Result,
  email,
  error::{SchemaError, ValidationError},
};

/// The "contains at least one non-whitespace character" pattern as written
/// in schema documents. [`StringSchema::not_blank`] is its typed form.
pub const NOT_BLANK_PATTERN: &str = r"(^(?!\s*)$)|(^.*\S.*$)";

// ─── Tree ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Schema {
  /// Accepts every value.
  Any,
  Null,
  Boolean,
  Integer(NumberSchema),
  Number(NumberSchema),
  String(StringSchema),
  Array(ArraySchema),
  Object(ObjectSchema),
  /// Value must equal one of the listed values.
  Enum(Vec<Value>),
  /// Value must match at least one alternative.
  AnyOf(Vec<Schema>),
}

#[derive(Debug, Clone, Default)]
pub struct NumberSchema {
  pub minimum: Option<f64>,
  pub maximum: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct StringSchema {
  pub min_length: Option<usize>,
  pub max_length: Option<usize>,
  /// Requires at least one non-whitespace character.
  pub not_blank:  bool,
  pub format:     Option<Format>,
  /// Closed set of allowed strings.
  pub choices:    Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct ArraySchema {
  pub items:     Box<Schema>,
  pub min_items: Option<usize>,
  pub max_items: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ObjectSchema {
  pub properties:            BTreeMap<String, Schema>,
  pub required:              Vec<String>,
  /// When `false`, keys outside `properties` are rejected.
  pub additional_properties: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
  /// `YYYY-MM-DD`
  Date,
  /// RFC 3339 `full-time`: `HH:MM:SS` with an offset, e.g. `20:20:39+00:00`.
  Time,
  /// RFC 3339 date-time.
  DateTime,
  /// An absolute URI.
  Uri,
  Email,
}

// ─── Constructors ────────────────────────────────────────────────────────────

impl Schema {
  pub fn string() -> Self { Self::String(StringSchema::default()) }

  /// A string with at least one non-whitespace character.
  pub fn not_blank() -> Self {
    Self::String(StringSchema {
      not_blank: true,
      ..Default::default()
    })
  }

  pub fn formatted(format: Format) -> Self {
    Self::String(StringSchema {
      format: Some(format),
      ..Default::default()
    })
  }

  /// A string restricted to `choices`.
  pub fn choice(choices: &[&str]) -> Self {
    Self::String(StringSchema {
      choices: Some(choices.iter().map(|c| (*c).to_owned()).collect()),
      ..Default::default()
    })
  }

  pub fn array_of(
    items: Schema,
    min_items: Option<usize>,
    max_items: Option<usize>,
  ) -> Self {
    Self::Array(ArraySchema { items: Box::new(items), min_items, max_items })
  }

  /// An object with `additionalProperties: false`.
  pub fn closed_object(
    required: Vec<(&str, Schema)>,
    optional: Vec<(&str, Schema)>,
  ) -> Self {
    let names = required.iter().map(|(k, _)| (*k).to_owned()).collect();
    let properties = required
      .into_iter()
      .chain(optional)
      .map(|(k, s)| (k.to_owned(), s))
      .collect();
    Self::Object(ObjectSchema {
      properties,
      required: names,
      additional_properties: false,
    })
  }
}

impl Format {
  pub fn is_match(self, s: &str) -> bool {
    match self {
      Self::Date => {
        s.len() == 10 && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
      }
      Self::Time => {
        DateTime::parse_from_rfc3339(&format!("1970-01-01T{s}")).is_ok()
      }
      Self::DateTime => DateTime::parse_from_rfc3339(s).is_ok(),
      Self::Uri => Url::parse(s).is_ok(),
      Self::Email => email::is_valid_email(s),
    }
  }
}

// ─── Schema-of-schemas ───────────────────────────────────────────────────────

fn check_bounds<T: PartialOrd + std::fmt::Display>(
  what: &str,
  min: Option<T>,
  max: Option<T>,
) -> Result<(), SchemaError> {
  match (min, max) {
    (Some(lo), Some(hi)) if lo > hi => Err(SchemaError(format!(
      "minimum {what} ({lo}) exceeds maximum {what} ({hi})"
    ))),
    _ => Ok(()),
  }
}

impl Schema {
  /// Verify that the tree itself is well formed.
  pub fn check(&self) -> Result<(), SchemaError> {
    match self {
      Self::Any | Self::Null | Self::Boolean => Ok(()),
      Self::Integer(n) | Self::Number(n) => {
        check_bounds("value", n.minimum, n.maximum)
      }
      Self::String(s) => {
        check_bounds("length", s.min_length, s.max_length)?;
        if s.choices.as_ref().is_some_and(Vec::is_empty) {
          return Err(SchemaError("enum must not be empty".into()));
        }
        Ok(())
      }
      Self::Array(a) => {
        check_bounds("item count", a.min_items, a.max_items)?;
        a.items.check()
      }
      Self::Object(o) => {
        if !o.additional_properties
          && let Some(key) =
            o.required.iter().find(|k| !o.properties.contains_key(*k))
        {
          return Err(SchemaError(format!(
            "required key {key:?} is not a declared property of a closed object"
          )));
        }
        o.properties.values().try_for_each(Schema::check)
      }
      Self::Enum(values) if values.is_empty() => {
        Err(SchemaError("enum must not be empty".into()))
      }
      Self::Enum(_) => Ok(()),
      Self::AnyOf(alts) if alts.is_empty() => {
        Err(SchemaError("anyOf must not be empty".into()))
      }
      Self::AnyOf(alts) => alts.iter().try_for_each(Schema::check),
    }
  }
}

// ─── Conformance ─────────────────────────────────────────────────────────────

impl Schema {
  /// `true` if `value` conforms. Assumes [`Schema::check`] has passed.
  pub fn accepts(&self, value: &Value) -> bool {
    match self {
      Self::Any => true,
      Self::Null => value.is_null(),
      Self::Boolean => value.is_boolean(),
      Self::Integer(n) => value
        .as_f64()
        .is_some_and(|f| f.fract() == 0.0 && n.contains(f)),
      Self::Number(n) => value.as_f64().is_some_and(|f| n.contains(f)),
      Self::String(s) => value.as_str().is_some_and(|v| s.accepts(v)),
      Self::Array(a) => value.as_array().is_some_and(|v| a.accepts(v)),
      Self::Object(o) => value.as_object().is_some_and(|v| o.accepts(v)),
      Self::Enum(values) => values.contains(value),
      Self::AnyOf(alts) => alts.iter().any(|alt| alt.accepts(value)),
    }
  }
}

impl NumberSchema {
  fn contains(&self, f: f64) -> bool {
    self.minimum.is_none_or(|lo| f >= lo) && self.maximum.is_none_or(|hi| f <= hi)
  }
}

impl StringSchema {
  fn accepts(&self, s: &str) -> bool {
    let len = s.chars().count();
    self.min_length.is_none_or(|min| len >= min)
      && self.max_length.is_none_or(|max| len <= max)
      && (!self.not_blank || s.chars().any(|c| !c.is_whitespace()))
      && self.format.is_none_or(|f| f.is_match(s))
      && self
        .choices
        .as_ref()
        .is_none_or(|c| c.iter().any(|choice| choice == s))
  }
}

impl ArraySchema {
  fn accepts(&self, items: &[Value]) -> bool {
    self.min_items.is_none_or(|min| items.len() >= min)
      && self.max_items.is_none_or(|max| items.len() <= max)
      && items.iter().all(|item| self.items.accepts(item))
  }
}

impl ObjectSchema {
  fn accepts(&self, object: &Map<String, Value>) -> bool {
    self.required.iter().all(|k| object.contains_key(k))
      && object.iter().all(|(k, v)| match self.properties.get(k) {
        Some(schema) => schema.accepts(v),
        None => self.additional_properties,
      })
  }
}

/// Validate `value` against `schema`.
///
/// Returns [`Error::Schema`](crate::Error::Schema) if the schema is malformed
/// and [`Error::Validation`](crate::Error::Validation) if the value does not
/// conform.
pub fn validate(value: &Value, schema: &Schema) -> Result<()> {
  schema.check()?;
  if schema.accepts(value) {
    Ok(())
  } else {
    Err(ValidationError::schema_mismatch(value).into())
  }
}

// ─── Draft-07 documents ──────────────────────────────────────────────────────

/// A draft-07 schema document compiled with `jsonschema`.
///
/// Compilation first checks the document against the meta-schema, so a
/// malformed keyword (e.g. a negative `minLength`) is a [`SchemaError`] even
/// when it does not apply to the declared type.
pub struct SchemaDocument {
  validator: Validator,
}

impl SchemaDocument {
  pub fn compile(doc: &Value) -> Result<Self, SchemaError> {
    jsonschema::meta::validate(doc).map_err(|e| SchemaError(e.to_string()))?;
    let validator = jsonschema::options()
      .with_draft(Draft::Draft7)
      .should_validate_formats(true)
      .should_ignore_unknown_formats(false)
      .build(doc)
      .map_err(|e| SchemaError(e.to_string()))?;
    Ok(Self { validator })
  }

  pub fn is_valid(&self, value: &Value) -> bool {
    self.validator.is_valid(value)
  }

  /// Fails with the uniform schema-mismatch error; the checker's own error
  /// detail is only logged.
  pub fn validate(&self, value: &Value) -> Result<()> {
    match self.validator.validate(value) {
      Ok(()) => Ok(()),
      Err(e) => {
        tracing::debug!(error = %e, "value failed schema document");
        Err(ValidationError::schema_mismatch(value).into())
      }
    }
  }
}

/// Compile `schema` as a draft-07 document, then validate `value`.
pub fn validate_json(value: &Value, schema: &Value) -> Result<()> {
  SchemaDocument::compile(schema)?.validate(value)
}
