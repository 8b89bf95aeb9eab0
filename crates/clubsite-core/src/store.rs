//! The `RecordStore` trait and relation-aware validation.
//!
//! The trait is implemented by storage backends (e.g.
//! `clubsite-store-sqlite`). The API depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

use crate::{
  error::ValidationError,
  record::{ContactInfo, RecordValue, StoredRecord},
  relation::RecordKind,
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a club-site record store.
///
/// The store persists whatever it is given; callers run
/// [`validate_record`] first. All methods return `Send` futures so the trait
/// can be used behind `axum`.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new record. `created_at` and `updated_at` are set by the store.
  fn create(
    &self,
    value: RecordValue,
  ) -> impl Future<Output = Result<StoredRecord, Self::Error>> + Send + '_;

  /// Persist `owner` and `contacts` in one transaction, pointing every
  /// contact at the new owner. Either all records are stored or none are.
  fn create_with_contacts(
    &self,
    owner: RecordValue,
    contacts: Vec<ContactInfo>,
  ) -> impl Future<Output = Result<(StoredRecord, Vec<StoredRecord>), Self::Error>>
  + Send
  + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<StoredRecord>, Self::Error>> + Send + '_;

  /// All records of `kind`, oldest first.
  fn list(
    &self,
    kind: RecordKind,
  ) -> impl Future<Output = Result<Vec<StoredRecord>, Self::Error>> + Send + '_;

  /// Replace the value of an existing record, bumping `updated_at`.
  ///
  /// Returns `None` if the record does not exist. The kind of a record never
  /// changes; an update with a different kind is an error.
  fn update(
    &self,
    id: Uuid,
    value: RecordValue,
  ) -> impl Future<Output = Result<Option<StoredRecord>, Self::Error>> + Send + '_;

  /// Delete a record together with the contact infos and comments that
  /// reference it. Returns whether the record existed.
  fn delete(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Records of `kind` that reference `target_id`, oldest first.
  fn related(
    &self,
    target_id: Uuid,
    kind: RecordKind,
  ) -> impl Future<Output = Result<Vec<StoredRecord>, Self::Error>> + Send + '_;
}

// ─── Full clean ──────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CleanError<E> {
  #[error(transparent)]
  Record(#[from] crate::Error),

  #[error("store error: {0}")]
  Store(#[source] E),
}

impl<E> From<ValidationError> for CleanError<E> {
  fn from(e: ValidationError) -> Self { Self::Record(e.into()) }
}

/// Clean `value` and check that whatever it references exists and is of an
/// allowed kind.
pub async fn validate_record<S: RecordStore>(
  store: &S,
  value: RecordValue,
) -> Result<RecordValue, CleanError<S::Error>> {
  let value = value.clean()?;
  if let Some((relation, target_id)) = value.relation() {
    let target = store.get(target_id).await.map_err(CleanError::Store)?;
    let Some(target) = target else {
      return Err(
        ValidationError::new(format!("Related record {target_id} does not exist."))
          .into(),
      );
    };
    relation.check(target.kind())?;
  }
  Ok(value)
}
