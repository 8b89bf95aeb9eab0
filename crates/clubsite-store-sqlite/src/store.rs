//! [`SqliteStore`], the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use clubsite_core::{
  record::{ContactInfo, RecordValue, StoredRecord},
  relation::RecordKind,
  store::RecordStore,
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{RECORD_COLUMNS, RawRecord, encode_dt, encode_uuid, encode_value},
  schema::SCHEMA,
};

// ─── Rows ────────────────────────────────────────────────────────────────────

fn fresh_record(value: RecordValue, now: DateTime<Utc>) -> StoredRecord {
  StoredRecord {
    record_id: Uuid::new_v4(),
    created_at: now,
    updated_at: now,
    value,
  }
}

/// A record encoded for `INSERT`.
struct NewRow {
  id:     String,
  kind:   &'static str,
  target: Option<String>,
  json:   String,
  at:     String,
}

impl NewRow {
  fn encode(record: &StoredRecord) -> Result<Self> {
    let (kind, target, json) = encode_value(&record.value)?;
    Ok(Self {
      id: encode_uuid(record.record_id),
      kind,
      target,
      json,
      at: encode_dt(record.created_at),
    })
  }

  fn insert(&self, conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute(
      "INSERT INTO records (
         record_id, kind, target_id, value_json, created_at, updated_at
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
      rusqlite::params![self.id, self.kind, self.target, self.json, self.at],
    )?;
    Ok(())
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A club-site record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run raw SQL against the connection, for fault injection in tests.
  #[cfg(test)]
  pub(crate) async fn execute_batch(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT` over [`RECORD_COLUMNS`] with two text parameters.
  async fn query_records(
    &self,
    sql: String,
    first: String,
    second: Option<String>,
  ) -> Result<Vec<StoredRecord>> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = match second {
          Some(second) => stmt
            .query_map(rusqlite::params![first, second], RawRecord::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map(rusqlite::params![first], RawRecord::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn create(&self, value: RecordValue) -> Result<StoredRecord> {
    let record = fresh_record(value, Utc::now());
    let row = NewRow::encode(&record)?;

    self
      .conn
      .call(move |conn| {
        row.insert(conn)?;
        Ok(())
      })
      .await?;

    tracing::debug!(id = %record.record_id, kind = %record.kind(), "record created");
    Ok(record)
  }

  async fn create_with_contacts(
    &self,
    owner: RecordValue,
    contacts: Vec<ContactInfo>,
  ) -> Result<(StoredRecord, Vec<StoredRecord>)> {
    let now = Utc::now();
    let owner = fresh_record(owner, now);
    let contacts: Vec<StoredRecord> = contacts
      .into_iter()
      .map(|info| {
        let info = ContactInfo { target: owner.record_id, ..info };
        fresh_record(RecordValue::ContactInfo(info), now)
      })
      .collect();
    let rows = std::iter::once(&owner)
      .chain(&contacts)
      .map(NewRow::encode)
      .collect::<Result<Vec<_>>>()?;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for row in &rows {
          row.insert(&tx)?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::debug!(
      id = %owner.record_id,
      kind = %owner.kind(),
      contacts = contacts.len(),
      "record created with contacts"
    );
    Ok((owner, contacts))
  }

  async fn get(&self, id: Uuid) -> Result<Option<StoredRecord>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {RECORD_COLUMNS} FROM records WHERE record_id = ?1"),
              rusqlite::params![id_str],
              RawRecord::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn list(&self, kind: RecordKind) -> Result<Vec<StoredRecord>> {
    self
      .query_records(
        format!(
          "SELECT {RECORD_COLUMNS} FROM records WHERE kind = ?1
           ORDER BY created_at, rowid"
        ),
        kind.as_str().to_owned(),
        None,
      )
      .await
  }

  async fn update(
    &self,
    id: Uuid,
    value: RecordValue,
  ) -> Result<Option<StoredRecord>> {
    let Some(existing) = self.get(id).await? else {
      return Ok(None);
    };
    if existing.kind() != value.kind() {
      return Err(Error::KindMismatch {
        id,
        stored: existing.kind(),
        given: value.kind(),
      });
    }

    let record = StoredRecord {
      record_id: id,
      created_at: existing.created_at,
      updated_at: Utc::now(),
      value,
    };

    let (_, target, json) = encode_value(&record.value)?;
    let id_str = encode_uuid(id);
    let at_str = encode_dt(record.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE records SET target_id = ?2, value_json = ?3, updated_at = ?4
           WHERE record_id = ?1",
          rusqlite::params![id_str, target, json, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(Some(record))
  }

  async fn delete(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let at_str = encode_dt(Utc::now());
    let owned = [
      RecordKind::ContactInfo.as_str(),
      RecordKind::AdminComment.as_str(),
    ];

    let (deleted, cascaded) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let deleted = tx.execute(
          "DELETE FROM records WHERE record_id = ?1",
          rusqlite::params![id_str],
        )?;
        if deleted == 0 {
          return Ok((false, 0));
        }
        let cascaded = tx.execute(
          "DELETE FROM records WHERE target_id = ?1 AND kind IN (?2, ?3)",
          rusqlite::params![id_str, owned[0], owned[1]],
        )?;
        // Events keep their record when their meeting address goes away.
        tx.execute(
          "UPDATE records
           SET value_json = json_set(value_json, '$.meeting_address', NULL),
               target_id  = NULL,
               updated_at = ?2
           WHERE target_id = ?1 AND kind = ?3",
          rusqlite::params![id_str, at_str, RecordKind::Event.as_str()],
        )?;
        tx.commit()?;
        Ok((true, cascaded))
      })
      .await?;

    if deleted {
      tracing::debug!(%id, cascaded, "record deleted");
    }
    Ok(deleted)
  }

  async fn related(
    &self,
    target_id: Uuid,
    kind: RecordKind,
  ) -> Result<Vec<StoredRecord>> {
    self
      .query_records(
        format!(
          "SELECT {RECORD_COLUMNS} FROM records WHERE target_id = ?1 AND kind = ?2
           ORDER BY created_at, rowid"
        ),
        encode_uuid(target_id),
        Some(kind.as_str().to_owned()),
      )
      .await
  }
}
