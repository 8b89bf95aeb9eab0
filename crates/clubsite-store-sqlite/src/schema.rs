//! SQL schema for the club-site SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One table for every record kind. The payload is the record's JSON without
-- its kind tag.
CREATE TABLE IF NOT EXISTS records (
    record_id   TEXT PRIMARY KEY,
    kind        TEXT NOT NULL,   -- RecordKind discriminant
    target_id   TEXT,            -- referenced record, for relation lookups
    value_json  TEXT NOT NULL,
    created_at  TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS records_kind_idx   ON records(kind);
CREATE INDEX IF NOT EXISTS records_target_idx ON records(target_id);

PRAGMA user_version = 1;
";
