//! Core types and validation for the club site.
//!
//! This crate is free of HTTP and database dependencies. It holds the
//! validation engine (JSON schemas, phone and contact checks, relation guards,
//! range checks), the record types built on it, the `RecordStore` trait and
//! the announcement tasks.

pub mod contact;
pub mod email;
pub mod error;
pub mod fields;
pub mod phone;
pub mod range;
pub mod record;
pub mod relation;
pub mod schema;
pub mod store;
pub mod task;

pub use error::{Error, Result};
