//! In-memory table store underlying every repository.
//!
//! A [`Database`] is a registry of named [`Table`]s. Each table holds records of
//! exactly one type, keyed by an auto-incrementing [`PrimaryKey`]. Tables are
//! created once and live as long as the database; IDs are never reused.
//!
//! ## Example
//!
//! ```
//! use recordkeeper::db::{Database, PrimaryKey, Record};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Note {
//!     id: PrimaryKey,
//!     body: String,
//! }
//!
//! impl Record for Note {
//!     fn id(&self) -> PrimaryKey { self.id }
//!     fn set_id(&mut self, id: PrimaryKey) { self.id = id; }
//! }
//!
//! let db = Database::new();
//! let notes = db.add_table::<Note>("notes").unwrap();
//!
//! let mut note = Note { body: "hello".into(), ..Default::default() };
//! notes.insert(&mut note).unwrap();
//! assert_eq!(note.id, PrimaryKey::new(1));
//!
//! let found = notes.find(|n| n.body.starts_with("he")).unwrap();
//! assert_eq!(found.len(), 1);
//! ```

mod database;
mod table;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use database::Database;
pub use table::Table;

/// Identifier of a record within its table.
///
/// `PrimaryKey::UNSET` (zero) marks a record that has not been inserted yet.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PrimaryKey(u64);

impl PrimaryKey {
    pub const UNSET: PrimaryKey = PrimaryKey(0);

    pub const fn new(value: u64) -> Self {
        PrimaryKey(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }

    fn next(self) -> Option<PrimaryKey> {
        self.0.checked_add(1).map(PrimaryKey)
    }
}

impl From<u64> for PrimaryKey {
    fn from(value: u64) -> Self {
        PrimaryKey(value)
    }
}

impl fmt::Display for PrimaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything that can be stored in a [`Table`].
pub trait Record: Clone + Send + Sync + 'static {
    /// Current primary key, `PrimaryKey::UNSET` until inserted.
    fn id(&self) -> PrimaryKey;

    /// Assign the primary key. Called by [`Table::insert`].
    fn set_id(&mut self, id: PrimaryKey);
}

/// Errors reported by the table store.
///
/// All of them describe caller misuse or absence; none are transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DbError {
    #[error("no table name provided")]
    EmptyName,

    #[error("no table found: {0}")]
    TableNotFound(String),

    #[error("table already exists: {0}")]
    TableExists(String),

    #[error("table {name} does not store records of type {expected}")]
    TableTypeMismatch { name: String, expected: &'static str },

    #[error("record already has an ID ({id}) and cannot be inserted into {table}")]
    AlreadyHasId { table: String, id: PrimaryKey },

    #[error("not found: {table}:{id}")]
    NotFound { table: String, id: PrimaryKey },

    #[error("primary keys exhausted for table {0}")]
    KeysExhausted(String),

    #[error("table lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

impl DbError {
    /// True for the key-absent case of update/delete/get.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
