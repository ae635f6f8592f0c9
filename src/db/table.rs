//! Table - a named, typed collection of records guarded by a reader/writer lock.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{DbError, PrimaryKey, Record, Result};

struct TableState<R> {
    last_id: PrimaryKey,
    rows: BTreeMap<PrimaryKey, R>,
}

/// A collection of records of one type.
///
/// Clone-friendly via Arc: every clone operates on the same rows. Writes take
/// the lock exclusively, reads share it. Records handed out by `get`/`find`
/// are copies; mutate them and call `update` to persist changes.
pub struct Table<R> {
    name: Arc<str>,
    state: Arc<RwLock<TableState<R>>>,
}

impl<R> Clone for Table<R> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            state: Arc::clone(&self.state),
        }
    }
}

impl<R> fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table").field("name", &self.name).finish()
    }
}

impl<R: Record> Table<R> {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            state: Arc::new(RwLock::new(TableState {
                last_id: PrimaryKey::UNSET,
                rows: BTreeMap::new(),
            })),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store a new record, assigning it the next primary key in place.
    ///
    /// The record must not carry an ID yet. Keys are never reused, even after
    /// the record holding them is deleted.
    pub fn insert(&self, record: &mut R) -> Result<()> {
        if !record.id().is_unset() {
            return Err(DbError::AlreadyHasId {
                table: self.name.to_string(),
                id: record.id(),
            });
        }

        let mut state = self.write("insert")?;
        let id = state
            .last_id
            .next()
            .ok_or_else(|| DbError::KeysExhausted(self.name.to_string()))?;
        record.set_id(id);
        state.last_id = id;
        state.rows.insert(id, record.clone());

        tracing::debug!(table = %self.name, %id, "inserted record");
        Ok(())
    }

    /// Replace the stored record with the same ID. No field-level merge.
    pub fn update(&self, record: &R) -> Result<()> {
        let id = record.id();
        let mut state = self.write("update")?;
        match state.rows.get_mut(&id) {
            Some(stored) => {
                *stored = record.clone();
                tracing::debug!(table = %self.name, %id, "updated record");
                Ok(())
            }
            None => Err(self.not_found(id)),
        }
    }

    pub fn delete(&self, id: PrimaryKey) -> Result<()> {
        let mut state = self.write("delete")?;
        if state.rows.remove(&id).is_none() {
            return Err(self.not_found(id));
        }
        tracing::debug!(table = %self.name, %id, "deleted record");
        Ok(())
    }

    pub fn get(&self, id: PrimaryKey) -> Result<R> {
        let state = self.read("get")?;
        state
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| self.not_found(id))
    }

    /// All records matching `predicate`, in ascending ID order.
    ///
    /// Returns an empty vector when nothing matches.
    pub fn find<F>(&self, predicate: F) -> Result<Vec<R>>
    where
        F: Fn(&R) -> bool,
    {
        let state = self.read("find")?;
        Ok(state
            .rows
            .values()
            .filter(|record| predicate(*record))
            .cloned()
            .collect())
    }

    pub fn all(&self) -> Result<Vec<R>> {
        self.find(|_| true)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read("len")?.rows.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Highest key ever issued by this table (`UNSET` if none).
    pub fn last_id(&self) -> Result<PrimaryKey> {
        Ok(self.read("last_id")?.last_id)
    }

    fn read(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, TableState<R>>> {
        self.state
            .read()
            .map_err(|_| DbError::LockPoisoned(operation))
    }

    fn write(&self, operation: &'static str) -> Result<RwLockWriteGuard<'_, TableState<R>>> {
        self.state
            .write()
            .map_err(|_| DbError::LockPoisoned(operation))
    }

    fn not_found(&self, id: PrimaryKey) -> DbError {
        DbError::NotFound {
            table: self.name.to_string(),
            id,
        }
    }
}
