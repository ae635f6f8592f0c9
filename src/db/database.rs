//! Database - registry of named tables.

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{DbError, Record, Result, Table};

/// Registry of named [`Table`]s.
///
/// Constructed explicitly and passed to repositories; clones share the same
/// registry. Tables can be added but never removed or renamed.
#[derive(Clone, Default)]
pub struct Database {
    tables: Arc<RwLock<HashMap<String, Arc<dyn Any + Send + Sync>>>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new, empty table of `R` records under `name`.
    pub fn add_table<R: Record>(&self, name: &str) -> Result<Table<R>> {
        if name.is_empty() {
            return Err(DbError::EmptyName);
        }

        let mut tables = self
            .tables
            .write()
            .map_err(|_| DbError::LockPoisoned("add_table"))?;
        if tables.contains_key(name) {
            return Err(DbError::TableExists(name.to_string()));
        }

        let table = Table::<R>::new(name);
        tables.insert(name.to_string(), Arc::new(table.clone()));

        tracing::debug!(table = name, record = type_name::<R>(), "registered table");
        Ok(table)
    }

    /// Look up a table by name. The handle shares storage with every other
    /// handle to the same table.
    pub fn table<R: Record>(&self, name: &str) -> Result<Table<R>> {
        if name.is_empty() {
            return Err(DbError::EmptyName);
        }

        let tables = self
            .tables
            .read()
            .map_err(|_| DbError::LockPoisoned("table"))?;
        let entry = tables
            .get(name)
            .ok_or_else(|| DbError::TableNotFound(name.to_string()))?;

        entry
            .downcast_ref::<Table<R>>()
            .cloned()
            .ok_or_else(|| DbError::TableTypeMismatch {
                name: name.to_string(),
                expected: type_name::<R>(),
            })
    }

    /// Names of all registered tables, sorted.
    pub fn tables(&self) -> Result<Vec<String>> {
        let tables = self
            .tables
            .read()
            .map_err(|_| DbError::LockPoisoned("tables"))?;
        let mut names: Vec<String> = tables.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    pub fn contains(&self, name: &str) -> Result<bool> {
        let tables = self
            .tables
            .read()
            .map_err(|_| DbError::LockPoisoned("contains"))?;
        Ok(tables.contains_key(name))
    }
}
