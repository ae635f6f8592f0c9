//! Repositories - typed adapters from domain entities to tables.
//!
//! Each repository registers its table on the [`Database`](crate::db::Database)
//! when constructed, so it must be constructed at most once per database.

mod subscription;
mod user;

use thiserror::Error;

use crate::db::{DbError, PrimaryKey};

pub use subscription::{SubscriptionRepository, SubscriptionTable, SUBSCRIPTIONS_TABLE};
pub use user::{UserRepository, UserTable, USERS_TABLE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: PrimaryKey },

    #[error("store error: {0}")]
    Db(#[from] DbError),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }

    /// Translate a store error, folding key absence into `NotFound`.
    pub(crate) fn from_db(entity: &'static str, err: DbError) -> Self {
        match err {
            DbError::NotFound { id, .. } => RepositoryError::NotFound { entity, id },
            other => RepositoryError::Db(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
