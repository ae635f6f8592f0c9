//! Error type for service operations.

use thiserror::Error;

use crate::db::PrimaryKey;
use crate::models::InvalidPlanType;
use crate::repo::RepositoryError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    #[error("no active subscription for user {0}")]
    NoActiveSubscription(PrimaryKey),

    #[error(transparent)]
    InvalidPlanType(#[from] InvalidPlanType),

    /// Input rejected before reaching the store.
    #[error("{0}")]
    Validation(String),

    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => ServiceError::NotFound(err.to_string()),
            other => ServiceError::Repository(other),
        }
    }
}

impl ServiceError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::NoActiveSubscription(_) => 404,
            ServiceError::InvalidPlanType(_) => 400,
            ServiceError::Validation(_) => 400,
            ServiceError::Repository(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
