use std::sync::Arc;

use crate::db::PrimaryKey;
use crate::models::User;
use crate::repo::UserRepository;

use super::{Result, ServiceError};

/// User operations exposed to the HTTP layer.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub fn create(&self, username: &str) -> Result<User> {
        if username.is_empty() {
            return Err(ServiceError::Validation("username is required".into()));
        }
        let mut user = User::new(username);
        self.repo.create(&mut user)?;
        tracing::info!(id = %user.id, username, "created user");
        Ok(user)
    }

    pub fn get_by_id(&self, id: PrimaryKey) -> Result<User> {
        Ok(self.repo.get_by_id(id)?)
    }

    pub fn get_by_username(&self, username: &str) -> Result<Vec<User>> {
        Ok(self.repo.get_by_username(username)?)
    }

    pub fn find_all(&self) -> Result<Vec<User>> {
        Ok(self.repo.find_all()?)
    }
}
