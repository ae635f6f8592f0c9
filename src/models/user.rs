use serde::{Deserialize, Serialize};

use crate::db::{PrimaryKey, Record};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: PrimaryKey,
    pub username: String,
}

impl User {
    /// A user that has not been stored yet.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: PrimaryKey::UNSET,
            username: username.into(),
        }
    }
}

impl Record for User {
    fn id(&self) -> PrimaryKey {
        self.id
    }

    fn set_id(&mut self, id: PrimaryKey) {
        self.id = id;
    }
}
