use crate::db::{Database, PrimaryKey, Table};
use crate::models::User;

use super::{RepositoryError, Result};

pub const USERS_TABLE: &str = "users";

pub trait UserRepository: Send + Sync {
    /// Store a new user, assigning its ID.
    fn create(&self, user: &mut User) -> Result<()>;

    fn get_by_id(&self, id: PrimaryKey) -> Result<User>;

    /// Every user with exactly this username, ordered by ID.
    fn get_by_username(&self, username: &str) -> Result<Vec<User>>;

    fn find_all(&self) -> Result<Vec<User>>;
}

/// [`UserRepository`] backed by the `users` table.
#[derive(Clone, Debug)]
pub struct UserTable {
    table: Table<User>,
}

impl UserTable {
    /// Register the `users` table on `db`. Fails with `TableExists` if a
    /// repository was already built against the same database.
    pub fn new(db: &Database) -> Result<Self> {
        let table = db.add_table::<User>(USERS_TABLE)?;
        Ok(Self { table })
    }
}

impl UserRepository for UserTable {
    fn create(&self, user: &mut User) -> Result<()> {
        Ok(self.table.insert(user)?)
    }

    fn get_by_id(&self, id: PrimaryKey) -> Result<User> {
        self.table
            .get(id)
            .map_err(|err| RepositoryError::from_db("user", err))
    }

    fn get_by_username(&self, username: &str) -> Result<Vec<User>> {
        Ok(self.table.find(|user| user.username == username)?)
    }

    fn find_all(&self) -> Result<Vec<User>> {
        Ok(self.table.all()?)
    }
}
