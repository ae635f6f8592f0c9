use crate::db::{Database, PrimaryKey, Table};
use crate::models::Subscription;

use super::{RepositoryError, Result};

pub const SUBSCRIPTIONS_TABLE: &str = "subscription";

pub trait SubscriptionRepository: Send + Sync {
    fn create(&self, subscription: &mut Subscription) -> Result<()>;

    fn get_by_id(&self, id: PrimaryKey) -> Result<Subscription>;

    /// Subscriptions matching `filter`, ordered by ID.
    fn get_by(&self, filter: &dyn Fn(&Subscription) -> bool) -> Result<Vec<Subscription>>;

    fn find_all(&self) -> Result<Vec<Subscription>> {
        self.get_by(&|_| true)
    }
}

/// [`SubscriptionRepository`] backed by the `subscription` table.
#[derive(Clone, Debug)]
pub struct SubscriptionTable {
    table: Table<Subscription>,
}

impl SubscriptionTable {
    pub fn new(db: &Database) -> Result<Self> {
        let table = db.add_table::<Subscription>(SUBSCRIPTIONS_TABLE)?;
        Ok(Self { table })
    }
}

impl SubscriptionRepository for SubscriptionTable {
    fn create(&self, subscription: &mut Subscription) -> Result<()> {
        Ok(self.table.insert(subscription)?)
    }

    fn get_by_id(&self, id: PrimaryKey) -> Result<Subscription> {
        self.table
            .get(id)
            .map_err(|err| RepositoryError::from_db("subscription", err))
    }

    fn get_by(&self, filter: &dyn Fn(&Subscription) -> bool) -> Result<Vec<Subscription>> {
        Ok(self.table.find(filter)?)
    }
}
