use std::sync::Arc;

use crate::db::PrimaryKey;
use crate::models::{PlanType, Subscription};
use crate::repo::SubscriptionRepository;

use super::{Clock, Result, ServiceError};

/// Subscription operations, including the active-plan rule.
#[derive(Clone)]
pub struct SubscriptionService {
    repo: Arc<dyn SubscriptionRepository>,
    clock: Arc<dyn Clock>,
}

impl SubscriptionService {
    pub fn new(repo: Arc<dyn SubscriptionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Subscribe `user_id` to the plan named `plan_type`, stamped with the
    /// current time. Unknown plan names are rejected.
    pub fn create(&self, user_id: PrimaryKey, plan_type: &str) -> Result<Subscription> {
        let plan_type: PlanType = plan_type.parse()?;
        let mut subscription = Subscription::new(user_id, plan_type, self.clock.now());
        self.repo.create(&mut subscription)?;
        tracing::info!(
            id = %subscription.id,
            user_id = %user_id,
            plan = %plan_type,
            "created subscription"
        );
        Ok(subscription)
    }

    pub fn get_by_id(&self, id: PrimaryKey) -> Result<Subscription> {
        Ok(self.repo.get_by_id(id)?)
    }

    pub fn get_by_user_id(&self, user_id: PrimaryKey) -> Result<Vec<Subscription>> {
        Ok(self.repo.get_by(&|s| s.user_id == user_id)?)
    }

    pub fn get_by_plan_type(&self, plan_type: PlanType) -> Result<Vec<Subscription>> {
        Ok(self.repo.get_by(&|s| s.plan_type == plan_type)?)
    }

    /// The user's most recent subscription, if it is still active.
    ///
    /// Only the latest subscription (highest ID) is considered; an older,
    /// still-running plan does not make the user active once a newer one
    /// has lapsed.
    pub fn get_active_for_user(&self, user_id: PrimaryKey) -> Result<Subscription> {
        let latest = self
            .get_by_user_id(user_id)?
            .pop()
            .ok_or(ServiceError::NoActiveSubscription(user_id))?;

        if latest.is_active_at(self.clock.now()) {
            Ok(latest)
        } else {
            Err(ServiceError::NoActiveSubscription(user_id))
        }
    }

    pub fn find_all(&self) -> Result<Vec<Subscription>> {
        Ok(self.repo.find_all()?)
    }
}
