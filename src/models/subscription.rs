//! Subscriptions and the plan catalog.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::{PrimaryKey, Record};

/// Billing period of every paid plan.
pub const PLAN_PERIOD_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Free,
    Basic,
    Premium,
}

impl PlanType {
    pub const ALL: [PlanType; 3] = [PlanType::Free, PlanType::Basic, PlanType::Premium];

    pub fn as_str(self) -> &'static str {
        match self {
            PlanType::Free => "free",
            PlanType::Basic => "basic",
            PlanType::Premium => "premium",
        }
    }

    pub fn plan(self) -> Plan {
        Plan::for_type(self)
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid plan type: {0:?}")]
pub struct InvalidPlanType(pub String);

impl FromStr for PlanType {
    type Err = InvalidPlanType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanType::ALL
            .into_iter()
            .find(|plan| plan.as_str() == s)
            .ok_or_else(|| InvalidPlanType(s.to_string()))
    }
}

/// Price and length of a plan. A zero duration never expires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plan {
    pub plan_type: PlanType,
    pub price: f64,
    pub duration: Duration,
}

impl Plan {
    pub fn for_type(plan_type: PlanType) -> Plan {
        match plan_type {
            PlanType::Free => Plan {
                plan_type,
                price: 0.0,
                duration: Duration::zero(),
            },
            PlanType::Basic => Plan {
                plan_type,
                price: 9.99,
                duration: Duration::days(PLAN_PERIOD_DAYS),
            },
            PlanType::Premium => Plan {
                plan_type,
                price: 19.99,
                duration: Duration::days(PLAN_PERIOD_DAYS),
            },
        }
    }

    pub fn is_free_tier(&self) -> bool {
        self.duration == Duration::zero()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: PrimaryKey,
    pub user_id: PrimaryKey,
    pub plan_type: PlanType,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn new(user_id: PrimaryKey, plan_type: PlanType, created_at: DateTime<Utc>) -> Self {
        Self {
            id: PrimaryKey::UNSET,
            user_id,
            plan_type,
            created_at,
        }
    }

    /// Moment the subscription stops being active, `None` for free plans.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let plan = self.plan_type.plan();
        if plan.is_free_tier() {
            None
        } else {
            Some(self.created_at + plan.duration)
        }
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            None => true,
            Some(expires_at) => expires_at > now,
        }
    }
}

impl Record for Subscription {
    fn id(&self) -> PrimaryKey {
        self.id
    }

    fn set_id(&mut self, id: PrimaryKey) {
        self.id = id;
    }
}
