//! Domain entities stored by the service.

mod subscription;
mod user;

pub use subscription::{InvalidPlanType, Plan, PlanType, Subscription};
pub use user::User;
