//! Services - business rules on top of the repositories.

mod clock;
mod error;
mod subscription;
mod user;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, ServiceError};
pub use subscription::SubscriptionService;
pub use user::UserService;
