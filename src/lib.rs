//! # recordkeeper
//!
//! A small record-management service for users and subscriptions.
//!
//! - [`db`] — typed, lock-protected in-memory tables in a named registry
//! - [`models`] — `User`, `Subscription` and the plan catalog
//! - [`repo`] — repositories adapting entities onto tables
//! - [`services`] — business rules (including the active-subscription rule)
//! - [`http`] — axum transport (requires the `http` feature)

pub mod config;
pub mod db;
pub mod models;
pub mod repo;
pub mod services;

#[cfg(feature = "http")]
pub mod http;

pub use config::Config;
pub use db::{Database, DbError, PrimaryKey, Record, Table};
pub use models::{Plan, PlanType, Subscription, User};
pub use repo::{RepositoryError, SubscriptionRepository, UserRepository};
pub use services::{Clock, ManualClock, ServiceError, SubscriptionService, SystemClock, UserService};

/// Current version of recordkeeper
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
