//! HTTP transport - maps JSON requests onto the user and subscription services.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /health` — `{ "ok": true, "tables": [...] }`
//! - `POST /users`, `GET /users[?username=..]`, `GET /users/:id`
//! - `POST /subscriptions`, `GET /subscriptions`, `GET /subscriptions/:id`
//! - `GET /subscriptions/users/:user_id`, `GET /subscriptions/users/:user_id/active`
//!
//! Errors are returned as `{ "error": "..." }`: 400 for malformed input,
//! 404 when something is absent, 500 otherwise.
//!
//! ## Example
//!
//! ```ignore
//! let state = AppState::new(Database::new(), Arc::new(SystemClock))?;
//! recordkeeper::http::serve(state, "0.0.0.0:8080").await?;
//! ```

mod error;
mod subscriptions;
mod users;

use std::future::Future;
use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::db::{Database, PrimaryKey};
use crate::repo::{self, SubscriptionTable, UserTable};
use crate::services::{Clock, SubscriptionService, UserService};

pub use error::ApiError;

/// Everything the handlers need, wired once per database.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub users: UserService,
    pub subscriptions: SubscriptionService,
}

impl AppState {
    /// Register the repositories on `db` and build the services.
    pub fn new(db: Database, clock: Arc<dyn Clock>) -> repo::Result<Self> {
        let users = UserService::new(Arc::new(UserTable::new(&db)?));
        let subscriptions =
            SubscriptionService::new(Arc::new(SubscriptionTable::new(&db)?), clock);
        Ok(Self {
            db,
            users,
            subscriptions,
        })
    }
}

/// Build an axum `Router` serving the API from `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/users", users::routes())
        .nest("/subscriptions", subscriptions::routes())
        .with_state(Arc::new(state))
}

/// Serve the API at `addr` (e.g. `"0.0.0.0:8080"`) until `shutdown` resolves.
pub async fn serve<F>(state: AppState, addr: &str, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let tables = state
        .db
        .tables()
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(json!({ "ok": true, "tables": tables })))
}

/// Parse a numeric path segment, naming it in the 400 response on failure.
fn parse_key(raw: &str, what: &str) -> Result<PrimaryKey, ApiError> {
    raw.parse::<u64>()
        .map(PrimaryKey::new)
        .map_err(|e| ApiError::bad_request(format!("invalid {what}: {e}")))
}
