use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::db::PrimaryKey;
use crate::models::Subscription;

use super::{parse_key, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateSubscriptionRequest {
    #[serde(default)]
    pub user_id: PrimaryKey,
    #[serde(default)]
    pub plan_type: String,
}

pub(super) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(find).post(create))
        .route("/:id", get(get_by_id))
        .route("/users/:user_id", get(find_by_user))
        .route("/users/:user_id/active", get(find_active))
}

async fn create(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateSubscriptionRequest>, JsonRejection>,
) -> Result<Json<Subscription>, ApiError> {
    let Json(req) = body?;
    if req.plan_type.is_empty() {
        return Err(ApiError::bad_request("plan_type is required"));
    }
    if let Err(e) = state.users.get_by_id(req.user_id) {
        return Err(ApiError::bad_request(format!("user not found: {e}")));
    }
    Ok(Json(state.subscriptions.create(req.user_id, &req.plan_type)?))
}

async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Subscription>, ApiError> {
    let id = parse_key(&id, "subscription id")?;
    Ok(Json(state.subscriptions.get_by_id(id)?))
}

async fn find_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Subscription>>, ApiError> {
    let user_id = parse_key(&user_id, "user id")?;
    Ok(Json(state.subscriptions.get_by_user_id(user_id)?))
}

async fn find_active(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Subscription>, ApiError> {
    let user_id = parse_key(&user_id, "user id")?;
    Ok(Json(state.subscriptions.get_active_for_user(user_id)?))
}

async fn find(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Subscription>>, ApiError> {
    Ok(Json(state.subscriptions.find_all()?))
}
