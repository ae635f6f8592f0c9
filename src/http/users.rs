use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::models::User;

use super::{parse_key, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub username: Option<String>,
}

pub(super) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(find).post(create))
        .route("/:id", get(get_by_id))
}

async fn create(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(req) = body?;
    Ok(Json(state.users.create(&req.username)?))
}

async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_key(&id, "user id")?;
    Ok(Json(state.users.get_by_id(id)?))
}

async fn find(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = match query.username.as_deref() {
        Some(username) if !username.is_empty() => state.users.get_by_username(username)?,
        _ => state.users.find_all()?,
    };
    Ok(Json(users))
}
