//! REST API handlers for the user endpoints

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Json},
};

use crate::error::ApiError;
use crate::models::{HealthResponse, User};
use crate::store::UserStore;
use crate::validation::{parse_object, validate_create, validate_update, JsonObject};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<UserStore>,
}

impl AppState {
    pub fn new(store: UserStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        user_count: state.store.len().await,
    })
}

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<JsonObject>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload?;
    let new_user = validate_create(parse_object(body)?)?;

    let user = state.store.create(new_user).await;
    tracing::info!(user_id = user.id, "Created user");

    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users`
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let users = state.store.list().await;
    tracing::debug!(count = users.len(), "Listed users");

    Json(users)
}

/// `GET /users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<User>, ApiError> {
    let Path(id) = id?;
    let user = state.store.get(id).await?;

    Ok(Json(user))
}

/// `PUT /users/{id}`
///
/// A missing id wins over a bad body.
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<JsonObject>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Path(id) = id?;
    if !state.store.contains(id).await {
        return Err(ApiError::NotFound(id));
    }

    let Json(body) = payload?;
    let patch = validate_update(parse_object(body)?)?;

    let user = state.store.update(id, patch).await?;
    tracing::info!(user_id = id, "Updated user");

    Ok(Json(user))
}

/// `DELETE /users/{id}`
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.store.delete(id).await?;
    tracing::info!(user_id = id, "Deleted user");

    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for unmatched paths
pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
