/*
 * Copyright 2025 Vijaykumar Singh
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! REST API handlers that delegate to the domain services

use axum::{
    extract::{DefaultBodyLimit, Path as UrlPath, State},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::time::Duration;

use super::extract::JsonBody;
use crate::core::{
    CreateObjectResponse, MazeError, ModifyObjectResponse, OpContext, Origin, Path, PathRequest,
    Quadrant, QuadrantRequest, Spot,
};
use crate::services::MazeServices;

/// Shared application state for REST handlers
#[derive(Clone)]
pub struct AppState {
    pub services: MazeServices,
    pub request_timeout: Duration,
}

impl AppState {
    fn context(&self) -> OpContext {
        OpContext::with_timeout(self.request_timeout)
    }
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for MazeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("REST: request failed with {}: {}", status, self);
        } else {
            tracing::debug!("REST: request rejected with {}: {}", status, self);
        }
        (status, Json(ErrorResponse { message: self.to_string() })).into_response()
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub spots: u64,
    pub paths: u64,
    pub origins: u64,
}

type ApiResult<T> = Result<Json<T>, MazeError>;

/// Create REST router with all endpoints
pub fn create_router(state: AppState, max_request_size: usize) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Spots
        .route("/spot", post(create_spot))
        .route("/spot/:id", get(get_spot).put(modify_spot).delete(delete_spot))
        .route("/spots", get(list_spots))
        // Paths
        .route("/path", post(create_path))
        .route("/path/:id", get(get_path).put(modify_path).delete(delete_path))
        .route("/paths", get(list_paths))
        // Origin and quadrants
        .route(
            "/origin",
            post(create_origin)
                .get(get_origin)
                .put(modify_origin)
                .delete(delete_origin),
        )
        .route("/quadrantSpots", post(spots_in_quadrant))
        .layer(DefaultBodyLimit::max(max_request_size))
        .with_state(state)
}

pub async fn health_check(State(state): State<AppState>) -> ApiResult<HealthResponse> {
    let ctx = state.context();
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        spots: state.services.spots.count_spots(&ctx).await?,
        paths: state.services.paths.count_paths(&ctx).await?,
        origins: state.services.quadrants.count_origins(&ctx).await?,
    }))
}

pub async fn create_spot(
    State(state): State<AppState>,
    JsonBody(spot): JsonBody<Spot>,
) -> ApiResult<CreateObjectResponse> {
    let id = state.services.spots.create_spot(&state.context(), spot).await?;
    Ok(Json(CreateObjectResponse { id: id.to_hex() }))
}

pub async fn get_spot(State(state): State<AppState>, UrlPath(id): UrlPath<String>) -> ApiResult<Spot> {
    let spot = state.services.spots.get_spot(&state.context(), &id).await?;
    Ok(Json(spot))
}

pub async fn modify_spot(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
    JsonBody(spot): JsonBody<Spot>,
) -> ApiResult<ModifyObjectResponse> {
    let affected_items = state.services.spots.modify_spot(&state.context(), spot, &id).await?;
    Ok(Json(ModifyObjectResponse { affected_items }))
}

pub async fn list_spots(State(state): State<AppState>) -> ApiResult<Vec<Spot>> {
    let spots = state.services.spots.list_spots(&state.context()).await?;
    Ok(Json(spots))
}

pub async fn delete_spot(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> ApiResult<ModifyObjectResponse> {
    let affected_items = state.services.spots.delete_spot(&state.context(), &id).await?;
    Ok(Json(ModifyObjectResponse { affected_items }))
}

pub async fn create_path(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<PathRequest>,
) -> ApiResult<CreateObjectResponse> {
    let id = state
        .services
        .paths
        .create_path(&state.context(), &request.point_a, &request.point_b)
        .await?;
    Ok(Json(CreateObjectResponse { id: id.to_hex() }))
}

pub async fn get_path(State(state): State<AppState>, UrlPath(id): UrlPath<String>) -> ApiResult<Path> {
    let path = state.services.paths.get_path(&state.context(), &id).await?;
    Ok(Json(path))
}

pub async fn modify_path(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
    JsonBody(request): JsonBody<PathRequest>,
) -> ApiResult<ModifyObjectResponse> {
    let affected_items = state
        .services
        .paths
        .modify_path(&state.context(), &request.point_a, &request.point_b, &id)
        .await?;
    Ok(Json(ModifyObjectResponse { affected_items }))
}

pub async fn list_paths(State(state): State<AppState>) -> ApiResult<Vec<Path>> {
    let paths = state.services.paths.list_paths(&state.context()).await?;
    Ok(Json(paths))
}

pub async fn delete_path(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> ApiResult<ModifyObjectResponse> {
    let affected_items = state.services.paths.delete_path(&state.context(), &id).await?;
    Ok(Json(ModifyObjectResponse { affected_items }))
}

pub async fn create_origin(
    State(state): State<AppState>,
    JsonBody(origin): JsonBody<Origin>,
) -> ApiResult<CreateObjectResponse> {
    let id = state.services.quadrants.create_origin(&state.context(), origin).await?;
    Ok(Json(CreateObjectResponse { id: id.to_hex() }))
}

pub async fn get_origin(State(state): State<AppState>) -> ApiResult<Origin> {
    let origin = state.services.quadrants.get_origin(&state.context()).await?;
    Ok(Json(origin))
}

pub async fn modify_origin(
    State(state): State<AppState>,
    JsonBody(origin): JsonBody<Origin>,
) -> ApiResult<ModifyObjectResponse> {
    let affected_items = state.services.quadrants.modify_origin(&state.context(), origin).await?;
    Ok(Json(ModifyObjectResponse { affected_items }))
}

pub async fn delete_origin(State(state): State<AppState>) -> ApiResult<ModifyObjectResponse> {
    let affected_items = state.services.quadrants.delete_origin(&state.context()).await?;
    Ok(Json(ModifyObjectResponse { affected_items }))
}

pub async fn spots_in_quadrant(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<QuadrantRequest>,
) -> ApiResult<Vec<Spot>> {
    let quadrant: Quadrant = request.name.parse()?;
    let spots = state
        .services
        .quadrants
        .spots_in_quadrant(&state.context(), quadrant)
        .await?;
    Ok(Json(spots))
}
