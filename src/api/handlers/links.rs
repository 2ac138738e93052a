//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse};
use crate::api::dto::pagination::PaginationParams;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/a",
///   "code": "promo24"   // optional, 6-8 alphanumeric characters
/// }
/// ```
///
/// Without `code`, a random 6-character code is generated (7 characters after
/// repeated collisions).
///
/// # Errors
///
/// - 400 Bad Request - invalid URL or code format, or an unreadable body
/// - 409 Conflict - supplied code already exists
/// - 500 Internal Server Error - allocation exhausted or storage failure
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| AppError::invalid_url(rejection.body_text()))?;
    payload.validate()?;

    let link = state
        .allocator
        .allocate(&payload.url, payload.code.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists links, newest first.
///
/// # Endpoint
///
/// `GET /api/links?page=1&page_size=25`
///
/// Unparsable or out-of-range pagination values fall back to the defaults or
/// are clamped; they never fail the request.
pub async fn list_links_handler(
    State(state): State<AppState>,
    pagination: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let (offset, limit) = pagination
        .map(|Query(params)| params)
        .unwrap_or_default()
        .offset_limit();

    let links = state.link_service.list_links(offset, limit).await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Returns a link with its counters. Does not count as a click.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found for absent or malformed codes.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(link.into()))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// A redirect in flight for the same code either completes before the delete
/// or reports 404; every later redirect reports 404.
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
