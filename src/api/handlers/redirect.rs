//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination and counts the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject malformed codes as not found (no database access)
/// 2. Read the URL, increment `clicks` and stamp `last_clicked` in one
///    row-locked transaction
/// 3. Return 302 Found with the URL read under the lock
///
/// If the client disconnects mid-request the handler future is dropped and
/// the open transaction rolls back.
///
/// # Errors
///
/// Returns 404 Not Found for absent, deleted, or malformed codes.
/// Returns 500 Internal Server Error if the transaction fails.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let url = state.resolver.resolve(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}
