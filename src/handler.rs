//! HTTP request handlers for the link shortener API
//!
//! Handlers stay thin: extract the request, call into the service or
//! resolver, and let [`AppError`]'s `IntoResponse` impl shape failures.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};

use crate::error::AppError;
use crate::model::CreateLinkRequest;
use crate::route::AppState;

/// Creates a new short link
///
/// # Request Body
///
/// ```json
/// {
///   "target": "https://example.com/very/long/url",
///   "code": "mylink1"  // Optional
/// }
/// ```
///
/// # Response
///
/// - **201 Created** - the created Link record
/// - **400 Bad Request** - invalid target URL or code format
/// - **409 Conflict** - custom code already exists
pub async fn create_link(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.service.create(&payload.target, payload.code)?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// Lists all links, newest first
pub async fn list_links(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let links = state.service.list()?;
    Ok(Json(links))
}

/// Fetches a single link record by code
///
/// # Response
///
/// - **200 OK** - the Link record
/// - **404 Not Found** - no link with this code
pub async fn get_link(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.service.get(&code)?;
    Ok(Json(link))
}

/// Deletes a link by code
///
/// # Response
///
/// - **204 No Content** - link deleted
/// - **404 Not Found** - no link with this code
pub async fn delete_link(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    state.service.delete(&code)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Redirects a short code to its target URL
///
/// Uses 307 Temporary Redirect instead of 301 Permanent so browsers keep
/// coming back and hits keep being counted, and so a deleted code stops
/// working immediately.
///
/// # Response
///
/// - **307 Temporary Redirect** - Location set to the target URL
/// - **404 Not Found** - no link with this code
pub async fn redirect(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target = state.resolver.resolve(&code)?;
    Ok(Redirect::temporary(&target))
}
