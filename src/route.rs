//! Route definitions and shared application state
//!
//! # Route Definitions
//!
//! - `GET /{code}` - Redirects to the target URL (public endpoint)
//! - `GET /api/links` - Lists links, newest first
//! - `POST /api/links` - Creates a new link
//! - `GET /api/links/{code}` - Fetches a single link record
//! - `DELETE /api/links/{code}` - Deletes a link

use axum::routing::get;
use axum::Router;

use crate::handler::{create_link, delete_link, get_link, list_links, redirect};
use crate::redirect::Resolver;
use crate::service::LinkService;
use crate::store::LinkStore;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub service: LinkService,
    pub resolver: Resolver,
}

impl AppState {
    /// Builds the state from a store handle; service and resolver each get
    /// their own clone.
    pub fn new(store: LinkStore) -> Self {
        Self {
            service: LinkService::new(store.clone()),
            resolver: Resolver::new(store),
        }
    }
}

/// Creates and configures the Axum application router with all routes
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/links", get(list_links).post(create_link))
        .route("/links/{code}", get(get_link).delete(delete_link));

    Router::new()
        // Public redirect endpoint - converts short code to target URL
        .route("/{code}", get(redirect))
        // Mount management routes under /api
        .nest("/api", api_routes)
        // Inject the application state into all handlers
        .with_state(state)
}
