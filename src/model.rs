//! Data models for the link shortener
//!
//! Defines the stored link entity and the request payload for creating one.
//! The JSON field names on [`Link`] are an external contract and must not
//! change: clients depend on `target`, `hitCount`, `lastHitAt`, `createdAt`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened link as stored in the database and returned by the API.
///
/// # Example
/// ```json
/// {
///   "id": "3f1c9a6e-8b2d-4e1f-9c5a-7d0b2e4f6a81",
///   "code": "Abc123",
///   "target": "https://example.com/very/long/url",
///   "hitCount": 4,
///   "lastHitAt": "2026-01-17T13:40:00Z",
///   "createdAt": "2026-01-15T09:12:00Z"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Opaque unique identifier, assigned by the store at creation
    pub id: String,

    /// Short code, 6-8 alphanumeric characters, unique among live links
    pub code: String,

    /// The destination URL visitors are redirected to
    pub target: String,

    /// Number of successful redirects through this link
    #[serde(default)]
    pub hit_count: u64,

    /// Timestamp of the most recent redirect, null until the first hit
    #[serde(default)]
    pub last_hit_at: Option<DateTime<Utc>>,

    /// Timestamp when this link was created
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a new link
///
/// # Example
/// ```json
/// {
///   "target": "https://example.com/very/long/url",
///   "code": "mylink1"  // Optional
/// }
/// ```
#[derive(Deserialize)]
pub struct CreateLinkRequest {
    /// The destination URL to shorten
    pub target: String,

    /// Optional custom short code (6-8 alphanumeric characters)
    /// If not provided, a random 6-character code is generated
    pub code: Option<String>,
}
