//! Redirect resolution with hit tracking
//!
//! Resolving a code is the hot path: look up the target, bump the hit
//! counter, hand the target back. The counter update must never cost a
//! visitor their redirect, so a failed `record_hit` is logged and swallowed
//! and the already-fetched target is returned anyway.

use crate::error::AppError;
use crate::store::LinkStore;

/// Redirect resolver, constructed with an injected store handle
#[derive(Clone)]
pub struct Resolver {
    store: LinkStore,
}

impl Resolver {
    pub fn new(store: LinkStore) -> Self {
        Self { store }
    }

    /// Resolves a code to its target URL, recording the hit.
    ///
    /// Returns [`AppError::NotFound`] without touching the store if the code
    /// has no live record.
    pub fn resolve(&self, code: &str) -> Result<String, AppError> {
        let link = self.store.find_by_code(code)?.ok_or(AppError::NotFound)?;

        if let Err(err) = self.store.record_hit(code) {
            // Stats are best-effort; the redirect still goes out
            tracing::warn!(code, error = %err, "failed to record hit");
        }

        Ok(link.target)
    }
}
