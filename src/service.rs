//! Link lifecycle operations: create, list, get, delete
//!
//! This is where input validation and code selection happen. The service
//! never enforces uniqueness itself; it hands candidates to the store's
//! atomic `try_create` and reacts to the outcome.

use url::Url;

use crate::codegen;
use crate::error::AppError;
use crate::model::Link;
use crate::store::{LinkStore, StoreError};

/// Link management service, constructed with an injected store handle
#[derive(Clone)]
pub struct LinkService {
    store: LinkStore,
}

impl LinkService {
    pub fn new(store: LinkStore) -> Self {
        Self { store }
    }

    /// Creates a new link.
    ///
    /// Validates the target URL, then either claims the caller-supplied code
    /// or generates one. A supplied code that is taken fails with
    /// [`AppError::CodeTaken`]; custom codes never fall back to generation.
    /// For generated codes, losing the insert race to a concurrent writer
    /// counts as a collision and triggers a fresh draw, up to the generator's
    /// retry bound.
    pub fn create(&self, target: &str, code: Option<String>) -> Result<Link, AppError> {
        validate_target(target)?;

        // Treat an empty code field the same as an absent one
        let custom_code = code.filter(|c| !c.is_empty());

        if let Some(custom) = custom_code {
            if !codegen::is_valid_code(&custom) {
                return Err(AppError::Validation(
                    "invalid code format: must be 6-8 alphanumeric characters".to_string(),
                ));
            }
            return match self.store.try_create(&custom, target) {
                Ok(link) => Ok(link),
                Err(StoreError::AlreadyExists) => Err(AppError::CodeTaken),
                Err(err) => Err(err.into()),
            };
        }

        for _ in 0..codegen::MAX_ATTEMPTS {
            let candidate = codegen::generate(&self.store)?;
            match self.store.try_create(&candidate, target) {
                Ok(link) => return Ok(link),
                // Another writer claimed the code between the availability
                // check and the insert; draw again
                Err(StoreError::AlreadyExists) => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Err(AppError::CodeSpaceExhausted)
    }

    /// Lists all links, newest first.
    pub fn list(&self) -> Result<Vec<Link>, AppError> {
        Ok(self.store.list()?)
    }

    /// Fetches a single link by code.
    pub fn get(&self, code: &str) -> Result<Link, AppError> {
        self.store.find_by_code(code)?.ok_or(AppError::NotFound)
    }

    /// Deletes a link by code. The code becomes reusable immediately.
    pub fn delete(&self, code: &str) -> Result<(), AppError> {
        match self.store.delete(code) {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound) => Err(AppError::NotFound),
            Err(err) => Err(err.into()),
        }
    }
}

/// Validates that the target is an absolute http(s) URL.
fn validate_target(target: &str) -> Result<(), AppError> {
    match Url::parse(target) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        _ => Err(AppError::Validation(
            "invalid target: must be an absolute http or https URL".to_string(),
        )),
    }
}
