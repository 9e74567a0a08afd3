//! Short code generation and format validation
//!
//! Codes are 6-8 ASCII alphanumeric characters. Generated codes are always 6
//! characters drawn uniformly from the 62-symbol alphabet, which gives
//! 62^6 (about 56.8 billion) combinations; collisions are negligible at any
//! realistic link volume, but generation is still bounded so a pathologically
//! full code space fails loudly instead of looping forever.

use rand::{distr::Alphanumeric, Rng};

use crate::error::AppError;
use crate::store::LinkStore;

/// Length of generated codes
pub const GENERATED_CODE_LEN: usize = 6;

/// Custom codes may be slightly longer
pub const MAX_CODE_LEN: usize = 8;

/// Upper bound on generation attempts before giving up
pub const MAX_ATTEMPTS: usize = 10;

/// Draws a random 6-character alphanumeric code.
pub fn random_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_CODE_LEN)
        .map(char::from)
        .collect()
}

/// Checks the code format rule: 6-8 characters, `[A-Za-z0-9]` only.
pub fn is_valid_code(code: &str) -> bool {
    (GENERATED_CODE_LEN..=MAX_CODE_LEN).contains(&code.len())
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Produces a code that is not currently in use.
///
/// Draws a candidate and checks availability against the store, redrawing on
/// collision, for at most [`MAX_ATTEMPTS`] tries. The availability check is a
/// best-effort pre-filter: the store's atomic `try_create` is what actually
/// enforces uniqueness, and the caller must treat an insert-time collision as
/// one more redraw.
pub fn generate(store: &LinkStore) -> Result<String, AppError> {
    for _ in 0..MAX_ATTEMPTS {
        let candidate = random_code();
        if store.find_by_code(&candidate)?.is_none() {
            return Ok(candidate);
        }
    }
    Err(AppError::CodeSpaceExhausted)
}
