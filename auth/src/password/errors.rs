use thiserror::Error;

/// Error type for password operations.
///
/// Verification never errors: a malformed stored hash simply fails to
/// match. Only hashing itself can fail, and only on internal entropy or
/// resource problems.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
