use thiserror::Error;

/// Error type for token operations.
///
/// The variants stay distinct so tests and logs can tell which check
/// rejected a token; callers must collapse all of them into one generic
/// client-facing message to avoid acting as a validation oracle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    Encoding(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
