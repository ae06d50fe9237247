use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Fixed token lifetime: eight hours from issuance.
pub const TOKEN_LIFETIME_SECS: i64 = 8 * 60 * 60;

/// Identity snapshot embedded in a token at issuance.
///
/// This is a cache hint only: it reflects the user record as it was when
/// the token was signed. Downstream decisions that need current state
/// should re-resolve the user by id instead of trusting the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenIdentity {
    pub id: i64,
    pub email: String,
    pub name: String,
}

/// Signed payload of a session token.
///
/// Invariant: `exp` is always `iat + TOKEN_LIFETIME_SECS`. A token is
/// valid only while the current time is strictly before `exp` and its
/// signature verifies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Identity snapshot taken at issuance
    pub user: TokenIdentity,
}

impl TokenClaims {
    /// Build claims for an identity issued at `now`.
    pub fn for_identity(user: TokenIdentity, now: DateTime<Utc>) -> Self {
        let iat = now.timestamp();

        Self {
            exp: iat + TOKEN_LIFETIME_SECS,
            iat,
            user,
        }
    }

    /// Check whether the token has expired at `current_timestamp`.
    ///
    /// Validity is strict: a token is expired the moment the clock
    /// reaches `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
