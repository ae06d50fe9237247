use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::claims::TokenIdentity;
use super::errors::TokenError;

/// Codec for stateless session tokens.
///
/// Encodes an identity snapshot and expiry into an HS256-signed JWT and
/// validates such tokens back into claims. The algorithm is pinned to
/// exactly HS256: a token declaring any other algorithm is rejected
/// before its payload is trusted, closing the algorithm-confusion hole.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec from the shared signing secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in configuration or a vault, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token for `identity`, expiring a fixed lifetime
    /// after `now`.
    ///
    /// # Errors
    /// * `Encoding` - Serialization or signing failed
    pub fn issue(&self, identity: TokenIdentity, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = TokenClaims::for_identity(identity, now);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Decode and validate a token against the caller's clock.
    ///
    /// Signature and algorithm checks run first, then expiry (strictly
    /// before `exp`), then a sanity check on the embedded user id.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature mismatch or non-HS256 algorithm
    /// * `Expired` - `now` is at or past the token's expiry
    /// * `Malformed` - Structure does not parse, or the embedded id is < 1
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the caller-supplied clock, not
        // the library's.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        let claims = token_data.claims;

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        if claims.user.id < 1 {
            return Err(TokenError::Malformed(
                "token carries no usable user id".to_string(),
            ));
        }

        Ok(claims)
    }
}
