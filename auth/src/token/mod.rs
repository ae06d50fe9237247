pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::TokenClaims;
pub use claims::TokenIdentity;
pub use claims::TOKEN_LIFETIME_SECS;
pub use codec::TokenCodec;
pub use errors::TokenError;
