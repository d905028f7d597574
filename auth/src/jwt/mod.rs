pub mod claims;
pub mod codec;
pub mod errors;
pub mod issuer;
pub mod lifetime;

pub use claims::Claims;
pub use codec::TokenCodec;
pub use errors::JwtError;
pub use issuer::TokenIssuer;
pub use lifetime::TokenLifetime;
pub use lifetime::DEFAULT_TOKEN_LIFETIME;
