pub mod claims;
pub mod issuer;
pub mod permission;
pub mod signing_key;
pub mod verifier;

pub use issuer::TokenIssuer;
pub use permission::{PermissionMask, is_admitted};
pub use signing_key::SigningKey;
pub use verifier::TokenVerifier;
