use serde::{Deserialize, Serialize};

/// Access token (JWT) claims.
///
/// `sub` is the user id as a UUID string. `iat` / `exp` are unix seconds and
/// both optional: tokens minted without a TTL carry no `exp` and stay valid
/// until the signing key changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}
