use jsonwebtoken::{DecodingKey, EncodingKey};

/// Process-wide HS256 secret, shared by the token issuer and verifier.
///
/// Built once at startup from configuration and handed to both explicitly.
/// Key material is never printed via Debug.
#[derive(Clone)]
pub struct SigningKey {
    secret: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
#[error("signing key must not be empty")]
pub struct EmptySigningKey;

impl SigningKey {
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, EmptySigningKey> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(EmptySigningKey);
        }
        Ok(Self { secret })
    }

    pub fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.secret)
    }

    pub fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.secret)
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}
