/// Reversible encryption of secrets stored at rest.
pub trait SecretCipher: Send + Sync {
    fn encrypt(&self, plain_text: &str) -> Result<String, CipherError>;
    fn decrypt(&self, token: &str) -> Result<String, CipherError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
    #[error("malformed token: {0}")]
    MalformedToken(String),
}
