use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use rand::RngCore;

use crate::application::ports::{CipherError, SecretCipher};

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 24;

/// XChaCha20-Poly1305 with a random nonce per secret.
///
/// Tokens are URL-safe base64 of `nonce || ciphertext`.
pub struct ChaChaSecretCipher {
    cipher: XChaCha20Poly1305,
}

impl ChaChaSecretCipher {
    /// Key is URL-safe base64 of 32 bytes.
    pub fn from_base64_key(encoded: &str) -> Result<Self, CipherError> {
        let bytes = URL_SAFE
            .decode(encoded.trim())
            .map_err(|e| CipherError::InvalidKey(e.to_string()))?;

        let key: [u8; KEY_LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
            CipherError::InvalidKey(format!("expected {} bytes, got {}", KEY_LEN, b.len()))
        })?;

        Ok(Self::from_bytes(key))
    }

    pub fn from_bytes(key: [u8; KEY_LEN]) -> Self {
        Self {
            cipher: XChaCha20Poly1305::new((&key).into()),
        }
    }

    /// Fresh random key. Secrets encrypted with it are lost on restart.
    pub fn generate() -> Self {
        Self::from_bytes(generate_key())
    }
}

pub fn generate_key() -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    rand::thread_rng().fill_bytes(&mut key);
    key
}

pub fn encode_key(key: &[u8; KEY_LEN]) -> String {
    URL_SAFE.encode(key)
}

impl SecretCipher for ChaChaSecretCipher {
    fn encrypt(&self, plain_text: &str) -> Result<String, CipherError> {
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);

        let ciphertext = self
            .cipher
            .encrypt(XNonce::from_slice(&nonce), plain_text.as_bytes())
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

        let mut token = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        token.extend_from_slice(&nonce);
        token.extend_from_slice(&ciphertext);

        Ok(URL_SAFE.encode(token))
    }

    fn decrypt(&self, token: &str) -> Result<String, CipherError> {
        let raw = URL_SAFE
            .decode(token.trim())
            .map_err(|e| CipherError::MalformedToken(e.to_string()))?;

        if raw.len() <= NONCE_LEN {
            return Err(CipherError::MalformedToken("token too short".to_string()));
        }

        let (nonce, ciphertext) = raw.split_at(NONCE_LEN);
        let plain = self
            .cipher
            .decrypt(XNonce::from_slice(nonce), ciphertext)
            .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;

        String::from_utf8(plain).map_err(|e| CipherError::DecryptionFailed(e.to_string()))
    }
}
