use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;

use voice_to_post::application::ports::{CipherError, SecretCipher};
use voice_to_post::infrastructure::crypto::{ChaChaSecretCipher, encode_key, generate_key};

#[test]
fn given_encrypted_secret_when_decrypting_then_returns_plain_text() {
    let cipher = ChaChaSecretCipher::generate();
    let token = cipher.encrypt("super-secret").unwrap();

    assert_ne!(token, "super-secret");
    assert_eq!(cipher.decrypt(&token).unwrap(), "super-secret");
}

#[test]
fn given_same_secret_when_encrypting_twice_then_tokens_differ() {
    let cipher = ChaChaSecretCipher::generate();
    assert_ne!(cipher.encrypt("x").unwrap(), cipher.encrypt("x").unwrap());
}

#[test]
fn given_other_key_when_decrypting_then_fails() {
    let token = ChaChaSecretCipher::generate().encrypt("secret").unwrap();
    let result = ChaChaSecretCipher::generate().decrypt(&token);
    assert!(matches!(result, Err(CipherError::DecryptionFailed(_))));
}

#[test]
fn given_encoded_key_when_loading_then_decrypts_tokens_from_same_key() {
    let key = generate_key();
    let encoded = encode_key(&key);

    let token = ChaChaSecretCipher::from_bytes(key).encrypt("abc").unwrap();
    let loaded = ChaChaSecretCipher::from_base64_key(&encoded).unwrap();

    assert_eq!(loaded.decrypt(&token).unwrap(), "abc");
}

#[test]
fn given_short_key_when_loading_then_returns_invalid_key() {
    let result = ChaChaSecretCipher::from_base64_key(&URL_SAFE.encode([1u8; 16]));
    assert!(matches!(result, Err(CipherError::InvalidKey(_))));
}

#[test]
fn given_garbage_token_when_decrypting_then_returns_malformed() {
    let cipher = ChaChaSecretCipher::generate();
    assert!(matches!(
        cipher.decrypt("not base64!!"),
        Err(CipherError::MalformedToken(_))
    ));
}
