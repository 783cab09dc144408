mod chacha_secret_cipher;

pub use chacha_secret_cipher::{ChaChaSecretCipher, encode_key, generate_key};
