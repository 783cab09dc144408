use super::PlatformKey;

/// OAuth client credentials for one platform. The secret is only ever held
/// in its encrypted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialCredentials {
    pub platform: PlatformKey,
    pub client_id: String,
    pub encrypted_secret: String,
}

impl SocialCredentials {
    pub fn new(platform: PlatformKey, client_id: String, encrypted_secret: String) -> Self {
        Self {
            platform,
            client_id,
            encrypted_secret,
        }
    }
}
