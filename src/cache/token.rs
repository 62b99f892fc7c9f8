use serde::{Deserialize, Serialize};

/// Bearer token as persisted in the token file.
///
/// `expires_at` is a UNIX timestamp in milliseconds. Missing fields decode to
/// their empty values so that an incomplete record reads as a cache miss
/// instead of a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedToken {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub expires_at: i64,
}

impl CachedToken {
    pub fn new(access_token: String, expires_at: i64) -> Self {
        Self { access_token, expires_at }
    }

    /// A token is usable while it has a value and `now_ms` is strictly before its expiry.
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        !self.access_token.is_empty() && self.expires_at > 0 && now_ms < self.expires_at
    }
}
