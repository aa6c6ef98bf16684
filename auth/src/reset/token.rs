use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;

/// Random bytes per token (160 bits of entropy).
pub const RESET_TOKEN_BYTES: usize = 20;

/// Minutes a freshly issued reset token stays redeemable.
pub const RESET_TOKEN_TTL_MINUTES: i64 = 10;

/// Single-use password recovery credential.
///
/// The token is an opaque hex string drawn from the operating system CSPRNG.
/// It is redeemable strictly before `expires_at`.
#[derive(Clone, PartialEq, Eq)]
pub struct ResetToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl ResetToken {
    /// Generate a token valid for ten minutes from `now`.
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self::generate_with_ttl(now, Duration::minutes(RESET_TOKEN_TTL_MINUTES))
    }

    /// Generate a token valid for `ttl` from `now`.
    pub fn generate_with_ttl(now: DateTime<Utc>, ttl: Duration) -> Self {
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);

        Self {
            token: hex::encode(bytes),
            expires_at: now + ttl,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the token may still be redeemed at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn into_parts(self) -> (String, DateTime<Utc>) {
        (self.token, self.expires_at)
    }
}

// Keeps the secret out of logs.
impl std::fmt::Debug for ResetToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
