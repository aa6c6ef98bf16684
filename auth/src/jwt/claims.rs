use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Bearer token payload.
///
/// Carries only the subject identity and the validity window; roles are
/// resolved from storage on every request so a demoted or deleted account
/// stops being honoured immediately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject valid for `ttl` starting now.
    ///
    /// # Arguments
    /// * `subject` - Unique user identifier
    /// * `ttl` - Token lifetime
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Self {
        Self::issued_at(subject, Utc::now(), ttl)
    }

    /// Create claims for a subject issued at an explicit instant.
    pub fn issued_at(subject: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("user123", Duration::days(30));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_issued_at() {
        let issued = DateTime::from_timestamp(1_000_000, 0).unwrap();
        let claims = Claims::issued_at("abc", issued, Duration::hours(1));

        assert_eq!(claims.iat, 1_000_000);
        assert_eq!(claims.exp, 1_003_600);
    }

    #[test]
    fn test_is_expired() {
        let issued = DateTime::from_timestamp(0, 0).unwrap();
        let claims = Claims::issued_at("user", issued, Duration::seconds(1000));

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_wire_format() {
        let issued = DateTime::from_timestamp(1_000_000, 0).unwrap();
        let claims = Claims::issued_at("abc", issued, Duration::seconds(60));

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "sub": "abc", "iat": 1_000_000, "exp": 1_000_060 })
        );
    }
}
