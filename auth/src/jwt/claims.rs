use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a session token.
///
/// The token is self-contained: everything needed to rebuild the
/// authenticated identity (user id, username, email, role names) travels
/// inside the signed payload, so protected requests never touch storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Username bound to the subject
    pub username: String,

    /// Email address bound to the subject
    pub email: String,

    /// Canonical role names granted to the subject
    pub roles: Vec<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a freshly authenticated user.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Username to embed
    /// * `email` - Email address to embed
    /// * `roles` - Canonical role names to embed
    /// * `expiration_hours` - Hours until the token expires
    ///
    /// # Returns
    /// Claims with sub, identity fields, iat, and exp set
    pub fn for_user(
        user_id: impl ToString,
        username: String,
        email: String,
        roles: Vec<String>,
        expiration_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            username,
            email,
            roles,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if the token is expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user() {
        let claims = Claims::for_user(
            "user123",
            "alice".to_string(),
            "alice@example.com".to_string(),
            vec!["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()],
            24,
        );

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.roles.len(), 2);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60); // 24 hours
    }

    #[test]
    fn test_is_expired() {
        let mut claims = Claims::for_user(
            "user123",
            "alice".to_string(),
            "alice@example.com".to_string(),
            vec!["ROLE_USER".to_string()],
            24,
        );
        claims.exp = 1000;

        assert!(!claims.is_expired(999)); // Not expired
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }
}
