use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Session token payload.
///
/// Identifies the account the token was issued to. Every token carries a
/// unique `jti`, so two tokens issued for the same account within the same
/// second still differ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Account email at issuance time
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Unique token identifier
    pub jti: String,
}

impl Claims {
    /// Create claims for an account session starting now.
    ///
    /// # Arguments
    /// * `account_id` - Account identifier
    /// * `email` - Account email address
    /// * `ttl_hours` - Hours until the token expires
    ///
    /// # Returns
    /// Claims with sub, email, iat, exp and a fresh jti
    pub fn for_account(account_id: impl ToString, email: impl ToString, ttl_hours: i64) -> Self {
        Self::issued_at(account_id, email, Utc::now(), ttl_hours)
    }

    /// Create claims for an account session issued at a given instant.
    pub fn issued_at(
        account_id: impl ToString,
        email: impl ToString,
        issued_at: DateTime<Utc>,
        ttl_hours: i64,
    ) -> Self {
        let expiration = issued_at + Duration::hours(ttl_hours);

        Self {
            sub: account_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}
