use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and session
/// token issuance.
///
/// Built once at startup from the configured signing secret and token
/// lifetime, then shared read-only.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl_hours: i64,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl_hours` - Lifetime of issued tokens
    pub fn new(jwt_secret: &[u8], token_ttl_hours: i64) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl_hours,
        }
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token for the account.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be parsed
    /// * `JwtError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        account_id: &str,
        email: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(account_id, email)?;

        Ok(AuthenticationResult {
            access_token,
            expires_in: self.token_ttl_seconds(),
        })
    }

    /// Issue a session token without password verification.
    pub fn issue_token(&self, account_id: &str, email: &str) -> Result<String, JwtError> {
        let claims = Claims::for_account(account_id, email, self.token_ttl_hours);
        self.jwt_handler.encode(&claims)
    }

    /// Verify a session token and return its claims.
    ///
    /// # Errors
    /// * `ExpiredToken` - Token lifetime has elapsed
    /// * `InvalidSignature` - Token is malformed or was not signed by us
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }

    pub fn token_ttl_seconds(&self) -> i64 {
        self.token_ttl_hours * 60 * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(SECRET, 1);
        let hash = authenticator
            .hash_password("Secret123")
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate("Secret123", &hash, "account123", "alice@example.com")
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());
        assert_eq!(result.expires_in, 3600);

        let claims = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(claims.sub, "account123");
        assert_eq!(claims.email, "alice@example.com");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(SECRET, 1);
        let hash = authenticator
            .hash_password("Secret123")
            .expect("Failed to hash password");

        let result =
            authenticator.authenticate("Wrong1234", &hash, "account123", "alice@example.com");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_consecutive_tokens_differ() {
        let authenticator = Authenticator::new(SECRET, 1);

        let first = authenticator
            .issue_token("account123", "alice@example.com")
            .expect("Failed to issue token");
        let second = authenticator
            .issue_token("account123", "alice@example.com")
            .expect("Failed to issue token");

        assert_ne!(first, second);
    }

    #[test]
    fn test_validate_token_from_other_secret() {
        let issuer = Authenticator::new(b"another_secret_key_at_least_32_bytes", 1);
        let verifier = Authenticator::new(SECRET, 1);

        let token = issuer
            .issue_token("account123", "alice@example.com")
            .expect("Failed to issue token");

        assert!(matches!(
            verifier.validate_token(&token),
            Err(JwtError::InvalidSignature(_))
        ));
    }
}
