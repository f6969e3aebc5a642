use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Session token handler for signing and verifying tokens.
///
/// Uses HS256 (HMAC with SHA-256). Expiry is enforced without leeway.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from configuration or the environment, never from code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims into a token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `ExpiredToken` - The `exp` claim is in the past
    /// * `InvalidSignature` - Token is malformed, tampered with, signed with
    ///   another key, or lacks the `exp`/`sub` claims
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                    _ => JwtError::InvalidSignature(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::for_account("account123", "alice@example.com", 1);

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_garbage_token() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.decode("invalid.token.here");
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let issuer = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let verifier = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let claims = Claims::for_account("account123", "alice@example.com", 1);
        let token = issuer.encode(&claims).expect("Failed to encode token");

        let result = verifier.decode(&token);
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));
    }

    #[test]
    fn test_decode_tampered_payload() {
        let handler = JwtHandler::new(SECRET);
        let token = handler
            .encode(&Claims::for_account("account123", "alice@example.com", 1))
            .expect("Failed to encode token");
        let forged = handler
            .encode(&Claims::for_account("account999", "mallory@example.com", 1))
            .expect("Failed to encode token");

        // Splice the forged payload onto the original signature
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let tampered = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        let result = handler.decode(&tampered);
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));
    }

    #[test]
    fn test_decode_token_older_than_one_hour() {
        let handler = JwtHandler::new(SECRET);
        let issued = Utc::now() - Duration::minutes(61);
        let claims = Claims::issued_at("account123", "alice@example.com", issued, 1);

        let token = handler.encode(&claims).expect("Failed to encode token");

        assert_eq!(handler.decode(&token), Err(JwtError::ExpiredToken));
    }
}
