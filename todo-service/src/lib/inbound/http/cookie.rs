//! Session cookie written on login.

use axum::http::HeaderValue;

use crate::config::CookieConfig;

/// Attributes of the `Set-Cookie` header carrying the session token.
///
/// The cookie is informational for browser clients; protected routes only
/// read the `Authorization` header.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    pub secure: bool,
    pub path: String,
}

impl SessionCookie {
    pub fn from_config(config: &CookieConfig) -> Self {
        Self {
            name: config.name.clone(),
            secure: config.secure,
            path: "/".to_string(),
        }
    }

    /// Build Set-Cookie header value expiring together with the token
    pub fn build_set_cookie(&self, token: &str, max_age_secs: i64) -> String {
        let mut cookie = format!("{}={}; HttpOnly", self.name, token);

        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; Path={}", self.path));
        cookie.push_str("; SameSite=Lax");
        cookie.push_str(&format!("; Max-Age={}", max_age_secs));

        cookie
    }

    /// `None` when the token contains bytes not allowed in a header.
    pub fn header_value(&self, token: &str, max_age_secs: i64) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build_set_cookie(token, max_age_secs)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie(secure: bool) -> SessionCookie {
        SessionCookie::from_config(&CookieConfig {
            name: "token".to_string(),
            secure,
        })
    }

    #[test]
    fn test_build_set_cookie() {
        assert_eq!(
            cookie(false).build_set_cookie("abc.def.ghi", 3600),
            "token=abc.def.ghi; HttpOnly; Path=/; SameSite=Lax; Max-Age=3600"
        );
    }

    #[test]
    fn test_secure_flag() {
        let value = cookie(true).build_set_cookie("abc", 3600);

        assert!(value.contains("; Secure"));
        assert!(value.starts_with("token=abc; HttpOnly"));
    }

    #[test]
    fn test_header_value_rejects_control_characters() {
        assert!(cookie(false).header_value("bad\ntoken", 3600).is_none());
        assert!(cookie(false).header_value("good", 3600).is_some());
    }
}
