//! Authentication for the sales backend.
//!
//! The backend issues opaque bearer tokens on login. For session-expiry
//! purposes the token is assumed to be a dot-delimited string whose middle
//! segment is base64url-encoded JSON carrying an `exp` claim (seconds since
//! epoch). Parsing is best-effort: any malformed token is simply treated as
//! not authenticated, never as an error.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

/// Authentication credentials attached to every request.
#[derive(Debug, Clone, Default)]
pub enum AuthProvider {
    /// Bearer token authentication
    Bearer(String),

    /// No authentication (login and health endpoints)
    #[default]
    None,
}

impl AuthProvider {
    /// Create bearer token authentication
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    /// No authentication
    pub fn none() -> Self {
        Self::None
    }

    /// Attach the Authorization header when a token is configured
    pub fn apply_to_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Bearer(token) => request.bearer_auth(token),
            Self::None => request,
        }
    }

    /// Whether credentials are configured at all
    pub fn is_configured(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Extract the `exp` claim (seconds since epoch) from a bearer token.
///
/// Returns `None` for anything that is not a well-formed three-segment token
/// with a JSON payload: missing segments, bad base64, bad JSON, missing or
/// non-numeric `exp`.
pub fn token_expiry(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    // Tokens in the wild are sometimes padded; strip before decoding unpadded
    let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&decoded).ok()?;
    let exp = claims.get("exp")?;
    exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64))
}

/// Whether the token's expiry is strictly in the future at `now_secs`.
///
/// Malformed tokens are never live.
pub fn token_is_live(token: &str, now_secs: i64) -> bool {
    match token_expiry(token) {
        Some(exp) => now_secs < exp,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(claims: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.as_bytes());
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn test_expiry_extraction() {
        let token = make_token(r#"{"sub":"alice","exp":1900000000}"#);
        assert_eq!(token_expiry(&token), Some(1_900_000_000));
    }

    #[test]
    fn test_future_expiry_is_live() {
        let token = make_token(r#"{"exp":2000000000}"#);
        assert!(token_is_live(&token, 1_999_999_999));
        // strictly in the future: exp == now is already expired
        assert!(!token_is_live(&token, 2_000_000_000));
        assert!(!token_is_live(&token, 2_000_000_001));
    }

    #[test]
    fn test_malformed_tokens_never_live() {
        assert!(!token_is_live("", 0));
        assert!(!token_is_live("not-a-token", 0));
        assert!(!token_is_live("one.two", 0)); // bad base64 payload
        let no_exp = make_token(r#"{"sub":"alice"}"#);
        assert!(!token_is_live(&no_exp, 0));
        let bad_json = format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"{{{{"));
        assert!(!token_is_live(&bad_json, 0));
    }

    #[test]
    fn test_padded_payload_accepted() {
        let header = URL_SAFE_NO_PAD.encode(b"{}");
        let payload = format!("{}==", URL_SAFE_NO_PAD.encode(br#"{"exp":123}"#));
        let token = format!("{header}.{payload}.sig");
        assert_eq!(token_expiry(&token), Some(123));
    }

    #[test]
    fn test_apply_bearer_header() {
        let client = reqwest::Client::new();
        let request = AuthProvider::bearer("abc")
            .apply_to_request(client.get("http://localhost/x"))
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer abc"
        );

        let request = AuthProvider::none()
            .apply_to_request(client.get("http://localhost/x"))
            .build()
            .unwrap();
        assert!(request.headers().get("authorization").is_none());
    }
}
