//! Main sales backend client with builder pattern.

use crate::{
    auth::AuthProvider,
    error::{Result, SalesLinkError},
    models::{LoginRequest, LoginResponse, MessageResponse},
    resources::{Customers, Dashboard, Products, Reports, Sales},
};
use std::time::Duration;

/// Main client for the sales backend.
///
/// Use [`SalesClient::builder`] to construct instances. Resource services are
/// created on demand and share the client's connection pool:
///
/// ```rust,no_run
/// use sales_link::SalesClient;
///
/// # async fn example() -> sales_link::Result<()> {
/// let client = SalesClient::builder()
///     .base_url("http://localhost:8080/api")
///     .bearer_token("eyJhbGc...")
///     .build()?;
///
/// let page = client.customers().search("maria", 0, 10).await?;
/// println!("{} clientes", page.total_elements);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SalesClient {
    base_url: String,
    http_client: reqwest::Client,
    auth: AuthProvider,
}

impl SalesClient {
    /// Create a new builder for configuring the client
    pub fn builder() -> SalesClientBuilder {
        SalesClientBuilder::new()
    }

    /// Authenticate and obtain a bearer token.
    ///
    /// The returned token is not installed automatically; call
    /// [`SalesClient::authorize`] with it for subsequent requests.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        log::debug!("[LOGIN] authenticating '{email}'");
        self.transport().post_json("/v1/auth/login", &request).await
    }

    /// Invalidate the session server-side
    pub async fn logout(&self) -> Result<MessageResponse> {
        self.transport()
            .post_json("/v1/auth/logout", &serde_json::json!({}))
            .await
    }

    /// Replace the client's credentials (after login or token refresh)
    pub fn authorize(&mut self, token: impl Into<String>) {
        self.auth = AuthProvider::bearer(token);
    }

    /// Drop credentials (after logout or session expiry)
    pub fn deauthorize(&mut self) {
        self.auth = AuthProvider::none();
    }

    /// Whether credentials are currently installed
    pub fn has_credentials(&self) -> bool {
        self.auth.is_configured()
    }

    pub fn customers(&self) -> Customers {
        Customers::new(self.transport())
    }

    pub fn products(&self) -> Products {
        Products::new(self.transport())
    }

    pub fn sales(&self) -> Sales {
        Sales::new(self.transport())
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.transport())
    }

    pub fn reports(&self) -> Reports {
        Reports::new(self.transport())
    }

    fn transport(&self) -> crate::resources::Transport {
        crate::resources::Transport::new(
            self.base_url.clone(),
            self.http_client.clone(),
            self.auth.clone(),
        )
    }
}

/// Builder for configuring [`SalesClient`] instances.
pub struct SalesClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    auth: AuthProvider,
}

impl SalesClientBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            auth: AuthProvider::none(),
        }
    }

    /// Set the API base URL (e.g. `http://localhost:8080/api`)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        // Trailing slash would double up with resource paths
        self.base_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    /// Set the per-request timeout (default 30s)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Install a bearer token
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.auth = AuthProvider::bearer(token);
        self
    }

    /// Set the authentication provider directly
    pub fn auth(mut self, auth: AuthProvider) -> Self {
        self.auth = auth;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<SalesClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| SalesLinkError::Configuration("base_url is required".into()))?;

        // Keep-alive pooling: the console fires bursts of small requests
        let http_client = reqwest::Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| SalesLinkError::Configuration(e.to_string()))?;

        Ok(SalesClient {
            base_url,
            http_client,
            auth: self.auth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_pattern() {
        let result = SalesClient::builder()
            .base_url("http://localhost:8080/api")
            .timeout(Duration::from_secs(10))
            .bearer_token("test_token")
            .build();

        assert!(result.is_ok());
        assert!(result.unwrap().has_credentials());
    }

    #[test]
    fn test_builder_missing_url() {
        let result = SalesClient::builder().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = SalesClient::builder()
            .base_url("http://localhost:8080/api/")
            .build()
            .unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn test_authorize_roundtrip() {
        let mut client = SalesClient::builder()
            .base_url("http://localhost:8080/api")
            .build()
            .unwrap();
        assert!(!client.has_credentials());
        client.authorize("tok");
        assert!(client.has_credentials());
        client.deauthorize();
        assert!(!client.has_credentials());
    }
}
