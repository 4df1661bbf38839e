//! Resource services: one thin HTTP wrapper per backend entity.
//!
//! Each service holds a shared [`Transport`] and exposes the standard
//! surface (`search`, `get_by_code`, `create`, `update`, `delete`) or the
//! entity's read-only reporting calls. Services never interpret payloads;
//! pagination, filtering and ordering are all delegated to the backend.

mod customers;
mod dashboard;
mod products;
mod reports;
mod sales;

pub use customers::Customers;
pub use dashboard::Dashboard;
pub use products::Products;
pub use reports::Reports;
pub use sales::Sales;

use crate::auth::AuthProvider;
use crate::error::{Result, SalesLinkError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;

/// Shared request plumbing for all resource services.
///
/// Applies authentication, classifies failures through the error taxonomy,
/// and decodes JSON bodies. Cloning is cheap (reqwest clients share a pool).
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    base_url: String,
    http_client: reqwest::Client,
    auth: AuthProvider,
}

impl Transport {
    pub(crate) fn new(base_url: String, http_client: reqwest::Client, auth: AuthProvider) -> Self {
        Self {
            base_url,
            http_client,
            auth,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let request = self.http_client.get(self.url(path)).query(query);
        self.send(path, request).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.http_client.post(self.url(path)).json(body);
        self.send(path, request).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.http_client.put(self.url(path)).json(body);
        self.send(path, request).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let request = self.http_client.delete(self.url(path));
        let response = self.auth.apply_to_request(request).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(SalesLinkError::from_status(status.as_u16(), &body))
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let start = Instant::now();
        let response = self.auth.apply_to_request(request).send().await?;
        let status = response.status();
        log::debug!(
            "[LINK] {} -> {} in {:?}",
            path,
            status,
            start.elapsed()
        );

        if status.is_success() {
            let value = response
                .json::<T>()
                .await
                .map_err(|e| SalesLinkError::Decode(format!("Resposta inválida: {e}")))?;
            Ok(value)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(SalesLinkError::from_status(status.as_u16(), &body))
        }
    }
}

/// Standard `?page=&size=&filter=` query for search endpoints
pub(crate) fn search_query(filter: &str, page: u32, size: u32) -> Vec<(&'static str, String)> {
    let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
    if !filter.is_empty() {
        query.push(("filter", filter.to_string()));
    }
    query
}
