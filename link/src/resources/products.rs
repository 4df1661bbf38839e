//! Product CRUD + search over `/v1/products`.

use super::{search_query, Transport};
use crate::error::Result;
use crate::models::{Page, Product, ProductRequest};

pub struct Products {
    transport: Transport,
}

impl Products {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn search(&self, filter: &str, page: u32, size: u32) -> Result<Page<Product>> {
        self.transport
            .get_json("/v1/products/search", &search_query(filter, page, size))
            .await
    }

    pub async fn get_by_code(&self, code: &str) -> Result<Product> {
        self.transport
            .get_json(&format!("/v1/products/code/{code}"), &[])
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Product> {
        self.transport
            .get_json(&format!("/v1/products/{id}"), &[])
            .await
    }

    pub async fn create(&self, request: &ProductRequest) -> Result<Product> {
        self.transport.post_json("/v1/products", request).await
    }

    pub async fn update(&self, id: i64, request: &ProductRequest) -> Result<Product> {
        self.transport
            .put_json(&format!("/v1/products/{id}"), request)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.transport.delete(&format!("/v1/products/{id}")).await
    }
}
