//! Sale CRUD + search over `/v1/sales`.

use super::{search_query, Transport};
use crate::error::Result;
use crate::models::{Page, Sale, SaleRequest};

pub struct Sales {
    transport: Transport,
}

impl Sales {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn search(&self, filter: &str, page: u32, size: u32) -> Result<Page<Sale>> {
        self.transport
            .get_json("/v1/sales/search", &search_query(filter, page, size))
            .await
    }

    pub async fn get_by_code(&self, code: &str) -> Result<Sale> {
        self.transport
            .get_json(&format!("/v1/sales/code/{code}"), &[])
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Sale> {
        self.transport.get_json(&format!("/v1/sales/{id}"), &[]).await
    }

    pub async fn create(&self, request: &SaleRequest) -> Result<Sale> {
        self.transport.post_json("/v1/sales", request).await
    }

    pub async fn update(&self, id: i64, request: &SaleRequest) -> Result<Sale> {
        self.transport
            .put_json(&format!("/v1/sales/{id}"), request)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.transport.delete(&format!("/v1/sales/{id}")).await
    }
}
