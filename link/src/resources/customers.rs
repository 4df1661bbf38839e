//! Customer CRUD + search over `/v1/customers`.

use super::{search_query, Transport};
use crate::error::Result;
use crate::models::{Customer, CustomerRequest, Page};

pub struct Customers {
    transport: Transport,
}

impl Customers {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Server-side paginated search; `page` is zero-based
    pub async fn search(&self, filter: &str, page: u32, size: u32) -> Result<Page<Customer>> {
        self.transport
            .get_json("/v1/customers/search", &search_query(filter, page, size))
            .await
    }

    pub async fn get_by_code(&self, code: &str) -> Result<Customer> {
        self.transport
            .get_json(&format!("/v1/customers/code/{code}"), &[])
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Customer> {
        self.transport
            .get_json(&format!("/v1/customers/{id}"), &[])
            .await
    }

    pub async fn create(&self, request: &CustomerRequest) -> Result<Customer> {
        self.transport.post_json("/v1/customers", request).await
    }

    pub async fn update(&self, id: i64, request: &CustomerRequest) -> Result<Customer> {
        self.transport
            .put_json(&format!("/v1/customers/{id}"), request)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.transport.delete(&format!("/v1/customers/{id}")).await
    }
}
