//! Revenue and customer reports under `/reports`.

use super::Transport;
use crate::error::Result;
use crate::models::{
    MonthlyRevenueReport, MonthlyRevenueRequest, NewCustomersReport, NewCustomersRequest,
    OldestProducts, TopRevenueProducts,
};

pub struct Reports {
    transport: Transport,
}

impl Reports {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Twelve months of revenue ending at `reference_date` (YYYY-MM-DD)
    pub async fn monthly_revenue(&self, reference_date: &str) -> Result<MonthlyRevenueReport> {
        let request = MonthlyRevenueRequest {
            reference_date: reference_date.to_string(),
        };
        self.transport
            .post_json("/reports/monthly-revenue", &request)
            .await
    }

    pub async fn top_revenue_products(&self) -> Result<TopRevenueProducts> {
        self.transport
            .get_json("/reports/top-revenue-products", &[])
            .await
    }

    pub async fn oldest_products(&self) -> Result<OldestProducts> {
        self.transport.get_json("/reports/oldest-products", &[]).await
    }

    pub async fn new_customers(&self, year: i32) -> Result<NewCustomersReport> {
        let request = NewCustomersRequest { year };
        self.transport
            .post_json("/reports/new-customers", &request)
            .await
    }
}
