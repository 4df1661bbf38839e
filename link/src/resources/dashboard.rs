//! Dashboard read-only endpoints under `/v1/dashboard`.

use super::Transport;
use crate::error::Result;
use crate::models::{DashboardChart, DashboardStats, RecentSales};

pub struct Dashboard {
    transport: Transport,
}

impl Dashboard {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        self.transport.get_json("/v1/dashboard/stats", &[]).await
    }

    /// `range` is a backend keyword: "week", "month", "year"
    pub async fn chart_data(&self, range: &str) -> Result<DashboardChart> {
        self.transport
            .get_json(
                "/v1/dashboard/chart-data",
                &[("range", range.to_string())],
            )
            .await
    }

    pub async fn recent_sales(&self, limit: u32) -> Result<RecentSales> {
        self.transport
            .get_json(
                "/v1/dashboard/recent-sales",
                &[("limit", limit.to_string())],
            )
            .await
    }
}
