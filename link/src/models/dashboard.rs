use serde::{Deserialize, Serialize};

/// Headline figures for the dashboard screen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_sales: i64,
    pub total_revenue: f64,
    pub total_customers: i64,
    pub total_products: i64,
    pub sales_variation: f64,
    pub revenue_variation: f64,
    pub customers_variation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub label: String,
    pub short_label: String,
    pub date: String,
    pub sales_count: i64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardChart {
    pub chart_data: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSale {
    pub id: i64,
    pub code: String,
    pub customer_name: String,
    pub product_name: String,
    pub total_amount: f64,
    pub sale_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentSales {
    pub sales: Vec<RecentSale>,
}
