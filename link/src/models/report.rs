use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenueRequest {
    /// Reference date, YYYY-MM-DD
    pub reference_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenueData {
    pub month: u32,
    pub year: i32,
    pub month_name: String,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenueReport {
    pub monthly_data: Vec<MonthlyRevenueData>,
    pub total_revenue: f64,
    pub total_tax: f64,
    pub grand_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRevenueProduct {
    pub product_code: String,
    pub product_name: String,
    pub sale_price: f64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopRevenueProducts {
    pub products: Vec<TopRevenueProduct>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OldestProduct {
    pub name: String,
    pub weight: f64,
    pub registration_date: String,
    pub purchase_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OldestProducts {
    pub products: Vec<OldestProduct>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomersRequest {
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomersMonth {
    pub month: u32,
    pub month_name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomersReport {
    pub year: i32,
    pub total_customers: u64,
    pub customers_by_month: Vec<NewCustomersMonth>,
}
