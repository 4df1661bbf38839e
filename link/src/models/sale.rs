use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub code: String,
    pub customer_code: String,
    pub customer_name: String,
    pub seller_code: String,
    pub seller_name: String,
    /// Payment method code (DINHEIRO, PIX, CARTAO_CREDITO, ...)
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    pub amount_paid: f64,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub change: f64,
    pub items: Vec<SaleItem>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: i64,
    pub product_code: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub customer_code: String,
    pub customer_name: String,
    pub seller_code: String,
    pub seller_name: String,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    pub items: Vec<SaleItemRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemRequest {
    pub product_code: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
}
