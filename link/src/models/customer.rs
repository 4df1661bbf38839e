use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub zip_code: String,
    pub street: String,
    pub number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub code: String,
    pub full_name: String,
    pub mother_name: String,
    pub cpf: String,
    pub rg: String,
    pub address: Address,
    pub birth_date: String,
    pub cell_phone: String,
    pub email: String,
    pub created_at: String,
}

/// Create/update payload; code and timestamps are server-assigned
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub full_name: String,
    pub mother_name: String,
    pub cpf: String,
    pub rg: String,
    pub address: Address,
    pub birth_date: String,
    pub cell_phone: String,
    pub email: String,
}
