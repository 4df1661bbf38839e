//! Wire models for the sales backend API.
//!
//! Field names follow the backend's JSON conventions: entity payloads are
//! camelCase, the login token fields are snake_case.

mod customer;
mod dashboard;
mod page;
mod product;
mod report;
mod sale;
mod user;

pub use customer::{Address, Customer, CustomerRequest};
pub use dashboard::{ChartPoint, DashboardChart, DashboardStats, RecentSale, RecentSales};
pub use page::Page;
pub use product::{Product, ProductRequest};
pub use report::{
    MonthlyRevenueData, MonthlyRevenueReport, MonthlyRevenueRequest, NewCustomersMonth,
    NewCustomersReport, NewCustomersRequest, OldestProduct, OldestProducts, TopRevenueProduct,
    TopRevenueProducts,
};
pub use sale::{Sale, SaleItem, SaleItemRequest, SaleRequest};
pub use user::{LoginRequest, LoginResponse, MessageResponse, User};
