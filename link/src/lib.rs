//! Client library for the sales backend API.
//!
//! Provides a typed HTTP client ([`SalesClient`]) plus one thin resource
//! service per entity (customers, products, sales, dashboard, reports).
//! All errors are mapped into the [`SalesLinkError`] taxonomy so callers
//! can surface a single human-readable message per failed request.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod resources;

pub use auth::{token_expiry, token_is_live, AuthProvider};
pub use client::{SalesClient, SalesClientBuilder};
pub use error::{Result, SalesLinkError};
pub use models::{
    Address, Customer, CustomerRequest, DashboardChart, DashboardStats, LoginRequest,
    LoginResponse, MessageResponse, MonthlyRevenueReport, NewCustomersReport, OldestProducts,
    Page, Product, ProductRequest, RecentSales, Sale, SaleItem, SaleItemRequest, SaleRequest,
    TopRevenueProducts, User,
};
