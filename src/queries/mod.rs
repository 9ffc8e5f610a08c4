//! Query modules for the SalesDesk API.
//!
//! Each module provides a query struct that borrows the SDK's
//! [`ApiClient`](crate::client::ApiClient) and exposes typed methods
//! returning `Result<T>`.

pub mod analytics;
pub mod auth;
pub mod categories;
pub mod products;
pub mod sales;
pub mod users;

pub use analytics::{AnalyticsQuery, Overview, OverviewSource};
pub use auth::AuthQuery;
pub use categories::CategoryQuery;
pub use products::ProductQuery;
pub use sales::SaleQuery;
pub use users::UserQuery;

use serde::Serialize;

/// Query string for the `/…/page` endpoints.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams<'s> {
    pub page: u32,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<&'s str>,
}
