use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub asin: Option<String>,
    pub title: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub stock: i64,
    pub category_id: Option<i64>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub rank: Option<i64>,
}

impl Product {
    /// Whether the product's stock is strictly below `threshold`.
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.stock < threshold
    }
}

// ---------------------------------------------------------------------------
// ProductRequest: Payload for POST/PUT /products
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asin: Option<String>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(custom(function = "crate::validation::non_negative_price"))]
    pub price: Decimal,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i64,
    #[validate(required(message = "Category is required"))]
    pub category_id: Option<i64>,
}
