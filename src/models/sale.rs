use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::aggregator::saturating_add;

// ---------------------------------------------------------------------------
// Sale: A recorded sale with its lines (query result)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    /// ISO timestamp or ISO date as delivered by the API, kept verbatim.
    pub sale_date: String,
    #[serde(default)]
    pub total_amount: Decimal,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "lignes", alias = "lines", default)]
    pub lines: Vec<SaleLine>,
}

impl Sale {
    /// Sum of `quantity * unitPrice` over all lines.
    pub fn lines_total(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |acc, l| saturating_add(acc, l.line_total()))
    }

    /// Whether `totalAmount` matches the sum of the line totals.
    ///
    /// The API does not guarantee this; callers decide what to do with a mismatch.
    pub fn is_consistent(&self) -> bool {
        self.lines_total() == self.total_amount
    }

    /// Total number of units sold in this sale.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

// ---------------------------------------------------------------------------
// SaleLine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: i64,
    #[serde(default)]
    pub product_title: String,
    pub quantity: u32,
    #[serde(default)]
    pub unit_price: Decimal,
}

impl SaleLine {
    /// `quantity * unitPrice`, clamped to the `Decimal` range.
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity)
            .checked_mul(self.unit_price)
            .unwrap_or(if self.unit_price.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            })
    }
}

// ---------------------------------------------------------------------------
// SaleRequest: Payload for POST /sales
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(rename = "lignes")]
    #[validate(length(min = 1, message = "Add at least one product"))]
    #[validate(nested)]
    pub lines: Vec<SaleLineRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineRequest {
    pub product_id: i64,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
}

// ---------------------------------------------------------------------------
// SaleExtra: Client-side details stored next to a created sale
// ---------------------------------------------------------------------------

/// Details the API does not keep (client name, cart snapshot), stored in the
/// session directory keyed by sale id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleExtra {
    pub client_name: String,
    pub cart: Vec<CartLine>,
    pub total: Decimal,
    pub date: String,
}

/// A line of the cart used to build a sale, with its stock ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i64,
    pub product_title: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    #[serde(default)]
    pub max_stock: i64,
}

impl From<&SaleLine> for CartLine {
    fn from(line: &SaleLine) -> Self {
        Self {
            product_id: line.product_id,
            product_title: line.product_title.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            line_total: line.line_total(),
            max_stock: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// SaleDetails: A sale merged with its stored extras
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetails {
    pub sale: Sale,
    pub client_name: String,
    pub cart: Vec<CartLine>,
    pub total: Decimal,
    /// `true` when the extras came from the session store rather than defaults.
    pub has_extras: bool,
}

impl SaleDetails {
    /// Merge a sale with its stored extras, or fall back to the sale's own data.
    pub fn merge(sale: Sale, extra: Option<SaleExtra>) -> Self {
        match extra {
            Some(extra) => Self {
                sale,
                client_name: extra.client_name,
                cart: extra.cart,
                total: extra.total,
                has_extras: true,
            },
            None => {
                let cart = sale.lines.iter().map(CartLine::from).collect();
                let total = sale.total_amount;
                Self {
                    sale,
                    client_name: crate::config::WALK_IN_CUSTOMER.to_string(),
                    cart,
                    total,
                    has_extras: false,
                }
            }
        }
    }

    pub fn item_count(&self) -> u64 {
        self.cart.iter().map(|l| u64::from(l.quantity)).sum()
    }
}
