use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregator::saturating_add;

// ---------------------------------------------------------------------------
// Series points
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    /// ISO calendar date (`YYYY-MM-DD`).
    pub date: String,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRevenue {
    /// Hour label, `"0:00"` through `"23:00"`.
    pub hour: String,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    #[serde(alias = "totalRevenue")]
    pub revenue: Decimal,
}

// ---------------------------------------------------------------------------
// Rankings and breakdowns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRevenue {
    pub category_name: String,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_title: String,
    pub total_quantity: u64,
}

/// Sale lines that could not be attributed to a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedLines {
    /// Lines whose `productId` matches no known product.
    pub missing_product: usize,
    /// Lines whose product has no category, or an unknown one.
    pub missing_category: usize,
}

impl UnresolvedLines {
    pub fn total(&self) -> usize {
        self.missing_product + self.missing_category
    }
}

/// Revenue per category plus the count of lines that were left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub entries: Vec<CategoryRevenue>,
    pub unresolved: UnresolvedLines,
}

impl CategoryBreakdown {
    pub fn total_revenue(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |acc, e| saturating_add(acc, e.total_revenue))
    }

    /// Share of each category in the total, as `(name, fraction)`.
    ///
    /// Returns an empty vector when total revenue is zero.
    pub fn shares(&self) -> Vec<(String, f64)> {
        let total = self.total_revenue();
        if total.is_zero() {
            return Vec::new();
        }
        self.entries
            .iter()
            .map(|e| {
                let share = (e.total_revenue / total).to_f64().unwrap_or(0.0);
                (e.category_name.clone(), share)
            })
            .collect()
    }
}

/// Aggregated view of one product across all sale lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPerformance {
    pub product_id: i64,
    pub title: String,
    pub quantity: u64,
    pub revenue: Decimal,
    /// Unit price of the first line seen for this product.
    pub unit_price: Decimal,
}

// ---------------------------------------------------------------------------
// Kpi: Dashboard summary numbers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub total_revenue: Decimal,
    pub total_sales: u64,
    pub average_basket: Decimal,
    pub low_stock_count: u64,
}
