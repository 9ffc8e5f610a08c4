//! Client-side analytics over fetched sales, products and categories.
//!
//! Everything here is a pure transform of borrowed snapshots: no I/O, no
//! errors. Empty input yields empty series, or zero-filled ones for the
//! fixed-size outputs (hourly series, heatmap). Sale lines that cannot be
//! attributed to a category are counted rather than raised.
//!
//! # Example
//!
//! ```
//! use salesdesk_sdk::aggregator;
//! use salesdesk_sdk::models::Sale;
//!
//! let sales: Vec<Sale> = Vec::new();
//! assert!(aggregator::daily_revenue_series(&sales).is_empty());
//! assert_eq!(aggregator::hourly_revenue_series(&sales).len(), 24);
//! assert!(aggregator::build_heatmap_matrix(&sales).total().is_zero());
//! ```

pub mod catalog;
pub mod heatmap;
pub mod timestamp;

pub use catalog::{CatalogIndex, LineResolution};
pub use heatmap::Heatmap;
pub use timestamp::TimeBasis;

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    Category, CategoryBreakdown, CategoryRevenue, DailyRevenue, HourlyRevenue, Kpi, Product,
    ProductPerformance, Sale, TopProduct, UnresolvedLines,
};

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// Configurable entry point for the aggregation functions.
///
/// The default reads timestamps as recorded and emits days in first-seen
/// order; the free functions in this module use it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aggregator {
    basis: TimeBasis,
    chronological_days: bool,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the clock sale timestamps are bucketed on.
    pub fn time_basis(mut self, basis: TimeBasis) -> Self {
        self.basis = basis;
        self
    }

    /// Sort the daily series by date instead of first-seen order.
    pub fn chronological_days(mut self, chronological: bool) -> Self {
        self.chronological_days = chronological;
        self
    }

    /// Revenue per calendar date of `saleDate`.
    pub fn daily_revenue_series(&self, sales: &[Sale]) -> Vec<DailyRevenue> {
        let mut sums = OrderedSums::default();
        for sale in sales {
            sums.add(timestamp::day_key(&sale.sale_date, self.basis), sale.total_amount);
        }

        let mut series: Vec<DailyRevenue> = sums
            .into_entries()
            .into_iter()
            .map(|(date, revenue)| DailyRevenue { date, revenue })
            .collect();
        if self.chronological_days {
            series.sort_by(|a, b| a.date.cmp(&b.date));
        }
        series
    }

    /// Revenue per category name, resolving each line through its product.
    ///
    /// Lines with an unknown product or category are left out of `entries`
    /// and counted in `unresolved`.
    pub fn category_revenue_breakdown(
        &self,
        sales: &[Sale],
        products: &[Product],
        categories: &[Category],
    ) -> CategoryBreakdown {
        let index = CatalogIndex::new(products, categories);
        let mut sums = OrderedSums::default();
        let mut unresolved = UnresolvedLines::default();

        for line in sales.iter().flat_map(|s| s.lines.iter()) {
            match index.resolve(line) {
                LineResolution::Resolved { category, .. } => {
                    sums.add(category.name.clone(), line.line_total());
                }
                LineResolution::MissingProduct => unresolved.missing_product += 1,
                LineResolution::MissingCategory { .. } => unresolved.missing_category += 1,
            }
        }

        if unresolved.total() > 0 {
            debug!(
                missing_product = unresolved.missing_product,
                missing_category = unresolved.missing_category,
                "sale lines left out of category breakdown"
            );
        }

        CategoryBreakdown {
            entries: sums
                .into_entries()
                .into_iter()
                .map(|(category_name, total_revenue)| CategoryRevenue {
                    category_name,
                    total_revenue,
                })
                .collect(),
            unresolved,
        }
    }

    /// The `n` product titles with the most units sold, best first.
    ///
    /// Ties keep the order in which titles were first encountered.
    pub fn top_products(&self, sales: &[Sale], n: usize) -> Vec<TopProduct> {
        let mut sums: OrderedSums<u64> = OrderedSums::default();
        for line in sales.iter().flat_map(|s| s.lines.iter()) {
            sums.add(line.product_title.clone(), u64::from(line.quantity));
        }

        let mut ranked = sums.into_entries();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(n)
            .map(|(product_title, total_quantity)| TopProduct {
                product_title,
                total_quantity,
            })
            .collect()
    }

    /// Revenue per hour of day, always 24 entries labelled `"0:00"`..`"23:00"`.
    pub fn hourly_revenue_series(&self, sales: &[Sale]) -> Vec<HourlyRevenue> {
        let mut buckets = [Decimal::ZERO; heatmap::HOURS];
        for (sale, at) in self.placed(sales) {
            let bucket = &mut buckets[at.hour() as usize];
            *bucket = saturating_add(*bucket, sale.total_amount);
        }

        buckets
            .into_iter()
            .enumerate()
            .map(|(h, revenue)| HourlyRevenue {
                hour: format!("{h}:00"),
                revenue,
            })
            .collect()
    }

    /// Revenue per (day of week, hour of day); Sunday is row 0.
    pub fn build_heatmap_matrix(&self, sales: &[Sale]) -> Heatmap {
        let mut matrix = Heatmap::new();
        for (sale, at) in self.placed(sales) {
            let day = at.weekday().num_days_from_sunday() as usize;
            matrix.add(day, at.hour() as usize, sale.total_amount);
        }
        matrix
    }

    /// Dashboard summary numbers.
    ///
    /// `lowStockCount` counts products with `stock < low_stock_threshold`.
    pub fn kpi(&self, sales: &[Sale], products: &[Product], low_stock_threshold: i64) -> Kpi {
        let total_revenue = sales
            .iter()
            .fold(Decimal::ZERO, |acc, s| saturating_add(acc, s.total_amount));
        let total_sales = sales.len() as u64;
        let average_basket = if total_sales == 0 {
            Decimal::ZERO
        } else {
            total_revenue / Decimal::from(total_sales)
        };

        Kpi {
            total_revenue,
            total_sales,
            average_basket,
            low_stock_count: low_stock(products, low_stock_threshold).len() as u64,
        }
    }

    /// Units and revenue per product id, ordered by id.
    pub fn product_performance(&self, sales: &[Sale]) -> Vec<ProductPerformance> {
        let mut rows: BTreeMap<i64, ProductPerformance> = BTreeMap::new();
        for line in sales.iter().flat_map(|s| s.lines.iter()) {
            let row = rows
                .entry(line.product_id)
                .or_insert_with(|| ProductPerformance {
                    product_id: line.product_id,
                    title: line.product_title.clone(),
                    quantity: 0,
                    revenue: Decimal::ZERO,
                    unit_price: line.unit_price,
                });
            row.quantity = row.quantity.saturating_add(u64::from(line.quantity));
            row.revenue = saturating_add(row.revenue, line.line_total());
        }
        rows.into_values().collect()
    }

    /// Sales paired with their parsed wall-clock time; unparseable dates are skipped.
    fn placed<'s>(&self, sales: &'s [Sale]) -> impl Iterator<Item = (&'s Sale, NaiveDateTime)> + 's {
        let basis = self.basis;
        sales.iter().filter_map(move |sale| {
            let at = timestamp::wall_clock(&sale.sale_date, basis);
            if at.is_none() {
                debug!(sale_id = sale.id, sale_date = %sale.sale_date, "skipping sale with unparseable date");
            }
            at.map(|at| (sale, at))
        })
    }
}

// ---------------------------------------------------------------------------
// Free functions (default aggregator)
// ---------------------------------------------------------------------------

pub fn daily_revenue_series(sales: &[Sale]) -> Vec<DailyRevenue> {
    Aggregator::default().daily_revenue_series(sales)
}

pub fn category_revenue_breakdown(
    sales: &[Sale],
    products: &[Product],
    categories: &[Category],
) -> CategoryBreakdown {
    Aggregator::default().category_revenue_breakdown(sales, products, categories)
}

pub fn top_products(sales: &[Sale], n: usize) -> Vec<TopProduct> {
    Aggregator::default().top_products(sales, n)
}

pub fn hourly_revenue_series(sales: &[Sale]) -> Vec<HourlyRevenue> {
    Aggregator::default().hourly_revenue_series(sales)
}

pub fn build_heatmap_matrix(sales: &[Sale]) -> Heatmap {
    Aggregator::default().build_heatmap_matrix(sales)
}

pub fn kpi(sales: &[Sale], products: &[Product], low_stock_threshold: i64) -> Kpi {
    Aggregator::default().kpi(sales, products, low_stock_threshold)
}

pub fn product_performance(sales: &[Sale]) -> Vec<ProductPerformance> {
    Aggregator::default().product_performance(sales)
}

/// Products with `stock < threshold`, in input order.
pub fn low_stock(products: &[Product], threshold: i64) -> Vec<&Product> {
    products.iter().filter(|p| p.is_low_stock(threshold)).collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Add two amounts, clamping to `Decimal::MAX` or `Decimal::MIN` instead of
/// panicking when the exact sum is out of range.
pub fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        debug!(%a, %b, "revenue sum out of range, saturating");
        if b.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// Overflow-free accumulation for [`OrderedSums`].
trait Accumulate: Copy {
    fn accumulate(self, other: Self) -> Self;
}

impl Accumulate for Decimal {
    fn accumulate(self, other: Self) -> Self {
        saturating_add(self, other)
    }
}

impl Accumulate for u64 {
    fn accumulate(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

/// Keyed sums that remember the order keys were first added in.
struct OrderedSums<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedSums<V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<V: Accumulate> OrderedSums<V> {
    fn add(&mut self, key: String, value: V) {
        match self.index.get(&key) {
            Some(&i) => {
                let total = &mut self.entries[i].1;
                *total = total.accumulate(value);
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}
