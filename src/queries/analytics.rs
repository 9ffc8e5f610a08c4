//! Analytics: the backend's `/analytics/*` endpoints and a dashboard overview
//! that falls back to client-side aggregation.

use std::thread;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::aggregator::{Aggregator, Heatmap};
use crate::client::ApiClient;
use crate::config;
use crate::error::Result;
use crate::models::{
    CategoryRevenue, DailyRevenue, HourlyRevenue, Kpi, MonthlyRevenue, Sale, TopProduct,
    UnresolvedLines,
};
use crate::snapshot::{join, Snapshot};

/// Where an [`Overview`]'s figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverviewSource {
    Remote,
    Local,
}

/// Everything the analytics dashboard shows.
///
/// The hourly series and heatmap are always computed client-side: the API has
/// no endpoint for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub source: OverviewSource,
    pub kpi: Kpi,
    pub daily: Vec<DailyRevenue>,
    pub categories: Vec<CategoryRevenue>,
    pub best_sellers: Vec<TopProduct>,
    pub hourly: Vec<HourlyRevenue>,
    pub heatmap: Heatmap,
    /// Only filled by local computation.
    pub unresolved: UnresolvedLines,
}

#[derive(Serialize)]
struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Serialize)]
struct Limit {
    limit: usize,
}

pub struct AnalyticsQuery<'a> {
    client: &'a ApiClient,
    aggregator: Aggregator,
    low_stock_threshold: i64,
}

impl<'a> AnalyticsQuery<'a> {
    pub fn new(client: &'a ApiClient, aggregator: Aggregator, low_stock_threshold: i64) -> Self {
        Self {
            client,
            aggregator,
            low_stock_threshold,
        }
    }

    // -- Remote endpoints --------------------------------------------------

    pub fn kpi(&self) -> Result<Kpi> {
        self.client.get(config::ANALYTICS_KPI)
    }

    pub fn monthly_sales(&self) -> Result<Vec<MonthlyRevenue>> {
        self.client.get(config::ANALYTICS_MONTHLY)
    }

    /// Daily revenue between `start` and `end`, both inclusive.
    pub fn daily_sales(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyRevenue>> {
        self.client
            .get_query(config::ANALYTICS_DAILY, &DateRange { start, end })
    }

    pub fn best_sellers(&self, limit: usize) -> Result<Vec<TopProduct>> {
        self.client
            .get_query(config::ANALYTICS_BEST_SELLERS, &Limit { limit })
    }

    pub fn category_stats(&self) -> Result<Vec<CategoryRevenue>> {
        self.client.get(config::ANALYTICS_CATEGORIES)
    }

    // The shapes of these four are not fixed by the API, so they stay untyped.

    pub fn slow_movers(&self) -> Result<serde_json::Value> {
        self.client.get(config::ANALYTICS_SLOW_MOVERS)
    }

    pub fn low_stock(&self) -> Result<serde_json::Value> {
        self.client.get(config::ANALYTICS_LOW_STOCK)
    }

    pub fn current_month_evolution(&self) -> Result<serde_json::Value> {
        self.client.get(config::ANALYTICS_EVOLUTION)
    }

    pub fn basket_stats(&self) -> Result<serde_json::Value> {
        self.client.get(config::ANALYTICS_BASKET)
    }

    // -- Overview ----------------------------------------------------------

    /// Dashboard figures, from the API when it can provide them.
    ///
    /// The remote calls run in parallel. If any of them fails, the whole
    /// overview is recomputed locally from a [`Snapshot`]. Errors from the
    /// snapshot itself are returned.
    pub fn overview(&self, top_n: usize) -> Result<Overview> {
        match self.remote_overview(top_n) {
            Ok(overview) => Ok(overview),
            Err(e) => {
                warn!(error = %e, "analytics endpoints failed, computing overview locally");
                let snapshot = Snapshot::fetch(self.client)?;
                Ok(self.local_overview(&snapshot, top_n))
            }
        }
    }

    /// Compute the overview from an already fetched snapshot.
    pub fn local_overview(&self, snapshot: &Snapshot, top_n: usize) -> Overview {
        let agg = &self.aggregator;
        let breakdown = agg.category_revenue_breakdown(
            &snapshot.sales,
            &snapshot.products,
            &snapshot.categories,
        );
        Overview {
            source: OverviewSource::Local,
            kpi: agg.kpi(&snapshot.sales, &snapshot.products, self.low_stock_threshold),
            daily: agg.daily_revenue_series(&snapshot.sales),
            categories: breakdown.entries,
            best_sellers: agg.top_products(&snapshot.sales, top_n),
            hourly: agg.hourly_revenue_series(&snapshot.sales),
            heatmap: agg.build_heatmap_matrix(&snapshot.sales),
            unresolved: breakdown.unresolved,
        }
    }

    fn remote_overview(&self, top_n: usize) -> Result<Overview> {
        let (kpi, categories, best_sellers, sales) = thread::scope(|s| {
            let kpi = s.spawn(|| self.kpi());
            let categories = s.spawn(|| self.category_stats());
            let best_sellers = s.spawn(|| self.best_sellers(top_n));
            let sales = s.spawn(|| self.client.get::<Vec<Sale>>(config::SALES));
            (join(kpi), join(categories), join(best_sellers), join(sales))
        });
        let (kpi, categories, best_sellers, sales) = (kpi?, categories?, best_sellers?, sales?);
        let daily = self.aggregator.daily_revenue_series(&sales);
        info!(sales = sales.len(), "overview loaded from analytics endpoints");

        Ok(Overview {
            source: OverviewSource::Remote,
            kpi,
            daily,
            categories,
            best_sellers,
            hourly: self.aggregator.hourly_revenue_series(&sales),
            heatmap: self.aggregator.build_heatmap_matrix(&sales),
            unresolved: UnresolvedLines::default(),
        })
    }
}
