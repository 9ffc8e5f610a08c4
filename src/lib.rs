//! SalesDesk SDK for Rust.
//!
//! A typed client for the SalesDesk sales-management REST API, plus the
//! client-side analytics the dashboards are built from: daily and hourly
//! revenue, category breakdowns, best sellers and a day-of-week by hour
//! heatmap.
//!
//! # Quick start
//!
//! ```no_run
//! use salesdesk_sdk::SalesDeskSdk;
//!
//! let sdk = SalesDeskSdk::builder()
//!     .base_url("http://localhost:8080/api")
//!     .build()
//!     .unwrap();
//!
//! sdk.auth().login("admin@shop.test", "secret").unwrap();
//! let overview = sdk.analytics().overview(5).unwrap();
//! println!("revenue: {}", overview.kpi.total_revenue);
//! ```

pub mod aggregator;
#[cfg(feature = "async")]
pub mod async_client;
pub mod cart;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod queries;
pub mod router;
pub mod session;
pub mod snapshot;
pub mod validation;

pub use aggregator::{Aggregator, Heatmap, TimeBasis};
#[cfg(feature = "async")]
pub use async_client::AsyncSalesDeskSdk;
pub use cart::{Cart, CartError};
pub use client::ApiClient;
pub use error::{Result, SalesDeskError};
pub use router::{Access, Route};
pub use session::{Session, SessionStore};
pub use snapshot::Snapshot;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// SalesDeskSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`SalesDeskSdk`] instance.
///
/// Use [`SalesDeskSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](SalesDeskSdkBuilder::build) to create the SDK.
#[derive(Debug, Clone)]
pub struct SalesDeskSdkBuilder {
    base_url: Option<String>,
    session_dir: Option<PathBuf>,
    timeout: Duration,
    low_stock_threshold: i64,
    aggregator: Aggregator,
}

impl Default for SalesDeskSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            session_dir: None,
            timeout: config::DEFAULT_TIMEOUT,
            low_stock_threshold: config::DEFAULT_LOW_STOCK_THRESHOLD,
            aggregator: Aggregator::default(),
        }
    }
}

impl SalesDeskSdkBuilder {
    /// Set the API base URL, e.g. `http://localhost:8080/api`.
    ///
    /// If not set, `SALESDESK_API_URL` is read, falling back to
    /// [`config::DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the directory holding the session user and sale extras.
    ///
    /// If not set, `SALESDESK_SESSION_DIR` is read, falling back to the
    /// platform data directory (e.g. `~/.local/share/salesdesk-sdk` on Linux).
    pub fn session_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.session_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Products with stock strictly below this count as low stock. Defaults to 5.
    pub fn low_stock_threshold(mut self, threshold: i64) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    /// Aggregation settings used by [`SalesDeskSdk::analytics`].
    pub fn aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Build the SDK, opening the session store and loading any saved user.
    ///
    /// Does not contact the API.
    pub fn build(self) -> Result<SalesDeskSdk> {
        let store = SessionStore::new(self.session_dir)?;
        let base_url = self.base_url.unwrap_or_else(config::base_url_from_env);
        let client = ApiClient::new(base_url, self.timeout, store)?;
        Ok(SalesDeskSdk {
            client,
            low_stock_threshold: self.low_stock_threshold,
            aggregator: self.aggregator,
        })
    }
}

// ---------------------------------------------------------------------------
// SalesDeskSdk
// ---------------------------------------------------------------------------

/// The main entry point for the SalesDesk SDK.
///
/// Owns an [`ApiClient`] (HTTP client plus session) and exposes resource
/// query interfaces as lightweight borrowing wrappers. The SDK is
/// `Send + Sync` and can be shared between threads behind an `Arc`.
pub struct SalesDeskSdk {
    client: ApiClient,
    low_stock_threshold: i64,
    aggregator: Aggregator,
}

impl SalesDeskSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> SalesDeskSdkBuilder {
        SalesDeskSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    pub fn categories(&self) -> queries::CategoryQuery<'_> {
        queries::CategoryQuery::new(&self.client)
    }

    pub fn products(&self) -> queries::ProductQuery<'_> {
        queries::ProductQuery::new(&self.client)
    }

    /// Access the sale query interface.
    ///
    /// Creating a sale from a [`Cart`] also stores its client-side extras in
    /// the session directory.
    pub fn sales(&self) -> queries::SaleQuery<'_> {
        queries::SaleQuery::new(&self.client)
    }

    pub fn users(&self) -> queries::UserQuery<'_> {
        queries::UserQuery::new(&self.client)
    }

    pub fn auth(&self) -> queries::AuthQuery<'_> {
        queries::AuthQuery::new(&self.client)
    }

    /// Access the analytics interface: remote endpoints and the dashboard
    /// overview.
    pub fn analytics(&self) -> queries::AnalyticsQuery<'_> {
        queries::AnalyticsQuery::new(&self.client, self.aggregator, self.low_stock_threshold)
    }

    // -- Snapshot and session ----------------------------------------------

    /// Fetch sales, products and categories in one go for local aggregation.
    pub fn snapshot(&self) -> Result<Snapshot> {
        Snapshot::fetch(&self.client)
    }

    pub fn aggregator(&self) -> Aggregator {
        self.aggregator
    }

    pub fn low_stock_threshold(&self) -> i64 {
        self.low_stock_threshold
    }

    /// A copy of the current session.
    pub fn session(&self) -> Session {
        self.client.session()
    }

    /// Where the logged-in user should land.
    pub fn route(&self) -> Route {
        router::route_for(self.client.current_user().as_ref())
    }

    /// Check a path against the logged-in user's role.
    pub fn authorize(&self, path: &str) -> Access {
        router::authorize(self.client.current_user().as_ref(), path)
    }

    /// Return a reference to the underlying [`ApiClient`] for advanced usage.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for SalesDeskSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let user = self
            .client
            .current_user()
            .map(|u| format!("{} ({})", u.username, u.role))
            .unwrap_or_else(|| "none".to_string());
        write!(
            f,
            "SalesDeskSdk(base_url={}, session_dir={}, user={})",
            self.client.base_url(),
            self.client.store().dir.display(),
            user
        )
    }
}
