//! Async wrapper around [`SalesDeskSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use salesdesk_sdk::AsyncSalesDeskSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncSalesDeskSdk::builder().build().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let products = sdk.run(|s| s.products().list()).await.unwrap();
//!
//!     // Sales, products and categories fetched concurrently
//!     let snapshot = sdk.snapshot().await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::aggregator::Aggregator;
use crate::error::{Result, SalesDeskError};
use crate::models::{Category, Product, Sale};
use crate::queries::Overview;
use crate::snapshot::Snapshot;
use crate::{config, SalesDeskSdk};

// ---------------------------------------------------------------------------
// AsyncSalesDeskSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncSalesDeskSdk`] instance.
pub struct AsyncSalesDeskSdkBuilder {
    base_url: Option<String>,
    session_dir: Option<PathBuf>,
    timeout: Duration,
    low_stock_threshold: i64,
    aggregator: Aggregator,
}

impl Default for AsyncSalesDeskSdkBuilder {
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

impl AsyncSalesDeskSdkBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn session_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.session_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn low_stock_threshold(mut self, threshold: i64) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    /// Aggregator used for locally computed analytics.
    pub fn aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Build the async SDK. Opening the session store runs on the blocking pool.
    pub async fn build(self) -> Result<AsyncSalesDeskSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = SalesDeskSdk::builder()
                .timeout(self.timeout)
                .low_stock_threshold(self.low_stock_threshold)
                .aggregator(self.aggregator);
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(dir) = self.session_dir {
                builder = builder.session_dir(dir);
            }
            let sdk = builder.build()?;
            Ok(AsyncSalesDeskSdk {
                inner: Arc::new(sdk),
            })
        })
        .await
        .map_err(join_error)?
    }
}

// ---------------------------------------------------------------------------
// AsyncSalesDeskSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`SalesDeskSdk`].
///
/// The SDK is `Sync`, so it is shared behind an [`Arc`] without a lock and
/// several operations may run at once.
#[derive(Clone)]
pub struct AsyncSalesDeskSdk {
    inner: Arc<SalesDeskSdk>,
}

impl AsyncSalesDeskSdk {
    pub fn builder() -> AsyncSalesDeskSdkBuilder {
        AsyncSalesDeskSdkBuilder::default()
    }

    /// Wrap an already built SDK.
    pub fn from_sdk(sdk: SalesDeskSdk) -> Self {
        Self {
            inner: Arc::new(sdk),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// ```no_run
    /// # use salesdesk_sdk::AsyncSalesDeskSdk;
    /// # async fn example() -> salesdesk_sdk::Result<()> {
    /// # let sdk = AsyncSalesDeskSdk::builder().build().await?;
    /// let user = sdk.run(|s| s.auth().login("seller@shop.test", "secret")).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&SalesDeskSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(join_error)?
    }

    /// Fetch sales, products and categories concurrently.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let (sales, products, categories) = tokio::try_join!(
            self.run(|s| s.client().get::<Vec<Sale>>(config::SALES)),
            self.run(|s| s.client().get::<Vec<Product>>(config::PRODUCTS)),
            self.run(|s| s.client().get::<Vec<Category>>(config::CATEGORIES)),
        )?;
        Ok(Snapshot {
            sales,
            products,
            categories,
        })
    }

    pub async fn overview(&self, top_n: usize) -> Result<Overview> {
        self.run(move |s| s.analytics().overview(top_n)).await
    }

    /// Borrow the wrapped SDK for sync calls.
    pub fn sdk(&self) -> &SalesDeskSdk {
        &self.inner
    }
}

fn join_error(e: tokio::task::JoinError) -> SalesDeskError {
    SalesDeskError::InvalidArgument(format!("Task join error: {e}"))
}
