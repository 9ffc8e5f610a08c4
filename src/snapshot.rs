//! A consistent set of sales, products and categories to aggregate over.

use std::thread;

use tracing::debug;

use crate::client::ApiClient;
use crate::config;
use crate::error::{Result, SalesDeskError};
use crate::models::{Category, Product, Sale};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub sales: Vec<Sale>,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

impl Snapshot {
    /// Fetch the three collections in parallel.
    ///
    /// Fails with the first error encountered, in the order sales, products,
    /// categories; nothing is partially returned.
    pub fn fetch(client: &ApiClient) -> Result<Self> {
        let (sales, products, categories) = thread::scope(|s| {
            let sales = s.spawn(|| client.get::<Vec<Sale>>(config::SALES));
            let products = s.spawn(|| client.get::<Vec<Product>>(config::PRODUCTS));
            let categories = s.spawn(|| client.get::<Vec<Category>>(config::CATEGORIES));
            (join(sales), join(products), join(categories))
        });

        let snapshot = Self {
            sales: sales?,
            products: products?,
            categories: categories?,
        };
        debug!(
            sales = snapshot.sales.len(),
            products = snapshot.products.len(),
            categories = snapshot.categories.len(),
            "snapshot fetched"
        );
        Ok(snapshot)
    }
}

pub(crate) fn join<T>(handle: thread::ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
    handle
        .join()
        .map_err(|_| SalesDeskError::InvalidArgument("fetch thread panicked".into()))?
}
