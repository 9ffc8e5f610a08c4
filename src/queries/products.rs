//! Product resource: `/products`.

use validator::Validate;

use crate::client::ApiClient;
use crate::config;
use crate::error::Result;
use crate::models::{Page, Product, ProductRequest};
use crate::queries::PageParams;

/// Query interface for products.
pub struct ProductQuery<'a> {
    client: &'a ApiClient,
}

impl<'a> ProductQuery<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<Product>> {
        self.client.get(config::PRODUCTS)
    }

    /// One page of products, sorted by `sort_by` (defaults to `title`).
    pub fn page(&self, page: u32, size: u32, sort_by: Option<&str>) -> Result<Page<Product>> {
        let params = PageParams {
            page,
            size,
            sort_by: Some(sort_by.unwrap_or("title")),
        };
        self.client
            .get_query(&format!("{}/page", config::PRODUCTS), &params)
    }

    pub fn get(&self, id: i64) -> Result<Product> {
        self.client.get(&format!("{}/{}", config::PRODUCTS, id))
    }

    /// Products of one category, filtered client-side from the full list.
    pub fn by_category(&self, category_id: i64) -> Result<Vec<Product>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| p.category_id == Some(category_id))
            .collect())
    }

    /// Case-insensitive title search over the full list.
    pub fn search(&self, term: &str) -> Result<Vec<Product>> {
        let needle = term.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .collect())
    }

    pub fn create(&self, request: &ProductRequest) -> Result<Product> {
        request.validate()?;
        self.client.post(config::PRODUCTS, request)
    }

    pub fn update(&self, id: i64, request: &ProductRequest) -> Result<Product> {
        request.validate()?;
        self.client
            .put(&format!("{}/{}", config::PRODUCTS, id), request)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("{}/{}", config::PRODUCTS, id))
    }
}
