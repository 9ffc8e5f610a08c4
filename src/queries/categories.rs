//! Category resource: `/categories`.

use validator::Validate;

use crate::client::ApiClient;
use crate::config;
use crate::error::Result;
use crate::models::{Category, CategoryRequest, Page};
use crate::queries::PageParams;

// ---------------------------------------------------------------------------
// CategoryQuery
// ---------------------------------------------------------------------------

/// Query interface for product categories.
pub struct CategoryQuery<'a> {
    client: &'a ApiClient,
}

impl<'a> CategoryQuery<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<Category>> {
        self.client.get(config::CATEGORIES)
    }

    /// One page of categories, sorted by `sort_by` (defaults to `name`).
    pub fn page(&self, page: u32, size: u32, sort_by: Option<&str>) -> Result<Page<Category>> {
        let params = PageParams {
            page,
            size,
            sort_by: Some(sort_by.unwrap_or("name")),
        };
        self.client
            .get_query(&format!("{}/page", config::CATEGORIES), &params)
    }

    pub fn get(&self, id: i64) -> Result<Category> {
        self.client.get(&format!("{}/{}", config::CATEGORIES, id))
    }

    pub fn create(&self, request: &CategoryRequest) -> Result<Category> {
        request.validate()?;
        self.client.post(config::CATEGORIES, request)
    }

    pub fn update(&self, id: i64, request: &CategoryRequest) -> Result<Category> {
        request.validate()?;
        self.client
            .put(&format!("{}/{}", config::CATEGORIES, id), request)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("{}/{}", config::CATEGORIES, id))
    }
}
