//! Sale resource: `/sales`, plus the client-side extras kept per sale.

use tracing::{info, warn};
use validator::Validate;

use crate::cart::Cart;
use crate::client::ApiClient;
use crate::config;
use crate::error::{Result, SalesDeskError};
use crate::models::{Page, Sale, SaleDetails, SaleExtra, SaleRequest};
use crate::queries::PageParams;

/// Query interface for sales.
pub struct SaleQuery<'a> {
    client: &'a ApiClient,
}

impl<'a> SaleQuery<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<Sale>> {
        self.client.get(config::SALES)
    }

    pub fn page(&self, page: u32, size: u32) -> Result<Page<Sale>> {
        let params = PageParams {
            page,
            size,
            sort_by: None,
        };
        self.client
            .get_query(&format!("{}/page", config::SALES), &params)
    }

    pub fn get(&self, id: i64) -> Result<Sale> {
        self.client.get(&format!("{}/{}", config::SALES, id))
    }

    /// A sale merged with the client name and cart stored when it was created.
    ///
    /// Without stored extras the client is `Walk-in Customer`, the cart is
    /// the sale's own lines and the total is `totalAmount`.
    pub fn details(&self, id: i64) -> Result<SaleDetails> {
        let sale = self.get(id)?;
        let extra = self.client.store().load_sale_extra(id);
        Ok(SaleDetails::merge(sale, extra))
    }

    /// Submit a raw sale request.
    pub fn create_request(&self, request: &SaleRequest) -> Result<Sale> {
        request.validate()?;
        self.client.post(config::SALES, request)
    }

    /// Submit the cart as a sale for the logged-in user and keep its extras.
    ///
    /// Requires a logged-in user whose role may sell. The extras are a local
    /// convenience; failing to store them is logged, not returned.
    pub fn create(&self, cart: &Cart, client_name: Option<&str>) -> Result<Sale> {
        let user = self
            .client
            .current_user()
            .ok_or_else(|| SalesDeskError::Unauthorized("Please login again".into()))?;
        if !user.role.can_sell() {
            return Err(SalesDeskError::InvalidArgument(format!(
                "role {} is not allowed to create sales",
                user.role
            )));
        }

        let request = cart.to_request(user.id, client_name)?;
        let sale = self.create_request(&request)?;
        info!(sale_id = sale.id, total = %sale.total_amount, "sale created");

        let extra = SaleExtra {
            client_name: request
                .client_name
                .clone()
                .unwrap_or_else(|| config::WALK_IN_CUSTOMER.to_string()),
            cart: cart.lines().to_vec(),
            total: cart.total(),
            date: chrono::Utc::now().to_rfc3339(),
        };
        if let Err(e) = self.client.store().save_sale_extra(sale.id, &extra) {
            warn!(sale_id = sale.id, error = %e, "could not store sale extras");
        }
        Ok(sale)
    }

    pub fn cancel(&self, id: i64) -> Result<Sale> {
        self.client
            .post_empty(&format!("{}/{}/cancel", config::SALES, id))
    }

    /// Delete a sale and its stored extras.
    pub fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("{}/{}", config::SALES, id))?;
        self.client.store().remove_sale_extra(id)
    }
}
