//! Sale cart: collects products and quantities before a sale is submitted.

use rust_decimal::Decimal;

use crate::models::{CartLine, Product, SaleLineRequest, SaleRequest};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Not enough stock available for product {product_id}: requested {requested}, in stock {available}")]
    NotEnoughStock {
        product_id: i64,
        requested: u32,
        available: i64,
    },

    #[error("Product {0} is already in the sale")]
    Duplicate(i64),

    #[error("Product {0} is not in the sale")]
    NotInCart(i64),

    #[error("Add at least one product")]
    Empty,
}

/// Lines of a sale being built, one per product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product at its current price.
    ///
    /// Fails if `quantity` is zero, exceeds the product's stock, or the
    /// product is already in the cart.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        if i64::from(quantity) > product.stock {
            return Err(CartError::NotEnoughStock {
                product_id: product.id,
                requested: quantity,
                available: product.stock,
            });
        }
        if self.contains(product.id) {
            return Err(CartError::Duplicate(product.id));
        }

        self.lines.push(CartLine {
            product_id: product.id,
            product_title: product.title.clone(),
            quantity,
            unit_price: product.price,
            line_total: product.price * Decimal::from(quantity),
            max_stock: product.stock,
        });
        Ok(())
    }

    /// Change a line's quantity, keeping it within the stock seen at add time.
    pub fn update_quantity(&mut self, product_id: i64, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        if i64::from(quantity) > line.max_stock {
            return Err(CartError::NotEnoughStock {
                product_id,
                requested: quantity,
                available: line.max_stock,
            });
        }
        line.quantity = quantity;
        line.line_total = line.unit_price * Decimal::from(quantity);
        Ok(())
    }

    /// Drop a product's line. Returns `false` if it was not in the cart.
    pub fn remove(&mut self, product_id: i64) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    pub fn contains(&self, product_id: i64) -> bool {
        self.lines.iter().any(|l| l.product_id == product_id)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|l| l.line_total).sum()
    }

    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Build the API payload. Prices are not sent; the backend applies its own.
    pub fn to_request(&self, user_id: i64, client_name: Option<&str>) -> Result<SaleRequest, CartError> {
        if self.is_empty() {
            return Err(CartError::Empty);
        }
        Ok(SaleRequest {
            user_id,
            client_name: client_name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            lines: self
                .lines
                .iter()
                .map(|l| SaleLineRequest {
                    product_id: l.product_id,
                    quantity: l.quantity,
                })
                .collect(),
        })
    }
}
