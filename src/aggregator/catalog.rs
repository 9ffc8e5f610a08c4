//! Explicit product → category resolution for sale lines.

use std::collections::HashMap;

use crate::models::{Category, Product, SaleLine};

/// Outcome of resolving one sale line against the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineResolution<'a> {
    Resolved {
        product: &'a Product,
        category: &'a Category,
    },
    MissingProduct,
    MissingCategory {
        product: &'a Product,
    },
}

/// Id lookups over borrowed product and category snapshots.
///
/// On duplicate ids the first record wins, as a linear `find` would.
pub struct CatalogIndex<'a> {
    products: HashMap<i64, &'a Product>,
    categories: HashMap<i64, &'a Category>,
}

impl<'a> CatalogIndex<'a> {
    pub fn new(products: &'a [Product], categories: &'a [Category]) -> Self {
        let mut product_map = HashMap::with_capacity(products.len());
        for p in products {
            product_map.entry(p.id).or_insert(p);
        }
        let mut category_map = HashMap::with_capacity(categories.len());
        for c in categories {
            category_map.entry(c.id).or_insert(c);
        }
        Self {
            products: product_map,
            categories: category_map,
        }
    }

    pub fn product(&self, id: i64) -> Option<&'a Product> {
        self.products.get(&id).copied()
    }

    pub fn category(&self, id: i64) -> Option<&'a Category> {
        self.categories.get(&id).copied()
    }

    /// Resolve a line's product, then that product's category.
    pub fn resolve(&self, line: &SaleLine) -> LineResolution<'a> {
        let Some(product) = self.product(line.product_id) else {
            return LineResolution::MissingProduct;
        };
        match product.category_id.and_then(|id| self.category(id)) {
            Some(category) => LineResolution::Resolved { product, category },
            None => LineResolution::MissingCategory { product },
        }
    }
}
