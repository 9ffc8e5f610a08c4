//! Sale cart tests: stock and duplicate rules, totals, request building.

mod common;

use rust_decimal::Decimal;
use salesdesk_sdk::{Cart, CartError};

#[test]
fn add_prices_lines_from_the_product() {
    let products = common::sample_products();
    let mut cart = Cart::new();
    cart.add(&products[0], 2).unwrap();
    cart.add(&products[1], 3).unwrap();

    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.lines()[0].line_total, Decimal::from(100));
    assert_eq!(cart.total(), Decimal::from(160));
    assert_eq!(cart.item_count(), 5);
}

#[test]
fn add_rejects_zero_quantity_overstock_and_duplicates() {
    let products = common::sample_products();
    let mut cart = Cart::new();

    assert_eq!(cart.add(&products[0], 0), Err(CartError::InvalidQuantity));
    assert_eq!(
        cart.add(&products[1], 4),
        Err(CartError::NotEnoughStock {
            product_id: 2,
            requested: 4,
            available: 3,
        })
    );
    cart.add(&products[0], 1).unwrap();
    assert_eq!(cart.add(&products[0], 1), Err(CartError::Duplicate(1)));
    assert_eq!(cart.lines().len(), 1);
}

#[test]
fn out_of_stock_product_cannot_be_added() {
    let products = common::sample_products();
    let mut cart = Cart::new();
    assert!(matches!(
        cart.add(&products[2], 1),
        Err(CartError::NotEnoughStock { available: 0, .. })
    ));
    assert!(cart.is_empty());
}

#[test]
fn update_quantity_respects_stock_seen_at_add_time() {
    let products = common::sample_products();
    let mut cart = Cart::new();
    cart.add(&products[1], 1).unwrap();

    cart.update_quantity(2, 3).unwrap();
    assert_eq!(cart.total(), Decimal::from(60));
    assert!(cart.update_quantity(2, 4).is_err());
    assert_eq!(cart.update_quantity(2, 0), Err(CartError::InvalidQuantity));
    assert_eq!(cart.update_quantity(9, 1), Err(CartError::NotInCart(9)));
}

#[test]
fn remove_drops_a_line() {
    let products = common::sample_products();
    let mut cart = Cart::new();
    cart.add(&products[0], 1).unwrap();
    assert!(cart.remove(1));
    assert!(!cart.remove(1));
    assert!(cart.is_empty());
}

#[test]
fn to_request_omits_prices_and_blank_client() {
    let products = common::sample_products();
    let mut cart = Cart::new();
    assert_eq!(cart.to_request(2, None).unwrap_err(), CartError::Empty);

    cart.add(&products[0], 2).unwrap();
    let request = cart.to_request(2, Some("   ")).unwrap();
    assert_eq!(request.user_id, 2);
    assert!(request.client_name.is_none());
    assert_eq!(request.lines.len(), 1);
    assert_eq!(request.lines[0].quantity, 2);

    let request = cart.to_request(2, Some(" Ada ")).unwrap();
    assert_eq!(request.client_name.as_deref(), Some("Ada"));
}
