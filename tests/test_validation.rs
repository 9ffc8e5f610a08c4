//! Form and payload validation tests.

use rust_decimal::Decimal;
use salesdesk_sdk::models::{CategoryRequest, ProductRequest, Role, SaleLineRequest, SaleRequest};
use salesdesk_sdk::validation::{field_messages, LoginForm, RegisterForm};
use validator::Validate;

// ---------------------------------------------------------------------------
// Registration and login
// ---------------------------------------------------------------------------

#[test]
fn complete_registration_passes() {
    let form = RegisterForm::new("ada", "ada@shop.test", "secret", Role::Analyst)
        .with_confirmation("secret");
    assert!(form.check().is_ok());

    let request = form.to_request();
    assert_eq!(request.role, Role::Analyst);
    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(body["role"], "ANALYSTE");
}

#[test]
fn registration_reports_every_missing_field() {
    let form = RegisterForm::new("  ", "", "", Role::Seller);
    let errors = form.check().unwrap_err();
    let messages = field_messages(&errors);

    assert_eq!(messages["username"], ["Username is required"]);
    assert!(messages["email"].contains(&"Email is required".to_string()));
    assert_eq!(messages["password"], ["Password is required"]);
}

#[test]
fn registration_rejects_malformed_email() {
    let form = RegisterForm::new("ada", "not-an-email", "secret", Role::Seller);
    let messages = field_messages(&form.check().unwrap_err());
    assert_eq!(messages["email"], ["Email is invalid"]);
    assert!(!messages.contains_key("username"));
}

#[test]
fn registration_rejects_mismatched_confirmation() {
    let form = RegisterForm::new("ada", "ada@shop.test", "secret", Role::Seller)
        .with_confirmation("secrett");
    let messages = field_messages(&form.check().unwrap_err());
    assert_eq!(messages["confirm_password"], ["Passwords do not match"]);
    assert_eq!(messages.len(), 1);
}

#[test]
fn login_form_checks_email_and_password() {
    let form = LoginForm {
        email: "admin@shop.test".into(),
        password: "secret".into(),
    };
    assert!(form.validate().is_ok());

    let form = LoginForm {
        email: "admin".into(),
        password: String::new(),
    };
    let messages = field_messages(&form.validate().unwrap_err());
    assert!(messages.contains_key("email"));
    assert!(messages.contains_key("password"));
}

// ---------------------------------------------------------------------------
// Catalog payloads
// ---------------------------------------------------------------------------

#[test]
fn category_needs_a_name() {
    let ok = CategoryRequest {
        name: "Books".into(),
        description: None,
    };
    assert!(ok.validate().is_ok());

    let messages = field_messages(&CategoryRequest::default().validate().unwrap_err());
    assert_eq!(messages["name"], ["Name is required"]);
}

#[test]
fn product_checks_title_price_stock_and_category() {
    let ok = ProductRequest {
        asin: None,
        title: "Rust Book".into(),
        price: Decimal::from(50),
        stock: 0,
        category_id: Some(9),
    };
    assert!(ok.validate().is_ok());

    let bad = ProductRequest {
        asin: None,
        title: String::new(),
        price: Decimal::from(-1),
        stock: -3,
        category_id: None,
    };
    let messages = field_messages(&bad.validate().unwrap_err());
    assert_eq!(messages["title"], ["Title is required"]);
    assert_eq!(messages["price"], ["Price cannot be negative"]);
    assert_eq!(messages["stock"], ["Stock cannot be negative"]);
    assert_eq!(messages["category_id"], ["Category is required"]);
}

#[test]
fn free_product_is_allowed() {
    let free = ProductRequest {
        title: "Sticker".into(),
        price: Decimal::ZERO,
        category_id: Some(10),
        ..Default::default()
    };
    assert!(free.validate().is_ok());
}

// ---------------------------------------------------------------------------
// Sale payloads
// ---------------------------------------------------------------------------

#[test]
fn sale_needs_at_least_one_line() {
    let empty = SaleRequest {
        user_id: 2,
        client_name: None,
        lines: Vec::new(),
    };
    let messages = field_messages(&empty.validate().unwrap_err());
    let all: Vec<&String> = messages.values().flatten().collect();
    assert_eq!(all, ["Add at least one product"]);
}

#[test]
fn sale_line_quantity_must_be_positive() {
    let request = SaleRequest {
        user_id: 2,
        client_name: None,
        lines: vec![
            SaleLineRequest {
                product_id: 1,
                quantity: 1,
            },
            SaleLineRequest {
                product_id: 2,
                quantity: 0,
            },
        ],
    };
    let messages = field_messages(&request.validate().unwrap_err());
    assert_eq!(messages.len(), 1);
    let (field, list) = messages.iter().next().unwrap();
    assert!(field.ends_with("[1].quantity"), "{field}");
    assert_eq!(list, &["Quantity must be at least 1"]);
}

#[test]
fn sale_request_uses_backend_wire_names() {
    let request = SaleRequest {
        user_id: 2,
        client_name: Some("Ada".into()),
        lines: vec![SaleLineRequest {
            product_id: 1,
            quantity: 2,
        }],
    };
    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(body["userId"], 2);
    assert_eq!(body["clientName"], "Ada");
    assert_eq!(body["lignes"][0]["productId"], 1);
}
