//! Shared test fixtures for the SalesDesk SDK integration tests.
//!
//! Provides sample catalog and sale records, plus `start_mock_api()` which
//! serves them from an in-process axum app on a background Tokio runtime so
//! the blocking client can be exercised end to end.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};

use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use salesdesk_sdk::models::{Category, Product, Sale};
use salesdesk_sdk::SalesDeskSdk;
use serde_json::{json, Value};

pub const PASSWORD: &str = "secret";

// ---------------------------------------------------------------------------
// Sample records
// ---------------------------------------------------------------------------

pub fn categories_json() -> Value {
    json!([
        { "id": 9, "name": "Books", "description": "Printed and e-books" },
        { "id": 10, "name": "Games", "description": null }
    ])
}

/// Product 3 has no category; products 2 and 3 are below the default
/// low-stock threshold.
pub fn products_json() -> Value {
    json!([
        { "id": 1, "asin": "B001", "title": "Rust Book", "price": 50, "stock": 10, "categoryId": 9, "rating": 4.5 },
        { "id": 2, "asin": "B002", "title": "Board Game", "price": 20, "stock": 3, "categoryId": 10 },
        { "id": 3, "asin": "B003", "title": "Orphan Sticker", "price": 5, "stock": 0, "categoryId": null }
    ])
}

/// Four sales over three days. 2024-05-01 is a Wednesday.
///
/// Totals: 285 revenue; Books 200, Games 80, one line without a category.
pub fn sales_json() -> Value {
    json!([
        {
            "id": 1, "saleDate": "2024-05-01T10:15:00", "totalAmount": 100,
            "userId": 2, "username": "seller", "status": "COMPLETED",
            "lignes": [ { "productId": 1, "productTitle": "Rust Book", "quantity": 2, "unitPrice": 50 } ]
        },
        {
            "id": 2, "saleDate": "2024-05-01T14:40:00", "totalAmount": 60,
            "userId": 2, "username": "seller", "status": "COMPLETED",
            "lignes": [ { "productId": 2, "productTitle": "Board Game", "quantity": 3, "unitPrice": 20 } ]
        },
        {
            "id": 3, "saleDate": "2024-05-02T10:05:00", "totalAmount": 105,
            "userId": 1, "username": "admin", "status": "COMPLETED",
            "lignes": [
                { "productId": 1, "productTitle": "Rust Book", "quantity": 2, "unitPrice": 50 },
                { "productId": 3, "productTitle": "Orphan Sticker", "quantity": 1, "unitPrice": 5 }
            ]
        },
        {
            "id": 4, "saleDate": "2024-04-30T09:00:00", "totalAmount": 20,
            "userId": 2, "username": "seller", "status": "COMPLETED",
            "lignes": [ { "productId": 2, "productTitle": "Board Game", "quantity": 1, "unitPrice": 20 } ]
        }
    ])
}

pub fn users_json() -> Value {
    json!([
        { "id": 1, "username": "admin", "email": "admin@shop.test", "role": "ADMIN", "active": true },
        { "id": 2, "username": "seller", "email": "seller@shop.test", "role": "VENDEUR", "active": true },
        { "id": 3, "username": "newbie", "email": "new@shop.test", "role": "ANALYSTE", "active": false },
        { "id": 4, "username": "analyst", "email": "analyst@shop.test", "role": "ANALYSTE", "active": true }
    ])
}

pub fn sample_categories() -> Vec<Category> {
    serde_json::from_value(categories_json()).unwrap()
}

pub fn sample_products() -> Vec<Product> {
    serde_json::from_value(products_json()).unwrap()
}

pub fn sample_sales() -> Vec<Sale> {
    serde_json::from_value(sales_json()).unwrap()
}

/// A single sale with one line, for small hand-checked cases.
pub fn sale(id: i64, date: &str, total: i64, lines: &[(i64, &str, u32, i64)]) -> Sale {
    let lignes: Vec<Value> = lines
        .iter()
        .map(|(product_id, title, quantity, unit_price)| {
            json!({
                "productId": product_id,
                "productTitle": title,
                "quantity": quantity,
                "unitPrice": unit_price
            })
        })
        .collect();
    serde_json::from_value(json!({
        "id": id,
        "saleDate": date,
        "totalAmount": total,
        "lignes": lignes
    }))
    .unwrap()
}

// ---------------------------------------------------------------------------
// Mock API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub user_id: Option<String>,
}

pub struct MockState {
    pub sales: Mutex<Vec<Value>>,
    pub fail_analytics: AtomicBool,
    /// Path suffixes answered with a 500.
    pub failing: Mutex<Vec<String>>,
    pub requests: Mutex<Vec<Recorded>>,
}

pub struct MockApi {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockApi {
    pub fn fail_analytics(&self, fail: bool) {
        self.state.fail_analytics.store(fail, Ordering::SeqCst);
    }

    /// Make every request whose path ends with `suffix` fail with a 500.
    pub fn fail_endpoint(&self, suffix: &str) {
        self.state.failing.lock().unwrap().push(suffix.to_string());
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Recorded requests whose path ends with `suffix`.
    pub fn requests_to(&self, suffix: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.ends_with(suffix))
            .collect()
    }
}

/// Serve the sample records on `127.0.0.1` at a free port.
pub fn start_mock_api() -> MockApi {
    let state = Arc::new(MockState {
        sales: Mutex::new(sales_json().as_array().cloned().unwrap_or_default()),
        fail_analytics: AtomicBool::new(false),
        failing: Mutex::new(Vec::new()),
        requests: Mutex::new(Vec::new()),
    });
    let app = mock_router(state.clone());

    let (tx, rx) = mpsc::channel::<SocketAddr>();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    let addr = rx.recv().unwrap();

    MockApi {
        base_url: format!("http://{addr}/api"),
        state,
    }
}

/// Build an SDK against `api` with a fresh session directory.
///
/// Returns `(SalesDeskSdk, tempfile::TempDir)`. Keep the `TempDir` alive for
/// the duration of the test.
pub fn sdk_for(api: &MockApi) -> (SalesDeskSdk, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let sdk = SalesDeskSdk::builder()
        .base_url(&api.base_url)
        .session_dir(tmp_dir.path())
        .build()
        .unwrap();
    (sdk, tmp_dir)
}

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn mock_router(state: Arc<MockState>) -> Router {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/categories", get(|| async { Json(categories_json()) }))
        .route("/products", get(|| async { Json(products_json()) }))
        .route("/products/page", get(products_page))
        .route("/products/{id}", get(product_by_id))
        .route("/sales", get(list_sales).post(create_sale))
        .route("/sales/{id}", get(sale_by_id).delete(delete_sale))
        .route("/sales/{id}/cancel", post(cancel_sale))
        .route("/users", get(list_users))
        .route("/users/{id}/activate", put(activate_user))
        .route("/analytics/kpi", get(analytics_kpi))
        .route("/analytics/categories", get(analytics_categories))
        .route("/analytics/products/best-sellers", get(analytics_best_sellers))
        .route("/analytics/sales/daily", get(analytics_daily));

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): State<Arc<MockState>>, req: Request, next: Next) -> Response {
    let recorded = Recorded {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        user_id: req
            .headers()
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    let failing = state
        .failing
        .lock()
        .unwrap()
        .iter()
        .any(|suffix| recorded.path.ends_with(suffix.as_str()));
    state.requests.lock().unwrap().push(recorded);
    if failing {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "endpoint unavailable").into_response();
    }
    next.run(req).await
}

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

fn find_by_id(records: &Value, id: i64) -> Option<Value> {
    records
        .as_array()?
        .iter()
        .find(|r| r["id"].as_i64() == Some(id))
        .cloned()
}

async fn login(Json(body): Json<Value>) -> ApiResult {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let user = users_json()
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["email"] == email)
        .cloned();
    match user {
        Some(user) if password == PASSWORD => Ok(Json(user)),
        _ => Err(error(StatusCode::UNAUTHORIZED, "Invalid credentials")),
    }
}

async fn register(Json(body): Json<Value>) -> ApiResult {
    if body["email"] == "admin@shop.test" {
        return Err(error(StatusCode::CONFLICT, "Email already in use"));
    }
    Ok(Json(json!({
        "id": 99,
        "username": body["username"],
        "email": body["email"],
        "role": body["role"],
        "active": false
    })))
}

async fn products_page(Query(params): Query<HashMap<String, String>>) -> ApiResult {
    let size: usize = params.get("size").and_then(|s| s.parse().ok()).unwrap_or(10);
    let page: usize = params.get("page").and_then(|s| s.parse().ok()).unwrap_or(0);
    let all = products_json().as_array().cloned().unwrap_or_default();
    let content: Vec<Value> = all.iter().skip(page * size).take(size).cloned().collect();
    let total_pages = all.len().div_ceil(size.max(1));
    Ok(Json(json!({
        "content": content,
        "totalElements": all.len(),
        "totalPages": total_pages,
        "number": page,
        "size": size,
        "sortBy": params.get("sortBy")
    })))
}

async fn product_by_id(Path(id): Path<i64>) -> ApiResult {
    find_by_id(&products_json(), id)
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Product not found"))
}

async fn list_sales(State(state): State<Arc<MockState>>) -> Json<Value> {
    Json(Value::Array(state.sales.lock().unwrap().clone()))
}

async fn sale_by_id(State(state): State<Arc<MockState>>, Path(id): Path<i64>) -> ApiResult {
    let sales = Value::Array(state.sales.lock().unwrap().clone());
    find_by_id(&sales, id)
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Sale not found"))
}

/// Prices lines from the product list, like the backend does.
async fn create_sale(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> ApiResult {
    let products = products_json();
    let mut total = 0i64;
    let mut lignes = Vec::new();
    for line in body["lignes"].as_array().cloned().unwrap_or_default() {
        let product_id = line["productId"].as_i64().unwrap_or_default();
        let product = find_by_id(&products, product_id)
            .ok_or_else(|| error(StatusCode::BAD_REQUEST, "Unknown product"))?;
        let quantity = line["quantity"].as_i64().unwrap_or_default();
        let price = product["price"].as_i64().unwrap_or_default();
        total += price * quantity;
        lignes.push(json!({
            "productId": product_id,
            "productTitle": product["title"],
            "quantity": quantity,
            "unitPrice": price
        }));
    }

    let mut sales = state.sales.lock().unwrap();
    let sale = json!({
        "id": 500 + sales.len() as i64,
        "saleDate": "2024-05-03T11:00:00",
        "totalAmount": total,
        "userId": body["userId"],
        "status": "COMPLETED",
        "lignes": lignes
    });
    sales.push(sale.clone());
    Ok(Json(sale))
}

async fn delete_sale(State(state): State<Arc<MockState>>, Path(id): Path<i64>) -> StatusCode {
    state
        .sales
        .lock()
        .unwrap()
        .retain(|s| s["id"].as_i64() != Some(id));
    StatusCode::NO_CONTENT
}

async fn cancel_sale(State(state): State<Arc<MockState>>, Path(id): Path<i64>) -> ApiResult {
    let mut sales = state.sales.lock().unwrap();
    let sale = sales
        .iter_mut()
        .find(|s| s["id"].as_i64() == Some(id))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Sale not found"))?;
    sale["status"] = json!("CANCELLED");
    Ok(Json(sale.clone()))
}

/// Admin only: anyone else gets a 401, as with an expired session.
async fn list_users(req: Request) -> ApiResult {
    let is_admin = req
        .headers()
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        == Some("1");
    if is_admin {
        Ok(Json(users_json()))
    } else {
        Err(error(StatusCode::UNAUTHORIZED, "Session expired"))
    }
}

async fn activate_user(Path(id): Path<i64>) -> ApiResult {
    let mut user = find_by_id(&users_json(), id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "User not found"))?;
    user["active"] = json!(true);
    Ok(Json(user))
}

fn analytics_guard(state: &MockState) -> Result<(), (StatusCode, Json<Value>)> {
    if state.fail_analytics.load(Ordering::SeqCst) {
        Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "analytics unavailable" })),
        ))
    } else {
        Ok(())
    }
}

async fn analytics_kpi(State(state): State<Arc<MockState>>) -> ApiResult {
    analytics_guard(&state)?;
    Ok(Json(json!({
        "totalRevenue": 1000,
        "totalSales": 10,
        "averageBasket": 100,
        "lowStockCount": 1
    })))
}

async fn analytics_categories(State(state): State<Arc<MockState>>) -> ApiResult {
    analytics_guard(&state)?;
    Ok(Json(json!([
        { "categoryName": "Books", "totalRevenue": 700 },
        { "categoryName": "Games", "totalRevenue": 300 }
    ])))
}

async fn analytics_best_sellers(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    analytics_guard(&state)?;
    let limit: usize = params.get("limit").and_then(|s| s.parse().ok()).unwrap_or(5);
    let all = vec![
        json!({ "productTitle": "Rust Book", "totalQuantity": 40 }),
        json!({ "productTitle": "Board Game", "totalQuantity": 25 }),
        json!({ "productTitle": "Orphan Sticker", "totalQuantity": 3 }),
    ];
    Ok(Json(Value::Array(all.into_iter().take(limit).collect())))
}

async fn analytics_daily(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let start = params.get("start").cloned().unwrap_or_default();
    let end = params.get("end").cloned().unwrap_or_default();
    Json(json!([
        { "date": start, "revenue": 10 },
        { "date": end, "revenue": 20 }
    ]))
}
