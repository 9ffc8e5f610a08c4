use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Products with `stock` strictly below this count are flagged as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;
pub const DEFAULT_TOP_N: usize = 5;

/// Header carrying the logged-in user's id on every request.
pub const USER_ID_HEADER: &str = "X-User-Id";

pub const ENV_BASE_URL: &str = "SALESDESK_API_URL";
pub const ENV_SESSION_DIR: &str = "SALESDESK_SESSION_DIR";

pub const WALK_IN_CUSTOMER: &str = "Walk-in Customer";

// Resource paths, relative to the base URL.
pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_REGISTER: &str = "/auth/register";
pub const CATEGORIES: &str = "/categories";
pub const PRODUCTS: &str = "/products";
pub const SALES: &str = "/sales";
pub const USERS: &str = "/users";

pub const ANALYTICS_KPI: &str = "/analytics/kpi";
pub const ANALYTICS_MONTHLY: &str = "/analytics/sales/monthly";
pub const ANALYTICS_DAILY: &str = "/analytics/sales/daily";
pub const ANALYTICS_BEST_SELLERS: &str = "/analytics/products/best-sellers";
pub const ANALYTICS_SLOW_MOVERS: &str = "/analytics/products/slow-movers";
pub const ANALYTICS_LOW_STOCK: &str = "/analytics/products/low-stock";
pub const ANALYTICS_CATEGORIES: &str = "/analytics/categories";
pub const ANALYTICS_EVOLUTION: &str = "/analytics/evolution/current-month";
pub const ANALYTICS_BASKET: &str = "/analytics/basket/stats";

/// Base URL from `SALESDESK_API_URL`, falling back to the local default.
pub fn base_url_from_env() -> String {
    std::env::var(ENV_BASE_URL)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

pub fn default_session_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(ENV_SESSION_DIR) {
        return PathBuf::from(dir);
    }
    if let Some(data) = dirs::data_local_dir() {
        data.join("salesdesk-sdk")
    } else {
        PathBuf::from(".salesdesk-session")
    }
}
