//! Role-gated navigation: where a user lands after login and which paths
//! they may open.

use crate::models::{Role, User};

pub const LOGIN_PATH: &str = "/login";
pub const PENDING_PATH: &str = "/pending";

const PUBLIC_PATHS: &[&str] = &["/", LOGIN_PATH, "/register", PENDING_PATH];

/// Where a user should be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    PendingActivation,
    Home(Role),
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => LOGIN_PATH,
            Route::PendingActivation => PENDING_PATH,
            Route::Home(role) => home_path(*role),
        }
    }
}

/// Outcome of checking a path for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Not logged in.
    Login,
    /// Logged in but not yet activated.
    Pending,
    /// Logged in, but the path belongs to another role; go `home` instead.
    Forbidden { home: &'static str },
}

pub fn route_for(user: Option<&User>) -> Route {
    match user {
        None => Route::Login,
        Some(u) if !u.active => Route::PendingActivation,
        Some(u) => Route::Home(u.role),
    }
}

pub fn home_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/dashboard",
        Role::Seller => "/vendeur",
        Role::Analyst => "/analyste",
        Role::Buyer => "/acheteur",
        Role::Investor => "/investisseur",
    }
}

/// Path prefixes a role may open. Admins may open everything.
pub fn allowed_prefixes(role: Role) -> &'static [&'static str] {
    match role {
        Role::Admin => &["/"],
        Role::Seller => &["/vendeur", "/sales", "/products"],
        Role::Analyst => &["/analyste", "/analytics"],
        Role::Buyer => &["/acheteur", "/products", "/categories"],
        Role::Investor => &["/investisseur", "/analytics"],
    }
}

pub fn authorize(user: Option<&User>, path: &str) -> Access {
    if is_public(path) {
        return Access::Granted;
    }
    let user = match user {
        None => return Access::Login,
        Some(u) if !u.active => return Access::Pending,
        Some(u) => u,
    };
    if allowed_prefixes(user.role)
        .iter()
        .any(|prefix| matches_prefix(path, prefix))
    {
        Access::Granted
    } else {
        Access::Forbidden {
            home: home_path(user.role),
        }
    }
}

fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&normalize(path))
}

/// `/sales` matches `/sales` and `/sales/3`, not `/salesman`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    let path = normalize(path);
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
