use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Application role. Wire names are the backend's upper-case role codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "VENDEUR")]
    Seller,
    #[serde(rename = "ANALYSTE")]
    Analyst,
    #[serde(rename = "ACHETEUR")]
    Buyer,
    #[serde(rename = "INVESTISSEUR")]
    Investor,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Seller,
        Role::Analyst,
        Role::Buyer,
        Role::Investor,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Seller => "VENDEUR",
            Role::Analyst => "ANALYSTE",
            Role::Buyer => "ACHETEUR",
            Role::Investor => "INVESTISSEUR",
        }
    }

    /// Roles the backend accepts when creating a sale.
    pub fn can_sell(&self) -> bool {
        matches!(self, Role::Admin | Role::Seller)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Role::ALL
            .into_iter()
            .find(|r| r.code() == upper)
            .ok_or_else(|| format!("unknown role: {s}"))
    }
}

// ---------------------------------------------------------------------------
// User: Account descriptor, also the persisted session payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload for POST /users and PUT /users/{id}.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
}

/// Payload for POST /auth/register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}
