use crate::cart::CartError;

#[derive(Debug, thiserror::Error)]
pub enum SalesDeskError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not persist session file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Account is not activated yet; an administrator must enable it")]
    InactiveAccount,

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
}

pub type Result<T> = std::result::Result<T, SalesDeskError>;
