//! Authentication: login, registration and the persisted session.

use tracing::info;
use validator::Validate;

use crate::client::ApiClient;
use crate::config;
use crate::error::{Result, SalesDeskError};
use crate::models::{LoginRequest, User};
use crate::validation::{LoginForm, RegisterForm};

/// Query interface for `/auth` and the local session.
pub struct AuthQuery<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthQuery<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Log in and persist the session.
    ///
    /// An account the API reports as inactive is rejected with
    /// [`SalesDeskError::InactiveAccount`] and is not stored.
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let form = LoginForm {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        form.validate()?;

        let request = LoginRequest {
            email: form.email,
            password: form.password,
        };
        let user: User = self.client.post(config::AUTH_LOGIN, &request)?;
        if !user.active {
            return Err(SalesDeskError::InactiveAccount);
        }

        self.client.set_user(Some(user.clone()))?;
        info!(user_id = user.id, role = %user.role, "logged in");
        Ok(user)
    }

    /// Register a new account. New accounts wait for activation, so the
    /// session is left untouched.
    pub fn register(&self, form: &RegisterForm) -> Result<User> {
        form.check()?;
        self.client.post(config::AUTH_REGISTER, &form.to_request())
    }

    pub fn logout(&self) -> Result<()> {
        self.client.set_user(None)?;
        info!("logged out");
        Ok(())
    }

    pub fn current_user(&self) -> Option<User> {
        self.client.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }
}
