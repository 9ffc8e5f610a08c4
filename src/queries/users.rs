//! User administration: `/users`.

use validator::Validate;

use crate::client::ApiClient;
use crate::config;
use crate::error::Result;
use crate::models::{Role, User, UserRequest};

/// Query interface for user accounts.
pub struct UserQuery<'a> {
    client: &'a ApiClient,
}

impl<'a> UserQuery<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<User>> {
        self.client.get(config::USERS)
    }

    /// Accounts waiting for an administrator to activate them.
    pub fn pending(&self) -> Result<Vec<User>> {
        Ok(self.list()?.into_iter().filter(|u| !u.active).collect())
    }

    pub fn by_role(&self, role: Role) -> Result<Vec<User>> {
        Ok(self.list()?.into_iter().filter(|u| u.role == role).collect())
    }

    pub fn get(&self, id: i64) -> Result<User> {
        self.client.get(&format!("{}/{}", config::USERS, id))
    }

    pub fn create(&self, request: &UserRequest) -> Result<User> {
        request.validate()?;
        self.client.post(config::USERS, request)
    }

    pub fn update(&self, id: i64, request: &UserRequest) -> Result<User> {
        request.validate()?;
        self.client.put(&format!("{}/{}", config::USERS, id), request)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("{}/{}", config::USERS, id))
    }

    pub fn activate(&self, id: i64) -> Result<User> {
        self.client
            .put_empty(&format!("{}/{}/activate", config::USERS, id))
    }

    pub fn deactivate(&self, id: i64) -> Result<User> {
        self.client
            .put_empty(&format!("{}/{}/deactivate", config::USERS, id))
    }
}
