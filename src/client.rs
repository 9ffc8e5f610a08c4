//! Blocking HTTP client for the SalesDesk REST API.
//!
//! Carries the session: every request is tagged with the logged-in user's id
//! (`X-User-Id`), and a `401` answer logs the user out before the error is
//! returned.

use crate::config;
use crate::error::{Result, SalesDeskError};
use crate::models::User;
use crate::session::{Session, SessionStore};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::RwLock;
use std::time::Duration;
use tracing::{debug, warn};

/// Wraps a `reqwest` client, the API base URL and the session.
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: SessionStore,
    session: RwLock<Session>,
}

impl ApiClient {
    /// Create a client; the session is loaded from `store`.
    pub fn new(base_url: impl Into<String>, timeout: Duration, store: SessionStore) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        let session = Session::load(&store);
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            session: RwLock::new(session),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// A copy of the current session context.
    pub fn session(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session().user
    }

    /// Replace the session user and persist the change.
    pub fn set_user(&self, user: Option<User>) -> Result<()> {
        let mut session = self
            .session
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        session.user = user;
        session.save(&self.store)
    }

    /// Absolute URL for an API path such as `/products/3`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // -- Verbs -------------------------------------------------------------

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.send(self.http.get(self.url(path)))?;
        Ok(resp.json()?)
    }

    pub fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let resp = self.send(self.http.get(self.url(path)).query(query))?;
        Ok(resp.json()?)
    }

    pub fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self.send(self.http.post(self.url(path)).json(body))?;
        Ok(resp.json()?)
    }

    /// POST without a body, e.g. `/sales/{id}/cancel`.
    pub fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.send(self.http.post(self.url(path)))?;
        Ok(resp.json()?)
    }

    pub fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self.send(self.http.put(self.url(path)).json(body))?;
        Ok(resp.json()?)
    }

    /// PUT without a body, e.g. `/users/{id}/activate`.
    pub fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.send(self.http.put(self.url(path)))?;
        Ok(resp.json()?)
    }

    /// DELETE, discarding any response body.
    pub fn delete(&self, path: &str) -> Result<()> {
        self.send(self.http.delete(self.url(path)))?;
        Ok(())
    }

    // -- Plumbing ----------------------------------------------------------

    fn send(&self, req: RequestBuilder) -> Result<Response> {
        let req = match self.session().user_id() {
            Some(id) => req.header(config::USER_ID_HEADER, id.to_string()),
            None => req,
        };

        let resp = req.send()?;
        let status = resp.status();
        debug!(url = %resp.url(), status = status.as_u16(), "api response");

        if status.is_success() {
            return Ok(resp);
        }

        let message = error_message(resp, status);
        match status {
            StatusCode::UNAUTHORIZED => {
                warn!("api answered 401, clearing session");
                if let Err(e) = self.set_user(None) {
                    warn!(error = %e, "could not remove the stored session");
                }
                Err(SalesDeskError::Unauthorized(message))
            }
            StatusCode::NOT_FOUND => Err(SalesDeskError::NotFound(message)),
            _ => Err(SalesDeskError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

/// Pull a readable message out of an error response.
///
/// Prefers the body's `message`, then `error`, then the raw text, then the
/// status reason.
fn error_message(resp: Response, status: StatusCode) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    };
    let Ok(text) = resp.text() else {
        return fallback();
    };
    if let Ok(body) = serde_json::from_str::<serde_json::Value>(&text) {
        let field = body
            .get("message")
            .or_else(|| body.get("error"))
            .and_then(|v| v.as_str());
        if let Some(msg) = field {
            return msg.to_string();
        }
    }
    if text.trim().is_empty() {
        fallback()
    } else {
        text
    }
}
