use crate::{ClientError, Result as ClientErrorResult};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hs_auth::SessionRevoker;
use hs_config::BackendConfig;
use hs_core::Result as CoreErrorResult;
use log::{debug, info};
use reqwest::{Client as ReqwestClient, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;

const REST_PREFIX: &str = "/rest/v1";
const AUTH_PREFIX: &str = "/auth/v1";

/// HTTP client for the hosted backend's table and auth APIs
pub struct RestClient {
    pub base_url: String,
    anon_key: String,
    access_token: Arc<RwLock<Option<String>>>,
    client: ReqwestClient,
}

impl RestClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Project URL (e.g., "https://project.example.co")
    /// * `anon_key` - Public API key sent as `apikey` on every request
    /// * `timeout` - Upper bound for a whole request, body included
    pub fn new(base_url: &str, anon_key: &str, timeout: Duration) -> ClientErrorResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::from_reqwest)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            access_token: Arc::new(RwLock::new(None)),
            client,
        })
    }

    pub fn from_config(config: &BackendConfig) -> ClientErrorResult<Self> {
        let url = config
            .rest_url
            .as_deref()
            .ok_or_else(|| ClientError::config("rest_url is not configured"))?;
        let anon_key = config
            .anon_key
            .as_deref()
            .ok_or_else(|| ClientError::config("anon_key is not configured"))?;

        let client = Self::new(url, anon_key, config.request_timeout())?;
        info!("REST backend at {}", client.base_url);
        Ok(client)
    }

    /// Act as the signed-in user (`Some`) or anonymously (`None`)
    pub async fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write().await = token;
    }

    /// Swap the session token, returning the one it replaces
    pub async fn replace_access_token(&self, token: Option<String>) -> Option<String> {
        std::mem::replace(&mut *self.access_token.write().await, token)
    }

    pub async fn has_access_token(&self) -> bool {
        self.access_token.read().await.is_some()
    }

    pub(crate) fn url(&self, path: &str, query: &[(&str, String)]) -> ClientErrorResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| {
            ClientError::config(format!("invalid URL {}{}: {}", self.base_url, path, e))
        })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Build a request with the API key and the current bearer token
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientErrorResult<reqwest::RequestBuilder> {
        let bearer = match self.access_token.read().await.as_deref() {
            Some(token) => token.to_string(),
            None => self.anon_key.clone(),
        };
        self.request_as(method, path, query, &bearer)
    }

    fn request_as(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        bearer: &str,
    ) -> ClientErrorResult<reqwest::RequestBuilder> {
        let url = self.url(path, query)?;
        Ok(self
            .client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", bearer)))
    }

    /// Execute request and handle errors. An empty body reads as `Null`.
    async fn execute(&self, req: reqwest::RequestBuilder) -> ClientErrorResult<Value> {
        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Table API errors carry `code`/`message`; the auth API uses
    /// `error_code`/`msg` or `error`/`error_description`.
    fn api_error(status: StatusCode, text: &str) -> ClientError {
        let body: Value = serde_json::from_str(text).unwrap_or(Value::Null);

        let code = match body.get("code").or_else(|| body.get("error_code")) {
            Some(Value::String(code)) => code.clone(),
            Some(Value::Number(code)) => code.to_string(),
            _ => "UNKNOWN".to_string(),
        };
        let message = ["message", "msg", "error_description", "error"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .map(String::from)
            .unwrap_or_else(|| {
                if text.is_empty() {
                    status.to_string()
                } else {
                    text.to_string()
                }
            });

        ClientError::api_error(status.as_u16(), code, message)
    }

    // =========================================================================
    // Table operations
    // =========================================================================

    /// `GET /rest/v1/{table}` with PostgREST filters
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> ClientErrorResult<Vec<T>> {
        let path = format!("{}/{}", REST_PREFIX, table);
        let req = self.request(Method::GET, &path, query).await?;
        let body = self.execute(req).await?;
        debug!("Selected from {}", table);
        Ok(serde_json::from_value(body)?)
    }

    /// `POST /rest/v1/{table}`; `upsert` merges on the primary key
    pub(crate) async fn insert<B: Serialize + ?Sized>(
        &self,
        table: &str,
        body: &B,
        upsert: bool,
    ) -> ClientErrorResult<()> {
        let path = format!("{}/{}", REST_PREFIX, table);
        let prefer = if upsert {
            "resolution=merge-duplicates,return=minimal"
        } else {
            "return=minimal"
        };
        let req = self
            .request(Method::POST, &path, &[])
            .await?
            .header("Prefer", prefer)
            .json(body);
        self.execute(req).await?;
        debug!("Inserted into {}", table);
        Ok(())
    }

    /// `PATCH /rest/v1/{table}` returning the updated rows
    pub(crate) async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> ClientErrorResult<Vec<T>> {
        let path = format!("{}/{}", REST_PREFIX, table);
        let req = self
            .request(Method::PATCH, &path, query)
            .await?
            .header("Prefer", "return=representation")
            .json(body);
        let body = self.execute(req).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// `DELETE /rest/v1/{table}`, returning how many rows went away
    pub(crate) async fn delete(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> ClientErrorResult<usize> {
        let path = format!("{}/{}", REST_PREFIX, table);
        let req = self
            .request(Method::DELETE, &path, query)
            .await?
            .header("Prefer", "return=representation");
        let body = self.execute(req).await?;
        let rows: Vec<Value> = serde_json::from_value(body)?;
        Ok(rows.len())
    }

    // =========================================================================
    // Auth operations
    // =========================================================================

    /// End the session identified by `access_token` at the auth service
    pub async fn logout(&self, access_token: &str) -> ClientErrorResult<()> {
        let path = format!("{}/logout", AUTH_PREFIX);
        let req = self.request_as(Method::POST, &path, &[], access_token)?;
        self.execute(req).await?;

        let mut current = self.access_token.write().await;
        if current.as_deref() == Some(access_token) {
            *current = None;
        }
        info!("Session revoked at {}", self.base_url);
        Ok(())
    }
}

/// PostgREST equality filter
pub(crate) fn eq_filter(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

#[async_trait]
impl SessionRevoker for RestClient {
    async fn revoke(&self, access_token: &str) -> CoreErrorResult<()> {
        Ok(self.logout(access_token).await?)
    }
}

impl Clone for RestClient {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            anon_key: self.anon_key.clone(),
            access_token: Arc::clone(&self.access_token),
            client: self.client.clone(),
        }
    }
}
