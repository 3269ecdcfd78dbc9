pub mod error;
pub mod token;
pub mod types;

mod auth;
mod inventory;
mod reports;
mod sales;
mod service;
mod team;

pub use error::{DealerError, Result};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the dealership REST API.
///
/// Every request reads the current token from the [`TokenStore`] and, when
/// one is present, sends it as `Authorization: Token <token>`.
#[derive(Clone)]
pub struct DealerClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl DealerClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        Self::with_timeout(base_url, tokens, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        tokens: Arc<dyn TokenStore>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match self.tokens.load()? {
            Some(token) => Ok(req.header(AUTHORIZATION, format!("Token {token}"))),
            None => Ok(req),
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let resp = self.authorize(req)?.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DealerError::from_body(status.as_u16(), body));
        }

        Ok(resp)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!(path, "GET");
        let resp = self.send(self.client.get(self.url(path))).await?;
        Ok(resp.json().await?)
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "POST");
        let resp = self
            .send(self.client.post(self.url(path)).json(body))
            .await?;
        Ok(resp.json().await?)
    }

    pub(crate) async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        tracing::debug!(path, "POST multipart");
        let resp = self
            .send(self.client.post(self.url(path)).multipart(form))
            .await?;
        Ok(resp.json().await?)
    }

    pub(crate) async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "PATCH");
        let resp = self
            .send(self.client.patch(self.url(path)).json(body))
            .await?;
        Ok(resp.json().await?)
    }

    /// PATCH where the response body is not needed.
    pub(crate) async fn patch_discard<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!(path, "PATCH");
        self.send(self.client.patch(self.url(path)).json(body))
            .await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        tracing::debug!(path, "DELETE");
        self.send(self.client.delete(self.url(path))).await?;
        Ok(())
    }
}
