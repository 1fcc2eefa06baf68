//! HTTP client for the cart endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    api::{CartApi, CartApiError, QuantityUpdate, RemovalUpdate},
    ids::{CartId, ControlKind},
};

/// `reqwest` implementation of [`CartApi`].
#[derive(Debug, Clone)]
pub struct HttpCartApi {
    base_url: String,
    http: Client,
}

impl HttpCartApi {
    /// Create a client sending requests to `base_url`, e.g. `"http://localhost:5000"`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { base_url, http }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        kind: ControlKind,
        cart_id: &CartId,
    ) -> Result<T, CartApiError> {
        let url = format!("{}{}", self.base_url, kind.endpoint());

        debug!(%url, %cart_id, "sending cart request");

        let response = self
            .http
            .get(&url)
            .query(&[("cart_id", cart_id.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(CartApiError::UnexpectedResponse(format!(
                "{} request failed with status {status}: {text}",
                kind.endpoint()
            )));
        }

        Ok(response.json().await?)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl CartApi for HttpCartApi {
    async fn plus_cart(&self, cart_id: CartId) -> Result<QuantityUpdate, CartApiError> {
        self.get(ControlKind::Increase, &cart_id).await
    }

    async fn minus_cart(&self, cart_id: CartId) -> Result<QuantityUpdate, CartApiError> {
        self.get(ControlKind::Decrease, &cart_id).await
    }

    async fn remove_cart(&self, cart_id: CartId) -> Result<RemovalUpdate, CartApiError> {
        self.get(ControlKind::Remove, &cart_id).await
    }
}
