//! Cart API
//!
//! The three collaborator endpoints the handler calls. The server side is not
//! part of this crate; only the request shape and the response bodies are.

use async_trait::async_trait;
#[cfg(not(target_arch = "wasm32"))]
use mockall::automock;

use crate::ids::CartId;

pub mod errors;
pub mod http;
pub mod models;

pub use errors::CartApiError;
pub use http::HttpCartApi;
pub use models::{CartSummary, QuantityUpdate, RemovalUpdate};

/// Cart collaborator endpoints.
#[cfg(not(target_arch = "wasm32"))]
#[automock]
#[async_trait]
pub trait CartApi: Send + Sync {
    /// `GET /pluscart?cart_id={id}`
    async fn plus_cart(&self, cart_id: CartId) -> Result<QuantityUpdate, CartApiError>;

    /// `GET /minuscart?cart_id={id}`
    async fn minus_cart(&self, cart_id: CartId) -> Result<QuantityUpdate, CartApiError>;

    /// `GET /removecart?cart_id={id}`
    async fn remove_cart(&self, cart_id: CartId) -> Result<RemovalUpdate, CartApiError>;
}

/// Cart collaborator endpoints.
///
/// Browser futures are not `Send`, so this variant drops the bound.
#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
pub trait CartApi {
    /// `GET /pluscart?cart_id={id}`
    async fn plus_cart(&self, cart_id: CartId) -> Result<QuantityUpdate, CartApiError>;

    /// `GET /minuscart?cart_id={id}`
    async fn minus_cart(&self, cart_id: CartId) -> Result<QuantityUpdate, CartApiError>;

    /// `GET /removecart?cart_id={id}`
    async fn remove_cart(&self, cart_id: CartId) -> Result<RemovalUpdate, CartApiError>;
}
