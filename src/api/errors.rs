//! Cart API errors.

use thiserror::Error;

/// Errors that can occur when calling a cart endpoint.
#[derive(Debug, Error)]
pub enum CartApiError {
    /// An HTTP transport or decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx response.
    #[error("unexpected response from cart endpoint: {0}")]
    UnexpectedResponse(String),
}
