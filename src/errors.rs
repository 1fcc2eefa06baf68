//! Errors

use thiserror::Error;

use crate::{api::CartApiError, ids::CartId};

/// Errors raised while handling a cart control.
#[derive(Debug, Error)]
pub enum CartError {
    /// The control carries no `pid` attribute.
    #[error("control has no `pid` attribute")]
    MissingCartId,

    /// The control's `pid` attribute is empty.
    #[error("control has an empty `pid` attribute")]
    EmptyCartId,

    /// The element is not a `plus-cart`, `minus-cart` or `remove-cart` control.
    #[error("element is not a cart control")]
    UnknownControl,

    /// An element the page must provide is absent.
    #[error("element `#{0}` not found")]
    MissingElement(String),

    /// The remove control has no row the given number of levels above it.
    #[error("no row {depth} levels above the remove control of cart item {cart_id}")]
    MissingRow {
        /// Line whose row was looked up.
        cart_id: CartId,

        /// Levels walked up from the control.
        depth: usize,
    },

    /// The cart endpoint failed.
    #[error(transparent)]
    Api(#[from] CartApiError),
}
