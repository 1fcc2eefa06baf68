//! cartline
//!
//! Cart line interactions for a storefront page. Clicking a `plus-cart`,
//! `minus-cart` or `remove-cart` control sends one request to the shop's
//! `/pluscart`, `/minuscart` or `/removecart` endpoint, and the quantities and
//! totals the server answers with are rendered back into the page. The page is
//! the only state; nothing is computed locally.

pub mod api;
pub mod bind;
pub mod config;
pub mod errors;
pub mod fixtures;
pub mod handler;
pub mod ids;
pub mod page;
pub mod prelude;
pub mod report;
pub mod sequence;
pub mod view;

#[cfg(feature = "cli")]
pub mod observability;
