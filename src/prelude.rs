//! cartline prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    api::{CartApi, CartApiError, CartSummary, HttpCartApi, QuantityUpdate, RemovalUpdate},
    config::{CartConfig, ConfigError, LogFormat, LoggingConfig},
    errors::CartError,
    handler::{CartHandler, Outcome, SkipReason, parse_displayed_quantity},
    ids::{CartId, ControlKind},
    page::{Element, MemoryPage, NodeKey, Page},
    report::UpdateReport,
    sequence::{RequestSequencer, Ticket},
    view::{CartView, Rendered, ViewPatch},
};
