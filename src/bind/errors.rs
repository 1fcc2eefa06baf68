//! Binding errors
//!
//! Their messages are what the module start hook throws to the console.

use thiserror::Error;

/// Errors raised while wiring the page up.
#[derive(Debug, Error)]
pub enum BindError {
    /// There is no window or document to bind to.
    #[error("no document available")]
    NoDocument,

    /// The page origin could not be read.
    #[error("could not read page origin: {0}")]
    Origin(String),

    /// A listener could not be attached.
    #[error("could not attach click listener: {0}")]
    Listener(String),
}
