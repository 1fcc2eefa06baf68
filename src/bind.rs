//! Browser binding
//!
//! Attaches a click listener to every cart control on the current document.
//! Each click spawns its operation on the page's event loop and returns at
//! once; the response is rendered whenever it arrives.

pub mod errors;

#[cfg(target_arch = "wasm32")]
mod listeners;

pub use errors::BindError;

#[cfg(target_arch = "wasm32")]
pub use listeners::{bind, run, start};
