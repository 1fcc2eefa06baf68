//! Cart API Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Subtotal and grand total, as recomputed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    /// Subtotal, shown at `amount_tt`.
    pub amount: Decimal,

    /// Grand total, shown at `totalamount`.
    pub total: Decimal,
}

impl CartSummary {
    /// Subtotal as it should read on the page.
    pub fn amount_text(&self) -> String {
        display_amount(self.amount)
    }

    /// Grand total as it should read on the page.
    pub fn total_text(&self) -> String {
        display_amount(self.total)
    }
}

/// Response of `/pluscart` and `/minuscart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    /// New quantity of the line.
    pub quantity: i64,

    /// New subtotal.
    pub amount: Decimal,

    /// New grand total.
    pub total: Decimal,
}

impl QuantityUpdate {
    /// The totals carried by this update.
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            amount: self.amount,
            total: self.total,
        }
    }
}

/// Response of `/removecart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalUpdate {
    /// New subtotal.
    pub amount: Decimal,

    /// New grand total.
    pub total: Decimal,
}

impl RemovalUpdate {
    /// The totals carried by this update.
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            amount: self.amount,
            total: self.total,
        }
    }
}

/// Render an amount without trailing zeros, the way a JSON number reads once
/// written into the page (`10.0` reads `10`, `10.50` reads `10.5`).
pub fn display_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}
