//! Update report
//!
//! Terminal rendering of a cart response: which page element would change and
//! what it would read.

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Style, object::{Columns, Rows}},
};

use crate::{
    api::{CartSummary, QuantityUpdate, RemovalUpdate},
    ids::{CartId, ControlKind, SUBTOTAL_ELEMENT_ID, TOTAL_ELEMENT_ID},
};

/// A response, labelled with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    kind: ControlKind,
    cart_id: CartId,
    quantity: Option<i64>,
    summary: CartSummary,
}

impl UpdateReport {
    /// Report for a `/pluscart` or `/minuscart` response.
    pub fn quantity(kind: ControlKind, cart_id: CartId, update: &QuantityUpdate) -> Self {
        Self {
            kind,
            cart_id,
            quantity: Some(update.quantity),
            summary: update.summary(),
        }
    }

    /// Report for a `/removecart` response.
    pub fn removal(cart_id: CartId, update: &RemovalUpdate) -> Self {
        Self {
            kind: ControlKind::Remove,
            cart_id,
            quantity: None,
            summary: update.summary(),
        }
    }

    /// `(element id, new text)` pairs, in render order.
    pub fn rows(&self) -> Vec<(String, String)> {
        let mut rows = Vec::with_capacity(3);

        if let Some(quantity) = self.quantity {
            rows.push((self.cart_id.quantity_element_id(), quantity.to_string()));
        }

        rows.push((SUBTOTAL_ELEMENT_ID.to_string(), self.summary.amount_text()));
        rows.push((TOTAL_ELEMENT_ID.to_string(), self.summary.total_text()));

        rows
    }

    /// Write the report as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["Element", "Text"]);

        for (element, text) in self.rows() {
            builder.push_record([element, text]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..2), Alignment::right());

        writeln!(
            out,
            "GET {}?cart_id={}",
            self.kind.endpoint(),
            self.cart_id
        )?;

        if self.quantity.is_none() {
            writeln!(out, "row of cart item {} removed", self.cart_id)?;
        }

        writeln!(out, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn cart_id() -> Result<CartId, &'static str> {
        CartId::new("42").ok_or("empty id")
    }

    #[test]
    fn quantity_report_lists_all_three_elements() -> TestResult {
        let report = UpdateReport::quantity(
            ControlKind::Increase,
            cart_id()?,
            &QuantityUpdate {
                quantity: 5,
                amount: Decimal::from(10),
                total: Decimal::from(50),
            },
        );

        assert_eq!(
            report.rows(),
            vec![
                ("quantity42".to_string(), "5".to_string()),
                ("amount_tt".to_string(), "10".to_string()),
                ("totalamount".to_string(), "50".to_string()),
            ]
        );

        Ok(())
    }

    #[test]
    fn removal_report_has_no_quantity_row() -> TestResult {
        let report = UpdateReport::removal(
            cart_id()?,
            &RemovalUpdate {
                amount: Decimal::ZERO,
                total: Decimal::from(70),
            },
        );

        let mut out = Vec::new();
        report.write_to(&mut out)?;
        let text = String::from_utf8(out)?;

        assert!(text.starts_with("GET /removecart?cart_id=42\n"), "{text}");
        assert!(text.contains("removed"), "{text}");
        assert!(!text.contains("quantity42"), "{text}");
        assert!(text.contains("totalamount"), "{text}");

        Ok(())
    }
}
