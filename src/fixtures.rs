//! Fixtures
//!
//! Cart pages laid out the way a storefront template renders them:
//!
//! ```text
//! div.cart-row            <- row, four levels above the remove control
//!   div.cart-body
//!     div.cart-controls
//!       div.quantity-group
//!         a.minus-cart[pid]
//!         span#quantity{id}
//!         a.plus-cart[pid]
//!         a.remove-cart[pid]
//! p#amount_tt
//! p#totalamount
//! ```

use thiserror::Error;

use crate::{
    ids::{CART_ID_ATTRIBUTE, ControlKind, QUANTITY_ELEMENT_PREFIX, SUBTOTAL_ELEMENT_ID, TOTAL_ELEMENT_ID},
    page::{Element, MemoryPage, MemoryPageError, NodeKey},
};

/// Fixture errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Building the page failed.
    #[error(transparent)]
    Page(#[from] MemoryPageError),

    /// No line with the given id was built.
    #[error("line not found: {0}")]
    LineNotFound(String),
}

/// Handles to one rendered cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    /// Row wrapping the whole line.
    pub row: NodeKey,

    /// `quantity{id}` text.
    pub quantity: NodeKey,

    /// `plus-cart` control.
    pub plus: NodeKey,

    /// `minus-cart` control.
    pub minus: NodeKey,

    /// `remove-cart` control.
    pub remove: NodeKey,
}

/// A cart page and handles to everything on it.
#[derive(Debug)]
pub struct CartPageFixture {
    /// The page.
    pub page: MemoryPage,

    /// Lines, in the order given.
    pub lines: Vec<(String, CartLine)>,

    /// `amount_tt` text.
    pub subtotal: NodeKey,

    /// `totalamount` text.
    pub total: NodeKey,
}

impl CartPageFixture {
    /// Build a page with the given `(cart_id, quantity)` lines and totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be assembled.
    pub fn build(lines: &[(&str, i64)], amount: &str, total: &str) -> Result<Self, FixtureError> {
        let mut page = MemoryPage::new();
        let root = page.root();

        let built = lines
            .iter()
            .map(|(cart_id, quantity)| {
                append_line(&mut page, root, cart_id, *quantity)
                    .map(|line| ((*cart_id).to_string(), line))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let subtotal = page.append(
            root,
            Element::new("p").with_id(SUBTOTAL_ELEMENT_ID).with_text(amount),
        )?;
        let total = page.append(
            root,
            Element::new("p").with_id(TOTAL_ELEMENT_ID).with_text(total),
        )?;

        Ok(Self {
            page,
            lines: built,
            subtotal,
            total,
        })
    }

    /// Handles of the line with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::LineNotFound`] if no such line was built.
    pub fn line(&self, cart_id: &str) -> Result<CartLine, FixtureError> {
        self.lines
            .iter()
            .find(|(id, _)| id == cart_id)
            .map(|(_, line)| *line)
            .ok_or_else(|| FixtureError::LineNotFound(cart_id.to_string()))
    }
}

fn append_line(
    page: &mut MemoryPage,
    parent: NodeKey,
    cart_id: &str,
    quantity: i64,
) -> Result<CartLine, MemoryPageError> {
    let row = page.append(parent, Element::new("div").with_class("cart-row"))?;
    let body = page.append(row, Element::new("div").with_class("cart-body"))?;
    let controls = page.append(body, Element::new("div").with_class("cart-controls"))?;
    let group = page.append(controls, Element::new("div").with_class("quantity-group"))?;

    let minus = page.append(group, control(ControlKind::Decrease, cart_id, "-"))?;
    let quantity = page.append(
        group,
        Element::new("span")
            .with_id(format!("{QUANTITY_ELEMENT_PREFIX}{cart_id}"))
            .with_text(quantity.to_string()),
    )?;
    let plus = page.append(group, control(ControlKind::Increase, cart_id, "+"))?;
    let remove = page.append(group, control(ControlKind::Remove, cart_id, "Remove"))?;

    Ok(CartLine {
        row,
        quantity,
        plus,
        minus,
        remove,
    })
}

fn control(kind: ControlKind, cart_id: &str, label: &str) -> Element {
    Element::new("a")
        .with_class("btn")
        .with_class(kind.class())
        .with_attribute(CART_ID_ATTRIBUTE, cart_id)
        .with_text(label)
}
