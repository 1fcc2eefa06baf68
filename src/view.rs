//! Cart View
//!
//! The view owns the page and is the only thing that writes to it. Handlers
//! describe what changed as a [`ViewPatch`] and hand it to
//! [`CartView::render`], which resolves element handles, checks the request
//! ticket against newer responses and writes the text.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    api::CartSummary,
    errors::CartError,
    ids::{
        CART_ID_ATTRIBUTE, CartId, ControlKind, ROW_ANCESTOR_DEPTH, SUBTOTAL_ELEMENT_ID,
        TOTAL_ELEMENT_ID,
    },
    page::Page,
    sequence::{RequestSequencer, Ticket},
};

/// A change to render, as confirmed by the server.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewPatch<N> {
    /// A line's quantity and the cart totals changed.
    Line {
        /// Line whose quantity changed.
        cart_id: CartId,

        /// New quantity.
        quantity: i64,

        /// New totals.
        summary: CartSummary,
    },

    /// A line was deleted.
    Removed {
        /// Deleted line.
        cart_id: CartId,

        /// Row captured when the remove control was clicked.
        row: N,

        /// New totals.
        summary: CartSummary,
    },
}

/// What a render actually wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rendered {
    /// The line's quantity text was replaced.
    pub quantity: bool,

    /// The subtotal and grand-total texts were replaced.
    pub summary: bool,

    /// The line's row was detached.
    pub row_removed: bool,
}

impl Rendered {
    /// Nothing was written: every part of the response was superseded.
    pub fn is_stale(&self) -> bool {
        !self.quantity && !self.summary && !self.row_removed
    }
}

/// Explicit UI state for a cart page.
#[derive(Debug)]
pub struct CartView<P: Page> {
    page: P,
    quantities: FxHashMap<CartId, P::Node>,
    sequencer: RequestSequencer,
}

impl<P: Page> CartView<P> {
    /// Wrap a page.
    pub fn new(page: P) -> Self {
        Self {
            page,
            quantities: FxHashMap::default(),
            sequencer: RequestSequencer::new(),
        }
    }

    /// The underlying page.
    pub fn page(&self) -> &P {
        &self.page
    }

    /// Give the page back.
    pub fn into_page(self) -> P {
        self.page
    }

    /// Ticket for a request about to be sent.
    pub fn issue(&mut self) -> Ticket {
        self.sequencer.issue()
    }

    /// Every cart control on the page, with its kind.
    pub fn controls(&self) -> Vec<(ControlKind, P::Node)> {
        ControlKind::ALL
            .into_iter()
            .flat_map(|kind| {
                self.page
                    .elements_by_class(kind.class())
                    .into_iter()
                    .map(move |node| (kind, node))
            })
            .collect()
    }

    /// Classify a clicked element.
    pub fn control_kind(&self, control: &P::Node) -> Option<ControlKind> {
        let classes = self.page.classes(control);

        ControlKind::from_classes(classes.iter().map(String::as_str))
    }

    /// Read the cart line identifier off a control.
    ///
    /// # Errors
    ///
    /// Returns an error if the control has no `pid`, or an empty one.
    pub fn cart_id_of(&self, control: &P::Node) -> Result<CartId, CartError> {
        let raw = self
            .page
            .attribute(control, CART_ID_ATTRIBUTE)
            .ok_or(CartError::MissingCartId)?;

        CartId::new(raw).ok_or(CartError::EmptyCartId)
    }

    /// The row a remove control deletes.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::MissingRow`] if the control sits too close to the root.
    pub fn row_of(&self, control: &P::Node, cart_id: &CartId) -> Result<P::Node, CartError> {
        self.page
            .ancestor(control, ROW_ANCESTOR_DEPTH)
            .ok_or_else(|| CartError::MissingRow {
                cart_id: cart_id.clone(),
                depth: ROW_ANCESTOR_DEPTH,
            })
    }

    /// Text currently shown as the quantity of `cart_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::MissingElement`] if `quantity{id}` is absent.
    pub fn displayed_quantity(&mut self, cart_id: &CartId) -> Result<String, CartError> {
        let node = self.quantity_handle(cart_id)?;

        Ok(self.page.text(&node))
    }

    /// Apply a confirmed change.
    ///
    /// Handles are resolved before anything is written, so a missing element
    /// leaves the page untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::MissingElement`] if an element the patch needs is absent.
    pub fn render(&mut self, ticket: Ticket, patch: ViewPatch<P::Node>) -> Result<Rendered, CartError> {
        match patch {
            ViewPatch::Line {
                cart_id,
                quantity,
                summary,
            } => self.render_line(ticket, &cart_id, quantity, summary),
            ViewPatch::Removed {
                cart_id,
                row,
                summary,
            } => self.render_removal(ticket, &cart_id, &row, summary),
        }
    }

    fn render_line(
        &mut self,
        ticket: Ticket,
        cart_id: &CartId,
        quantity: i64,
        summary: CartSummary,
    ) -> Result<Rendered, CartError> {
        let write_quantity = self.sequencer.line_is_current(cart_id, ticket);
        let write_summary = self.sequencer.summary_is_current(ticket);

        let quantity_node = if write_quantity {
            Some(self.quantity_handle(cart_id)?)
        } else {
            None
        };

        let summary_nodes = if write_summary {
            Some(self.summary_handles()?)
        } else {
            None
        };

        let mut rendered = Rendered::default();

        if let Some(node) = quantity_node {
            self.sequencer.claim_line(cart_id, ticket);
            self.page.set_text(&node, &quantity.to_string());
            rendered.quantity = true;
        }

        if let Some(nodes) = summary_nodes {
            self.write_summary(ticket, &nodes, summary);
            rendered.summary = true;
        }

        debug!(%cart_id, ticket = ticket.get(), ?rendered, "rendered line update");

        Ok(rendered)
    }

    fn render_removal(
        &mut self,
        ticket: Ticket,
        cart_id: &CartId,
        row: &P::Node,
        summary: CartSummary,
    ) -> Result<Rendered, CartError> {
        let summary_nodes = if self.sequencer.summary_is_current(ticket) {
            Some(self.summary_handles()?)
        } else {
            None
        };

        let mut rendered = Rendered::default();

        if let Some(nodes) = summary_nodes {
            self.write_summary(ticket, &nodes, summary);
            rendered.summary = true;
        }

        if self.page.is_connected(row) {
            self.page.remove(row);
            rendered.row_removed = true;
        }

        self.sequencer.retire_line(cart_id);
        self.quantities.remove(cart_id);

        debug!(%cart_id, ticket = ticket.get(), ?rendered, "rendered line removal");

        Ok(rendered)
    }

    fn write_summary(&mut self, ticket: Ticket, nodes: &(P::Node, P::Node), summary: CartSummary) {
        let (subtotal, total) = nodes;

        self.sequencer.claim_summary(ticket);
        self.page.set_text(subtotal, &summary.amount_text());
        self.page.set_text(total, &summary.total_text());
    }

    fn quantity_handle(&mut self, cart_id: &CartId) -> Result<P::Node, CartError> {
        if let Some(node) = self
            .quantities
            .get(cart_id)
            .filter(|node| self.page.is_connected(node))
        {
            return Ok(node.clone());
        }

        let id = cart_id.quantity_element_id();
        let node = self
            .page
            .element_by_id(&id)
            .ok_or(CartError::MissingElement(id))?;

        self.quantities.insert(cart_id.clone(), node.clone());

        Ok(node)
    }

    fn summary_handles(&self) -> Result<(P::Node, P::Node), CartError> {
        Ok((
            self.element(SUBTOTAL_ELEMENT_ID)?,
            self.element(TOTAL_ELEMENT_ID)?,
        ))
    }

    fn element(&self, id: &str) -> Result<P::Node, CartError> {
        self.page
            .element_by_id(id)
            .ok_or_else(|| CartError::MissingElement(id.to_string()))
    }
}
