//! Cart interaction handler
//!
//! Turns a click on a cart control into one request and, once the server
//! answers, one render. The page is borrowed only before and after the
//! request is awaited, so any number of clicks may be in flight at once on a
//! single-threaded event loop.

use std::cell::{Ref, RefCell};

use tracing::{Span, debug, field, info, instrument, warn};

use crate::{
    api::CartApi,
    errors::CartError,
    ids::ControlKind,
    page::Page,
    sequence::Ticket,
    view::{CartView, Rendered, ViewPatch},
};

pub mod quantity;

pub use quantity::parse_displayed_quantity;

/// Why a click issued no request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The displayed quantity is already at the floor of one.
    AtMinimum(i64),

    /// The displayed quantity does not start with an integer.
    Unparseable(String),
}

/// Result of handling one click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The response was rendered, fully or in part.
    Applied(Rendered),

    /// The response arrived after newer ones and nothing was written.
    Discarded,

    /// No request was sent.
    Skipped(SkipReason),
}

/// Cart interaction handler.
#[derive(Debug)]
pub struct CartHandler<A, P: Page> {
    api: A,
    view: RefCell<CartView<P>>,
}

impl<A: CartApi, P: Page> CartHandler<A, P> {
    /// Create a handler rendering into `page`.
    pub fn new(api: A, page: P) -> Self {
        Self {
            api,
            view: RefCell::new(CartView::new(page)),
        }
    }

    /// The view, for inspection between clicks.
    pub fn view(&self) -> Ref<'_, CartView<P>> {
        self.view.borrow()
    }

    /// Give the page back.
    pub fn into_page(self) -> P {
        self.view.into_inner().into_page()
    }

    /// Every control this handler responds to.
    pub fn controls(&self) -> Vec<(ControlKind, P::Node)> {
        self.view.borrow().controls()
    }

    /// Handle a click on any cart control.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownControl`] if `control` is not a cart
    /// control, otherwise whatever the matching operation returns.
    pub async fn click(&self, control: &P::Node) -> Result<Outcome, CartError> {
        let kind = self
            .view
            .borrow()
            .control_kind(control)
            .ok_or(CartError::UnknownControl)?;

        debug!(%kind, "cart control clicked");

        match kind {
            ControlKind::Increase => self.increment(control).await,
            ControlKind::Decrease => self.decrement(control).await,
            ControlKind::Remove => self.remove(control).await,
        }
    }

    /// Add one to the control's line via `/pluscart`.
    ///
    /// # Errors
    ///
    /// Returns an error if the control has no cart id, the request fails, or
    /// an element the update needs is missing.
    #[instrument(name = "cart.increment", skip_all, fields(cart_id = field::Empty))]
    pub async fn increment(&self, control: &P::Node) -> Result<Outcome, CartError> {
        let (cart_id, ticket) = {
            let mut view = self.view.borrow_mut();
            let cart_id = view.cart_id_of(control)?;

            (cart_id, view.issue())
        };

        Span::current().record("cart_id", field::display(&cart_id));

        let update = self
            .api
            .plus_cart(cart_id.clone())
            .await
            .inspect_err(|error| warn!(%error, "plus cart request failed"))?;

        self.apply(
            ticket,
            ViewPatch::Line {
                cart_id,
                quantity: update.quantity,
                summary: update.summary(),
            },
        )
    }

    /// Take one from the control's line via `/minuscart`.
    ///
    /// Nothing is sent unless the displayed quantity parses to more than one.
    ///
    /// # Errors
    ///
    /// Returns an error if the control has no cart id, the quantity element is
    /// missing, the request fails, or an element the update needs is missing.
    #[instrument(name = "cart.decrement", skip_all, fields(cart_id = field::Empty))]
    pub async fn decrement(&self, control: &P::Node) -> Result<Outcome, CartError> {
        let (cart_id, ticket) = {
            let mut view = self.view.borrow_mut();
            let cart_id = view.cart_id_of(control)?;
            let displayed = view.displayed_quantity(&cart_id)?;

            match parse_displayed_quantity(&displayed) {
                Some(current) if current > 1 => {}
                Some(current) => {
                    debug!(%cart_id, current, "quantity at floor, not decrementing");

                    return Ok(Outcome::Skipped(SkipReason::AtMinimum(current)));
                }
                None => {
                    debug!(%cart_id, %displayed, "quantity unreadable, not decrementing");

                    return Ok(Outcome::Skipped(SkipReason::Unparseable(displayed)));
                }
            }

            (cart_id, view.issue())
        };

        Span::current().record("cart_id", field::display(&cart_id));

        let update = self
            .api
            .minus_cart(cart_id.clone())
            .await
            .inspect_err(|error| warn!(%error, "minus cart request failed"))?;

        self.apply(
            ticket,
            ViewPatch::Line {
                cart_id,
                quantity: update.quantity,
                summary: update.summary(),
            },
        )
    }

    /// Delete the control's line via `/removecart`, then detach its row.
    ///
    /// # Errors
    ///
    /// Returns an error if the control has no cart id or row, the request
    /// fails, or a total element is missing.
    #[instrument(name = "cart.remove", skip_all, fields(cart_id = field::Empty))]
    pub async fn remove(&self, control: &P::Node) -> Result<Outcome, CartError> {
        let (cart_id, row, ticket) = {
            let mut view = self.view.borrow_mut();
            let cart_id = view.cart_id_of(control)?;
            let row = view.row_of(control, &cart_id)?;

            (cart_id, row, view.issue())
        };

        Span::current().record("cart_id", field::display(&cart_id));

        let update = self
            .api
            .remove_cart(cart_id.clone())
            .await
            .inspect_err(|error| warn!(%error, "remove cart request failed"))?;

        self.apply(
            ticket,
            ViewPatch::Removed {
                cart_id,
                row,
                summary: update.summary(),
            },
        )
    }

    fn apply(&self, ticket: Ticket, patch: ViewPatch<P::Node>) -> Result<Outcome, CartError> {
        let rendered = self
            .view
            .borrow_mut()
            .render(ticket, patch)
            .inspect_err(|error| warn!(%error, "cart update could not be rendered"))?;

        if rendered.is_stale() {
            info!(ticket = ticket.get(), "discarded superseded cart response");

            return Ok(Outcome::Discarded);
        }

        info!(ticket = ticket.get(), ?rendered, "applied cart response");

        Ok(Outcome::Applied(rendered))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        api::{CartApiError, MockCartApi, QuantityUpdate, RemovalUpdate},
        fixtures::CartPageFixture,
        page::{Element, MemoryPage},
    };

    use super::*;

    fn update(quantity: i64, amount: &str, total: &str) -> Result<QuantityUpdate, rust_decimal::Error> {
        Ok(QuantityUpdate {
            quantity,
            amount: Decimal::from_str(amount)?,
            total: Decimal::from_str(total)?,
        })
    }

    fn strict_api() -> MockCartApi {
        let mut api = MockCartApi::new();

        api.expect_plus_cart().never();
        api.expect_minus_cart().never();
        api.expect_remove_cart().never();

        api
    }

    #[tokio::test]
    async fn increment_renders_the_response() -> TestResult {
        let fixture = CartPageFixture::build(&[("42", 4)], "40", "110")?;
        let line = fixture.line("42")?;
        let response = update(5, "10", "50")?;

        let mut api = MockCartApi::new();
        api.expect_plus_cart()
            .once()
            .withf(|cart_id| cart_id.as_str() == "42")
            .return_once(move |_| Ok(response));
        api.expect_minus_cart().never();
        api.expect_remove_cart().never();

        let handler = CartHandler::new(api, fixture.page);

        let outcome = handler.increment(&line.plus).await?;

        assert!(matches!(outcome, Outcome::Applied(_)), "got {outcome:?}");

        let view = handler.view();
        assert_eq!(view.page().text(&line.quantity), "5");
        assert_eq!(view.page().text(&fixture.subtotal), "10");
        assert_eq!(view.page().text(&fixture.total), "50");

        Ok(())
    }

    #[tokio::test]
    async fn decrement_at_one_sends_nothing() -> TestResult {
        let fixture = CartPageFixture::build(&[("7", 1)], "15", "85")?;
        let line = fixture.line("7")?;

        let handler = CartHandler::new(strict_api(), fixture.page);

        let outcome = handler.decrement(&line.minus).await?;

        assert_eq!(outcome, Outcome::Skipped(SkipReason::AtMinimum(1)));
        assert_eq!(handler.view().page().text(&line.quantity), "1");

        Ok(())
    }

    #[tokio::test]
    async fn decrement_with_unreadable_quantity_sends_nothing() -> TestResult {
        let mut fixture = CartPageFixture::build(&[("7", 1)], "15", "85")?;
        let line = fixture.line("7")?;
        fixture.page.set_text(&line.quantity, "n/a");

        let handler = CartHandler::new(strict_api(), fixture.page);

        let outcome = handler.decrement(&line.minus).await?;

        assert_eq!(
            outcome,
            Outcome::Skipped(SkipReason::Unparseable("n/a".to_string()))
        );

        Ok(())
    }

    #[tokio::test]
    async fn decrement_above_one_renders_the_response() -> TestResult {
        let fixture = CartPageFixture::build(&[("7", 2)], "30", "100")?;
        let line = fixture.line("7")?;
        let response = update(1, "15", "85")?;

        let mut api = MockCartApi::new();
        api.expect_minus_cart()
            .once()
            .withf(|cart_id| cart_id.as_str() == "7")
            .return_once(move |_| Ok(response));
        api.expect_plus_cart().never();
        api.expect_remove_cart().never();

        let handler = CartHandler::new(api, fixture.page);

        handler.decrement(&line.minus).await?;

        let view = handler.view();
        assert_eq!(view.page().text(&line.quantity), "1");
        assert_eq!(view.page().text(&fixture.subtotal), "15");
        assert_eq!(view.page().text(&fixture.total), "85");

        Ok(())
    }

    #[tokio::test]
    async fn remove_detaches_the_row_after_the_server_confirms() -> TestResult {
        let fixture = CartPageFixture::build(&[("3", 2), ("4", 1)], "50", "120")?;
        let line = fixture.line("3")?;
        let other = fixture.line("4")?;
        let response = RemovalUpdate {
            amount: Decimal::from(20),
            total: Decimal::from(90),
        };

        let mut api = MockCartApi::new();
        api.expect_remove_cart()
            .once()
            .withf(|cart_id| cart_id.as_str() == "3")
            .return_once(move |_| Ok(response));
        api.expect_plus_cart().never();
        api.expect_minus_cart().never();

        let handler = CartHandler::new(api, fixture.page);

        handler.remove(&line.remove).await?;

        let view = handler.view();
        assert!(!view.page().is_connected(&line.row));
        assert!(view.page().is_connected(&other.row));
        assert_eq!(view.page().text(&fixture.subtotal), "20");
        assert_eq!(view.page().text(&fixture.total), "90");

        Ok(())
    }

    #[tokio::test]
    async fn failed_request_leaves_the_page_alone() -> TestResult {
        let fixture = CartPageFixture::build(&[("3", 2)], "50", "120")?;
        let line = fixture.line("3")?;

        let mut api = MockCartApi::new();
        api.expect_remove_cart()
            .once()
            .return_once(|_| Err(CartApiError::UnexpectedResponse("500".to_string())));
        api.expect_plus_cart().never();
        api.expect_minus_cart().never();

        let handler = CartHandler::new(api, fixture.page);

        let result = handler.remove(&line.remove).await;

        assert!(
            matches!(result, Err(CartError::Api(_))),
            "expected Api error, got {result:?}"
        );

        let view = handler.view();
        assert!(view.page().is_connected(&line.row));
        assert_eq!(view.page().text(&fixture.total), "120");

        Ok(())
    }

    #[tokio::test]
    async fn click_dispatches_on_control_class() -> TestResult {
        let fixture = CartPageFixture::build(&[("8", 3)], "30", "100")?;
        let line = fixture.line("8")?;
        let plus = update(4, "40", "110")?;
        let minus = update(3, "30", "100")?;

        let mut api = MockCartApi::new();
        api.expect_plus_cart().once().return_once(move |_| Ok(plus));
        api.expect_minus_cart().once().return_once(move |_| Ok(minus));
        api.expect_remove_cart().never();

        let handler = CartHandler::new(api, fixture.page);

        handler.click(&line.plus).await?;
        assert_eq!(handler.view().page().text(&line.quantity), "4");

        handler.click(&line.minus).await?;
        assert_eq!(handler.view().page().text(&line.quantity), "3");

        Ok(())
    }

    #[tokio::test]
    async fn click_on_other_elements_is_rejected() -> TestResult {
        let mut page = MemoryPage::new();
        let root = page.root();
        let button = page.append(root, Element::new("button").with_class("btn"))?;

        let handler = CartHandler::new(strict_api(), page);

        let result = handler.click(&button).await;

        assert!(
            matches!(result, Err(CartError::UnknownControl)),
            "expected UnknownControl, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_without_a_row_sends_nothing() -> TestResult {
        let mut page = MemoryPage::new();
        let root = page.root();
        let shallow = page.append(
            root,
            Element::new("a")
                .with_class("remove-cart")
                .with_attribute("pid", "1"),
        )?;

        let handler = CartHandler::new(strict_api(), page);

        let result = handler.remove(&shallow).await;

        assert!(
            matches!(result, Err(CartError::MissingRow { depth: 4, .. })),
            "expected MissingRow, got {result:?}"
        );

        Ok(())
    }
}
