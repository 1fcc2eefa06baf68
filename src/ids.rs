//! Identifiers
//!
//! Names shared between the handler and the surrounding page: the cart line
//! identifier, the element ids the page must expose, and the control classes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Element id of the subtotal text.
pub const SUBTOTAL_ELEMENT_ID: &str = "amount_tt";

/// Element id of the grand-total text.
pub const TOTAL_ELEMENT_ID: &str = "totalamount";

/// Prefix of the per-line quantity element id (`quantity{id}`).
pub const QUANTITY_ELEMENT_PREFIX: &str = "quantity";

/// Attribute carrying the cart line identifier on every control.
pub const CART_ID_ATTRIBUTE: &str = "pid";

/// Number of levels between a remove control and its line item row.
pub const ROW_ANCESTOR_DEPTH: usize = 4;

/// Opaque identifier of a cart line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(String);

impl CartId {
    /// Wrap a raw identifier. Returns `None` for an empty string.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();

        (!raw.is_empty()).then_some(Self(raw))
    }

    /// The identifier as sent in the `cart_id` query parameter.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the element showing this line's quantity.
    pub fn quantity_element_id(&self) -> String {
        format!("{QUANTITY_ELEMENT_PREFIX}{}", self.0)
    }
}

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three kinds of cart control a page can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// `plus-cart`: add one to the line.
    Increase,

    /// `minus-cart`: take one from the line.
    Decrease,

    /// `remove-cart`: delete the line.
    Remove,
}

impl ControlKind {
    /// All control kinds, in binding order.
    pub const ALL: [Self; 3] = [Self::Increase, Self::Decrease, Self::Remove];

    /// CSS class identifying this control on the page.
    pub fn class(self) -> &'static str {
        match self {
            Self::Increase => "plus-cart",
            Self::Decrease => "minus-cart",
            Self::Remove => "remove-cart",
        }
    }

    /// Collaborator endpoint path this control calls.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Increase => "/pluscart",
            Self::Decrease => "/minuscart",
            Self::Remove => "/removecart",
        }
    }

    /// Classify a control by its class list.
    pub fn from_classes<'a>(mut classes: impl Iterator<Item = &'a str>) -> Option<Self> {
        classes.find_map(|class| Self::ALL.into_iter().find(|kind| kind.class() == class))
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cart_id_is_rejected() {
        assert_eq!(CartId::new(""), None);
    }

    #[test]
    fn quantity_element_id_uses_the_raw_identifier() {
        let id = CartId::new("42");

        assert_eq!(
            id.map(|id| id.quantity_element_id()),
            Some("quantity42".to_string())
        );
    }

    #[test]
    fn classifies_controls_by_first_matching_class() {
        let kind = ControlKind::from_classes(["btn", "btn-sm", "minus-cart"].into_iter());

        assert_eq!(kind, Some(ControlKind::Decrease));
    }

    #[test]
    fn unrelated_classes_do_not_classify() {
        let kind = ControlKind::from_classes(["btn", "plus"].into_iter());

        assert_eq!(kind, None);
    }

    #[test]
    fn endpoints_match_controls() {
        assert_eq!(ControlKind::Increase.endpoint(), "/pluscart");
        assert_eq!(ControlKind::Decrease.endpoint(), "/minuscart");
        assert_eq!(ControlKind::Remove.endpoint(), "/removecart");
    }
}
