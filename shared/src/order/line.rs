//! Order line - one product's row of state in a cart or table view

use super::sanitize::clamp_quantity;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Highest accepted unit price
///
/// With quantities capped at `MAX_SAFE_QUANTITY` this keeps every line cost,
/// and the sum of millions of them, well inside `Decimal` range.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Stable line identifier (product id), also the presentation sort key
pub type LineId = i64;

/// One product's presence in the current view
///
/// `quantity` is the only field routinely mutated by user input. In
/// partial-settlement views it is the amount staged for the current pass and
/// `max_settleable` is the unpaid remainder it may not exceed.
///
/// The line cost is never stored; see [`OrderLine::derived_cost`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    id: LineId,
    name: String,
    unit_price: Decimal,
    #[serde(default)]
    quantity: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_settleable: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

impl OrderLine {
    /// Create an empty line (quantity 0, no bound, no comment)
    ///
    /// Prices are clamped into `[0, MAX_UNIT_PRICE]`.
    pub fn new(id: LineId, name: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price: clamp_price(unit_price),
            quantity: Decimal::ZERO,
            max_settleable: None,
            comment: None,
        }
    }

    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = quantity;
        self.enforce_bounds();
        self
    }

    pub fn with_max_settleable(mut self, max: Decimal) -> Self {
        self.max_settleable = Some(max.max(Decimal::ZERO));
        self.enforce_bounds();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.set_comment(comment);
        self
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn max_settleable(&self) -> Option<Decimal> {
        self.max_settleable
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// `unit_price × quantity` at full precision
    ///
    /// Both factors are capped, so the product stays far below `Decimal::MAX`.
    pub fn derived_cost(&self) -> Decimal {
        self.unit_price
            .checked_mul(self.quantity)
            .unwrap_or(Decimal::MAX)
    }

    /// Row highlight state: the line has something staged
    pub fn is_highlighted(&self) -> bool {
        self.quantity > Decimal::ZERO
    }

    /// Whether a customization note is attached
    pub fn is_customized(&self) -> bool {
        self.comment.is_some()
    }

    /// Store an already sanitized quantity
    pub(crate) fn set_quantity(&mut self, quantity: Decimal) {
        self.quantity = quantity;
    }

    pub(crate) fn set_max_settleable(&mut self, max: Decimal) {
        self.max_settleable = Some(max);
    }

    /// Empty or whitespace-only text clears the note
    pub(crate) fn set_comment(&mut self, comment: impl Into<String>) {
        let comment = comment.into();
        self.comment = if comment.trim().is_empty() {
            None
        } else {
            Some(comment)
        };
    }

    /// Re-clamp fields that may have been populated from untrusted input
    pub(crate) fn enforce_bounds(&mut self) {
        self.unit_price = clamp_price(self.unit_price);
        self.max_settleable = self.max_settleable.map(|m| clamp_quantity(m, None));
        self.quantity = clamp_quantity(self.quantity, self.max_settleable);
    }
}

fn clamp_price(price: Decimal) -> Decimal {
    price.clamp(Decimal::ZERO, MAX_UNIT_PRICE)
}
