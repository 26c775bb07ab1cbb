//! Cart engine
//!
//! Owns the line registry of one view, routes every quantity edit through
//! the sanitizer and derives totals and the order overview from scratch on
//! each recompute. Rendering is left to the caller.

use super::line::{LineId, OrderLine};
use super::registry::LineRegistry;
use super::sanitize::{canonical_quantity, clamp_quantity, parse_quantity, sanitize};
use super::submission::{OrderSubmission, SubmittedItem};
use crate::money::{format_amount, format_euro};
use rust_decimal::Decimal;
use serde::Serialize;

/// One entry of the human-readable overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewEntry {
    pub line_id: LineId,
    /// e.g. "4x"
    pub quantity_label: String,
    pub product_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// e.g. "10.00€"
    pub line_total_label: String,
}

impl OverviewEntry {
    /// The two list items shown in the overview: "4x Fries (no salt)" and "10.00€"
    pub fn text_lines(&self) -> [String; 2] {
        let mut text = format!("{} {}", self.quantity_label, self.product_label);
        if let Some(comment) = &self.comment {
            text.push_str(&format!(" ({comment})"));
        }
        [text, self.line_total_label.clone()]
    }
}

/// Per-line derived state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineView {
    pub id: LineId,
    pub quantity: Decimal,
    pub quantity_label: String,
    pub derived_cost: Decimal,
    pub cost_label: String,
    pub highlighted: bool,
    pub customized: bool,
}

/// Result of a recompute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Sum of all line costs, full precision
    pub total: Decimal,
    /// Lines with quantity > 0, ascending id
    pub overview: Vec<OverviewEntry>,
    /// Every line, ascending id
    pub lines: Vec<LineView>,
}

impl CartSummary {
    pub fn total_label(&self) -> String {
        format_amount(self.total)
    }

    pub fn overview_text(&self) -> Vec<String> {
        self.overview
            .iter()
            .flat_map(OverviewEntry::text_lines)
            .collect()
    }

    pub fn line(&self, id: LineId) -> Option<&LineView> {
        self.lines.iter().find(|l| l.id == id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CartEngine {
    registry: LineRegistry,
}

impl CartEngine {
    pub fn new(registry: LineRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &LineRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut LineRegistry {
        &mut self.registry
    }

    pub fn line(&self, id: LineId) -> Option<&OrderLine> {
        self.registry.get(id)
    }

    /// +/- control: add `delta` to the line's quantity
    ///
    /// The line's `max_settleable` bounds the result when present. Unknown
    /// ids leave the registry untouched.
    pub fn adjust_quantity(&mut self, id: LineId, delta: i64) -> CartSummary {
        match self.registry.get_mut(id) {
            Some(line) => {
                let quantity = sanitize(line.quantity(), Decimal::from(delta), line.max_settleable());
                line.set_quantity(quantity);
            }
            None => tracing::debug!(line_id = id, "adjust_quantity on unknown line ignored"),
        }
        self.recompute()
    }

    /// Direct entry in the quantity input
    ///
    /// Always re-sanitizes against the line's current bound, which may have
    /// changed since the value was typed.
    pub fn set_quantity_direct(&mut self, id: LineId, raw: &str) -> CartSummary {
        match self.registry.get_mut(id) {
            Some(line) => {
                let quantity = sanitize(parse_quantity(raw), Decimal::ZERO, line.max_settleable());
                line.set_quantity(quantity);
            }
            None => tracing::debug!(line_id = id, "set_quantity_direct on unknown line ignored"),
        }
        self.recompute()
    }

    /// Attach or clear (blank text) the customization note
    pub fn set_comment(&mut self, id: LineId, comment: impl Into<String>) -> CartSummary {
        match self.registry.get_mut(id) {
            Some(line) => line.set_comment(comment),
            None => tracing::debug!(line_id = id, "set_comment on unknown line ignored"),
        }
        self.recompute()
    }

    /// Derive line costs, the aggregate total and the overview
    ///
    /// Pure function of the registry; the total is summed afresh on every
    /// call.
    pub fn recompute(&self) -> CartSummary {
        let mut summary = CartSummary::default();

        for line in self.registry.iter() {
            let cost = line.derived_cost();
            summary.total = summary.total.checked_add(cost).unwrap_or(Decimal::MAX);

            let quantity_label = canonical_quantity(line.quantity());
            let highlighted = line.is_highlighted();

            if highlighted {
                summary.overview.push(OverviewEntry {
                    line_id: line.id(),
                    quantity_label: format!("{quantity_label}x"),
                    product_label: line.name().to_string(),
                    comment: line.comment().map(str::to_string),
                    line_total_label: format_euro(cost),
                });
            }

            summary.lines.push(LineView {
                id: line.id(),
                quantity: line.quantity(),
                quantity_label,
                derived_cost: cost,
                cost_label: format_amount(cost),
                highlighted,
                customized: line.is_customized(),
            });
        }

        tracing::debug!(
            lines = summary.lines.len(),
            selected = summary.overview.len(),
            total = %summary.total,
            "Cart recomputed"
        );
        summary
    }

    /// Payload for submitting the current selection as a new order
    pub fn to_submission(&self, table: impl Into<String>, nonce: u32) -> OrderSubmission {
        let items = self
            .registry
            .iter()
            .filter(|line| line.is_highlighted())
            .map(|line| SubmittedItem {
                product_id: line.id(),
                amount: clamp_quantity(line.quantity(), None),
                comment: line.comment().unwrap_or_default().to_string(),
            })
            .collect();

        OrderSubmission {
            table: table.into(),
            nonce,
            items,
        }
    }
}
