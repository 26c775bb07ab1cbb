//! Partial settlement
//!
//! In the "pay partially" view a line's `quantity` is the amount being paid
//! in the current pass and `max_settleable` is what is still unpaid. A pass
//! removes fully paid lines, shrinks the remainder of partially paid ones
//! and resets every staged amount, so the overview is empty afterwards.
//!
//! Settlement is a multi-pass workflow: the caller is told when the last
//! line is gone via [`SettlementOutcome::Completed`].

use super::cart::{CartEngine, CartSummary};
use super::line::{LineId, OrderLine};
use super::sanitize::clamp_quantity;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// Unpaid lines remain
    Pending,
    /// Registry is empty, hand control back to the table overview
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementReport {
    /// Lines paid in full and removed
    pub settled: Vec<LineId>,
    /// Lines paid in part, remainder reduced
    pub reduced: Vec<LineId>,
    pub summary: CartSummary,
    pub outcome: SettlementOutcome,
}

enum LineSettlement {
    Settled,
    Reduced,
    Untouched,
    Unbounded,
}

/// Apply the staged amount of one line
///
/// Comparison happens on sanitized decimals, so "5", "5.0" and "5.00" all
/// count as the full remainder.
fn apply_line(line: &mut OrderLine) -> LineSettlement {
    let Some(max) = line.max_settleable() else {
        return LineSettlement::Unbounded;
    };
    let amount = clamp_quantity(line.quantity(), Some(max));

    if amount == max {
        LineSettlement::Settled
    } else if amount > Decimal::ZERO {
        line.set_max_settleable((max - amount).normalize());
        line.set_quantity(Decimal::ZERO);
        LineSettlement::Reduced
    } else {
        LineSettlement::Untouched
    }
}

impl CartEngine {
    /// Settle every line with its staged quantity
    pub fn settle_pass(&mut self) -> SettlementReport {
        let ids = self.registry().ids();
        self.settle_lines(&ids)
    }

    /// Stage `amount_now` on one line and settle only that line
    ///
    /// The amount is clamped into `[0, max_settleable]` first. Unknown ids
    /// change nothing.
    pub fn settle(&mut self, id: LineId, amount_now: Decimal) -> SettlementReport {
        match self.registry_mut().get_mut(id) {
            Some(line) => {
                let staged = clamp_quantity(amount_now, line.max_settleable());
                line.set_quantity(staged);
                self.settle_lines(&[id])
            }
            None => {
                tracing::debug!(line_id = id, "settle on unknown line ignored");
                SettlementReport {
                    settled: Vec::new(),
                    reduced: Vec::new(),
                    summary: self.recompute(),
                    outcome: self.outcome(),
                }
            }
        }
    }

    /// Stage the full remainder of every line
    pub fn settle_all(&mut self) -> CartSummary {
        for line in self.registry_mut().iter_mut() {
            if let Some(max) = line.max_settleable() {
                line.set_quantity(max);
            }
        }
        self.recompute()
    }

    /// Clear every staged amount
    pub fn settle_none(&mut self) -> CartSummary {
        for line in self.registry_mut().iter_mut() {
            line.set_quantity(Decimal::ZERO);
        }
        self.recompute()
    }

    fn outcome(&self) -> SettlementOutcome {
        if self.registry().is_empty() {
            SettlementOutcome::Completed
        } else {
            SettlementOutcome::Pending
        }
    }

    fn settle_lines(&mut self, ids: &[LineId]) -> SettlementReport {
        let mut settled = Vec::new();
        let mut reduced = Vec::new();

        for &id in ids {
            let Some(line) = self.registry_mut().get_mut(id) else {
                continue;
            };
            match apply_line(line) {
                LineSettlement::Settled => {
                    self.registry_mut().remove(id);
                    settled.push(id);
                }
                LineSettlement::Reduced => reduced.push(id),
                LineSettlement::Untouched => {}
                LineSettlement::Unbounded => {
                    tracing::warn!(line_id = id, "Line has no settleable remainder, skipped");
                }
            }
        }

        // Staged amounts never outlive a pass, so the overview comes back empty
        for line in self.registry_mut().iter_mut() {
            line.set_quantity(Decimal::ZERO);
        }

        let summary = self.recompute();
        let outcome = self.outcome();

        tracing::info!(
            settled = ?settled,
            reduced = ?reduced,
            remaining = self.registry().len(),
            completed = outcome == SettlementOutcome::Completed,
            "Settlement pass applied"
        );

        SettlementReport {
            settled,
            reduced,
            summary,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::registry::LineRegistry;

    fn bounded(id: LineId, price: i64, max: i64, staged: i64) -> OrderLine {
        OrderLine::new(id, format!("P{id}"), Decimal::from(price))
            .with_max_settleable(Decimal::from(max))
            .with_quantity(Decimal::from(staged))
    }

    fn engine(lines: Vec<OrderLine>) -> CartEngine {
        CartEngine::new(LineRegistry::from_lines(lines).unwrap())
    }

    #[test]
    fn test_two_line_scenario() {
        let mut cart = engine(vec![bounded(1, 2, 5, 5), bounded(2, 3, 5, 3)]);

        let report = cart.settle(1, Decimal::from(5));
        assert_eq!(report.settled, vec![1]);
        assert!(!cart.registry().contains(1));
        assert_eq!(report.outcome, SettlementOutcome::Pending);
        // Line 2 had 3 staged; the pass still leaves nothing selected
        assert_eq!(report.summary.total_label(), "0.00");
        assert!(report.summary.overview.is_empty());
        assert_eq!(cart.line(2).unwrap().quantity(), Decimal::ZERO);
        assert_eq!(cart.line(2).unwrap().max_settleable(), Some(Decimal::from(5)));

        let report = cart.settle(2, Decimal::from(3));
        assert_eq!(report.reduced, vec![2]);
        let line = cart.line(2).unwrap();
        assert_eq!(line.max_settleable(), Some(Decimal::from(2)));
        assert_eq!(line.quantity(), Decimal::ZERO);
        assert!(!line.is_highlighted());
        assert_eq!(report.summary.total_label(), "0.00");
        assert!(report.summary.overview.is_empty());
    }

    #[test]
    fn test_pass_uses_staged_quantities() {
        let mut cart = engine(vec![bounded(1, 2, 5, 5), bounded(2, 3, 5, 3), bounded(3, 1, 2, 0)]);

        let report = cart.settle_pass();

        assert_eq!(report.settled, vec![1]);
        assert_eq!(report.reduced, vec![2]);
        assert_eq!(cart.line(3).unwrap().max_settleable(), Some(Decimal::from(2)));
        assert_eq!(report.summary.total, Decimal::ZERO);
        assert!(report.summary.overview.is_empty());
        assert_eq!(report.outcome, SettlementOutcome::Pending);
    }

    #[test]
    fn test_completed_after_last_line() {
        let mut cart = engine(vec![bounded(1, 2, 3, 1), bounded(2, 4, 1, 1)]);

        let first = cart.settle_pass();
        assert_eq!(first.outcome, SettlementOutcome::Pending);
        assert_eq!(cart.line(1).unwrap().max_settleable(), Some(Decimal::from(2)));

        cart.settle_all();
        let second = cart.settle_pass();
        assert_eq!(second.settled, vec![1]);
        assert_eq!(second.outcome, SettlementOutcome::Completed);
        assert!(cart.registry().is_empty());
    }

    #[test]
    fn test_full_amount_wins_over_formatting() {
        let mut cart = engine(vec![
            OrderLine::new(1, "Wine", Decimal::from(6)).with_max_settleable(Decimal::new(500, 2)),
        ]);
        cart.set_quantity_direct(1, "5.0");
        let report = cart.settle_pass();
        assert_eq!(report.settled, vec![1]);
        assert_eq!(report.outcome, SettlementOutcome::Completed);
    }

    #[test]
    fn test_settle_amount_is_clamped() {
        let mut cart = engine(vec![bounded(1, 2, 4, 0)]);
        let report = cart.settle(1, Decimal::from(99));
        assert_eq!(report.settled, vec![1]);

        let mut cart = engine(vec![bounded(1, 2, 4, 0)]);
        let report = cart.settle(1, Decimal::from(-3));
        assert!(report.settled.is_empty() && report.reduced.is_empty());
        assert_eq!(cart.line(1).unwrap().max_settleable(), Some(Decimal::from(4)));
    }

    #[test]
    fn test_settle_all_and_none() {
        let mut cart = engine(vec![bounded(1, 2, 3, 0), bounded(2, 1, 2, 1)]);

        let summary = cart.settle_all();
        assert_eq!(summary.total, Decimal::from(8));
        assert_eq!(summary.overview.len(), 2);

        let summary = cart.settle_none();
        assert_eq!(summary.total, Decimal::ZERO);
        assert!(summary.overview.is_empty());
    }

    #[test]
    fn test_unbounded_lines_are_skipped() {
        let mut cart = engine(vec![OrderLine::new(1, "Tea", Decimal::ONE).with_quantity(Decimal::from(2))]);
        let report = cart.settle_pass();
        assert!(report.settled.is_empty());
        assert!(cart.registry().contains(1));
        assert_eq!(report.outcome, SettlementOutcome::Pending);
        assert_eq!(report.summary.total_label(), "0.00");
        assert!(report.summary.overview.is_empty());
    }

    #[test]
    fn test_pass_with_mixed_lines_resets_summary() {
        let mut cart = engine(vec![
            bounded(1, 3, 4, 1),
            OrderLine::new(2, "Tea", Decimal::ONE).with_quantity(Decimal::from(2)),
        ]);
        let report = cart.settle_pass();
        assert_eq!(report.reduced, vec![1]);
        assert_eq!(report.summary.total, Decimal::ZERO);
        assert!(report.summary.overview.is_empty());
        assert_eq!(cart.line(2).unwrap().quantity(), Decimal::ZERO);
    }

    #[test]
    fn test_unknown_line_settle_is_noop() {
        let mut cart = engine(vec![bounded(1, 2, 3, 1)]);
        let report = cart.settle(9, Decimal::ONE);
        assert!(report.settled.is_empty() && report.reduced.is_empty());
        assert_eq!(cart.line(1).unwrap().quantity(), Decimal::ONE);
        assert_eq!(cart.line(1).unwrap().max_settleable(), Some(Decimal::from(3)));
    }
}
