//! Table view controller
//!
//! Owns the cart of the table currently open on the terminal and keeps the
//! last computed summary for rendering. When a settlement pass empties the
//! cart, control goes back to the table overview through the navigator.

use crate::{ClientResult, HttpClient};
use rust_decimal::Decimal;
use shared::order::{
    CartEngine, CartSummary, LineId, LineRegistry, OrderSubmission, SettlementOutcome,
    SettlementReport,
};
use shared::table::TableId;

/// Route navigation collaborator
pub trait Navigator: Send {
    /// Leave the table view for the table overview
    fn return_to_overview(&mut self, table: &str);
}

pub struct TableSession<N> {
    table: TableId,
    cart: CartEngine,
    navigator: N,
    summary: CartSummary,
}

impl<N: Navigator> TableSession<N> {
    pub fn new(table: impl Into<TableId>, registry: LineRegistry, navigator: N) -> Self {
        let cart = CartEngine::new(registry);
        let summary = cart.recompute();
        Self {
            table: table.into(),
            cart,
            navigator,
            summary,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn cart(&self) -> &CartEngine {
        &self.cart
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Summary as of the last mutation
    pub fn summary(&self) -> &CartSummary {
        &self.summary
    }

    pub fn adjust_quantity(&mut self, id: LineId, delta: i64) -> &CartSummary {
        self.summary = self.cart.adjust_quantity(id, delta);
        &self.summary
    }

    pub fn set_quantity_direct(&mut self, id: LineId, raw: &str) -> &CartSummary {
        self.summary = self.cart.set_quantity_direct(id, raw);
        &self.summary
    }

    pub fn set_comment(&mut self, id: LineId, comment: impl Into<String>) -> &CartSummary {
        self.summary = self.cart.set_comment(id, comment);
        &self.summary
    }

    pub fn settle_all(&mut self) -> &CartSummary {
        self.summary = self.cart.settle_all();
        &self.summary
    }

    pub fn settle_none(&mut self) -> &CartSummary {
        self.summary = self.cart.settle_none();
        &self.summary
    }

    /// "Pay selected": settle every line with its staged amount
    pub fn pay_selected(&mut self) -> SettlementReport {
        let report = self.cart.settle_pass();
        self.finish_settlement(report)
    }

    /// "Pay this line"
    pub fn settle(&mut self, id: LineId, amount_now: Decimal) -> SettlementReport {
        let report = self.cart.settle(id, amount_now);
        self.finish_settlement(report)
    }

    fn finish_settlement(&mut self, report: SettlementReport) -> SettlementReport {
        self.summary = report.summary.clone();
        if report.outcome == SettlementOutcome::Completed {
            tracing::info!(table = %self.table, "All lines settled, returning to overview");
            self.navigator.return_to_overview(&self.table);
        }
        report
    }

    /// Payload for the current selection, `None` if nothing is selected
    pub fn build_submission(&self, nonce: u32) -> Option<OrderSubmission> {
        let submission = self.cart.to_submission(self.table.clone(), nonce);
        if submission.is_empty() {
            tracing::warn!(table = %self.table, "Order does not contain any product, not submitting");
            return None;
        }
        Some(submission)
    }

    /// Send the current selection as a new order
    pub async fn submit(&self, client: &HttpClient) -> ClientResult<Option<OrderSubmission>> {
        let Some(submission) = self.build_submission(OrderSubmission::random_nonce()) else {
            return Ok(None);
        };
        client.submit_order(&submission).await?;
        tracing::info!(
            table = %self.table,
            nonce = submission.nonce,
            items = submission.items.len(),
            "Order submitted"
        );
        Ok(Some(submission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::OrderLine;

    #[derive(Default)]
    struct RecordingNavigator {
        returns: Vec<String>,
    }

    impl Navigator for RecordingNavigator {
        fn return_to_overview(&mut self, table: &str) {
            self.returns.push(table.to_string());
        }
    }

    fn session() -> TableSession<RecordingNavigator> {
        let registry = LineRegistry::from_lines([
            OrderLine::new(1, "Pasta", Decimal::from(9)).with_max_settleable(Decimal::from(2)),
            OrderLine::new(2, "Wine", Decimal::new(450, 2)).with_max_settleable(Decimal::from(1)),
        ])
        .unwrap();
        TableSession::new("T5", registry, RecordingNavigator::default())
    }

    #[test]
    fn test_mutations_refresh_summary() {
        let mut session = session();
        assert_eq!(session.summary().total_label(), "0.00");

        session.adjust_quantity(1, 1);
        session.set_quantity_direct(2, "1");
        assert_eq!(session.summary().total_label(), "13.50");
        assert_eq!(
            session.summary().overview_text(),
            vec!["1x Pasta", "9.00€", "1x Wine", "4.50€"]
        );
    }

    #[test]
    fn test_navigator_called_once_on_completion() {
        let mut session = session();

        session.adjust_quantity(1, 1);
        let report = session.pay_selected();
        assert_eq!(report.outcome, SettlementOutcome::Pending);
        assert!(session.navigator().returns.is_empty());

        session.settle_all();
        let report = session.pay_selected();
        assert_eq!(report.outcome, SettlementOutcome::Completed);
        assert_eq!(session.navigator().returns, vec!["T5"]);
        assert_eq!(session.summary().total_label(), "0.00");
    }

    #[test]
    fn test_settle_single_line() {
        let mut session = session();
        let report = session.settle(2, Decimal::ONE);
        assert_eq!(report.settled, vec![2]);
        assert!(session.navigator().returns.is_empty());
    }

    #[test]
    fn test_build_submission() {
        let mut session = session();
        assert!(session.build_submission(1).is_none());

        session.adjust_quantity(2, 1);
        let submission = session.build_submission(42).unwrap();
        assert_eq!(submission.table, "T5");
        assert_eq!(submission.nonce, 42);
        assert_eq!(submission.items.len(), 1);
        assert_eq!(submission.items[0].product_id, 2);
    }
}
