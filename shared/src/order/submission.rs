//! Order submission payload
//!
//! What the service view posts when the waiter sends the current selection.
//! The nonce lets the server drop a double-submitted order.

use super::line::LineId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmittedItem {
    pub product_id: LineId,
    pub amount: Decimal,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSubmission {
    pub table: String,
    pub nonce: u32,
    pub items: Vec<SubmittedItem>,
}

impl OrderSubmission {
    /// Fresh 32-bit nonce for a new submission
    pub fn random_nonce() -> u32 {
        rand::random()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
