//! Order cart
//!
//! - `line` / `registry`: the lines of the current view, ordered by id
//! - `sanitize`: quantity parsing and clamping
//! - `cart`: quantity edits, totals and the overview
//! - `settlement`: partial payment passes over the cart
//! - `submission`: payload for sending a new order

pub mod cart;
pub mod line;
pub mod registry;
pub mod sanitize;
pub mod settlement;
pub mod submission;

// Re-exports
pub use cart::{CartEngine, CartSummary, LineView, OverviewEntry};
pub use line::{LineId, MAX_UNIT_PRICE, OrderLine};
pub use registry::LineRegistry;
pub use sanitize::{
    MAX_SAFE_QUANTITY, canonical_quantity, clamp_quantity, parse_quantity, sanitize,
    sanitize_input,
};
pub use settlement::{SettlementOutcome, SettlementReport};
pub use submission::{OrderSubmission, SubmittedItem};
