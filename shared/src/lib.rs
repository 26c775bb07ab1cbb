//! Shared types for the mini POS
//!
//! Client-side state of the service views: the order cart with its
//! quantity rules, totals and partial settlement, and the table occupancy
//! reconciler. Pure state, no I/O; transport lives in `pos-client`.

pub mod error;
pub mod money;
pub mod order;
pub mod sequence;
pub mod table;

// Re-exports
pub use error::{LayoutError, RegistryError};
pub use order::{CartEngine, CartSummary, LineId, LineRegistry, OrderLine, SettlementOutcome};
pub use rust_decimal::Decimal;
pub use sequence::SequenceGuard;
pub use table::{TableId, TableLayout, TablePresence, TableSnapshot, TableState, TableTransition};
