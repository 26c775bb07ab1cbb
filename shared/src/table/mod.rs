//! Table occupancy
//!
//! The table overview shows every table of the layout and marks the ones
//! with open orders. The server is polled for the occupied set and the
//! result is diffed against what is currently shown.

pub mod layout;
pub mod presence;
pub mod snapshot;

/// Table identifier (the table name from the layout)
pub type TableId = String;

// Re-exports
pub use layout::{GridCell, TableLayout, TablePlacement};
pub use presence::{TablePresence, TableState, TableTransition};
pub use snapshot::TableSnapshot;
