//! Error types for the shared crate
//!
//! Quantity input never fails (it is clamped instead), so the only errors
//! here come from building a registry or loading a table layout.

use crate::order::LineId;
use crate::table::TableId;
use thiserror::Error;

/// Line registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two lines with the same id in one view
    #[error("Duplicate line id: {0}")]
    DuplicateLine(LineId),
}

/// Table layout errors
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Failed to read layout file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid layout JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Layout must contain at least one table")]
    NoTables,

    #[error("Layout grid must be at least 1x1, got {cols}x{rows}")]
    EmptyGrid { cols: u32, rows: u32 },

    #[error("Layout grid {cols}x{rows} exceeds the supported size")]
    GridTooLarge { cols: u32, rows: u32 },

    #[error("Table {0} has zero width or height")]
    ZeroSized(TableId),

    #[error("Table {name} does not fit into the {cols}x{rows} grid")]
    OutOfBounds { name: TableId, cols: u32, rows: u32 },

    #[error("Duplicate table name: {0}")]
    DuplicateName(TableId),
}
