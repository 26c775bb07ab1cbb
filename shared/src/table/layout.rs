//! Table layout configuration
//!
//! The dining room is a grid; each table covers a rectangle of cells and is
//! identified by its name. The set of names is the universe the presence
//! reconciler works on.
//!
//! JSON format:
//!
//! ```json
//! { "size": [4, 2], "names": [[0, 0, 1, 1, "T1"], [1, 0, 2, 1, "T2"]] }
//! ```
//!
//! Each placement is `[x, y, width, height, name]`.

use super::TableId;
use crate::error::LayoutError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Largest grid (columns × rows) a layout may declare
pub const MAX_GRID_CELLS: u64 = 65_536;

/// One table's rectangle on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, u32, u32, u32, TableId)", into = "(u32, u32, u32, u32, TableId)")]
pub struct TablePlacement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub name: TableId,
}

impl From<(u32, u32, u32, u32, TableId)> for TablePlacement {
    fn from((x, y, width, height, name): (u32, u32, u32, u32, TableId)) -> Self {
        Self {
            x,
            y,
            width,
            height,
            name,
        }
    }
}

impl From<TablePlacement> for (u32, u32, u32, u32, TableId) {
    fn from(p: TablePlacement) -> Self {
        (p.x, p.y, p.width, p.height, p.name)
    }
}

impl TablePlacement {
    /// Whether the two rectangles share at least one cell
    pub fn overlaps(&self, other: &TablePlacement) -> bool {
        let (a_right, a_bottom) = (
            u64::from(self.x) + u64::from(self.width),
            u64::from(self.y) + u64::from(self.height),
        );
        let (b_right, b_bottom) = (
            u64::from(other.x) + u64::from(other.width),
            u64::from(other.y) + u64::from(other.height),
        );
        u64::from(self.x) < b_right
            && u64::from(other.x) < a_right
            && u64::from(self.y) < b_bottom
            && u64::from(other.y) < a_bottom
    }
}

/// Content of one grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GridCell {
    Empty,
    /// Top-left cell of a table
    Anchor {
        name: TableId,
        width: u32,
        height: u32,
    },
    /// Covered by a table anchored elsewhere
    Covered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    /// (columns, rows)
    pub size: (u32, u32),
    #[serde(rename = "names")]
    pub tables: Vec<TablePlacement>,
}

impl TableLayout {
    /// Parse and validate
    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        let layout: Self = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Reject layouts that cannot be rendered
    ///
    /// Overlapping tables are tolerated but logged.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let (cols, rows) = self.size;
        self.check_size()?;
        if self.tables.is_empty() {
            return Err(LayoutError::NoTables);
        }

        let mut names = HashSet::new();
        for table in &self.tables {
            if table.width == 0 || table.height == 0 {
                return Err(LayoutError::ZeroSized(table.name.clone()));
            }
            let right = table.x.checked_add(table.width);
            let bottom = table.y.checked_add(table.height);
            if !matches!((right, bottom), (Some(r), Some(b)) if r <= cols && b <= rows) {
                return Err(LayoutError::OutOfBounds {
                    name: table.name.clone(),
                    cols,
                    rows,
                });
            }
            if !names.insert(table.name.as_str()) {
                return Err(LayoutError::DuplicateName(table.name.clone()));
            }
        }

        for (i, a) in self.tables.iter().enumerate() {
            for b in &self.tables[i + 1..] {
                if a.overlaps(b) {
                    tracing::warn!(first = %a.name, second = %b.name, "Duplicate table position, check the layout");
                }
            }
        }
        Ok(())
    }

    fn check_size(&self) -> Result<(), LayoutError> {
        let (cols, rows) = self.size;
        if cols == 0 || rows == 0 {
            return Err(LayoutError::EmptyGrid { cols, rows });
        }
        if u64::from(cols) * u64::from(rows) > MAX_GRID_CELLS {
            return Err(LayoutError::GridTooLarge { cols, rows });
        }
        Ok(())
    }

    /// Table names in configuration order
    pub fn names(&self) -> impl Iterator<Item = &TableId> {
        self.tables.iter().map(|t| &t.name)
    }

    /// The only table, if the layout has exactly one
    ///
    /// Such a layout has no use for the table overview.
    pub fn single_table(&self) -> Option<&TableId> {
        match self.tables.as_slice() {
            [only] => Some(&only.name),
            _ => None,
        }
    }

    /// Row-major cell grid
    ///
    /// Later tables win on overlapping cells.
    pub fn grid(&self) -> Result<Vec<Vec<GridCell>>, LayoutError> {
        self.check_size()?;
        let (cols, rows) = self.size;
        let mut grid = vec![vec![GridCell::Empty; cols as usize]; rows as usize];

        for table in &self.tables {
            for y in table.y..table.y.saturating_add(table.height).min(rows) {
                for x in table.x..table.x.saturating_add(table.width).min(cols) {
                    let Some(cell) = grid
                        .get_mut(y as usize)
                        .and_then(|row| row.get_mut(x as usize))
                    else {
                        continue;
                    };
                    *cell = GridCell::Covered;
                }
            }
            if let Some(cell) = grid
                .get_mut(table.y as usize)
                .and_then(|row| row.get_mut(table.x as usize))
            {
                *cell = GridCell::Anchor {
                    name: table.name.clone(),
                    width: table.width,
                    height: table.height,
                };
            }
        }

        Ok(grid)
    }
}
