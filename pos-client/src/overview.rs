//! Table overview controller

use shared::table::{TableId, TableLayout, TablePresence, TableSnapshot, TableTransition};

/// State behind the table overview page
///
/// Owns the presence reconciler for the tables of the layout. The occupancy
/// poller is its only writer.
#[derive(Debug, Clone)]
pub struct ServiceOverview {
    presence: TablePresence,
    landing_table: Option<TableId>,
}

impl ServiceOverview {
    pub fn from_layout(layout: &TableLayout) -> Self {
        Self {
            presence: TablePresence::new(layout.names().cloned()),
            landing_table: layout.single_table().cloned(),
        }
    }

    /// With a single table the overview is skipped and that table opened directly
    pub fn landing_table(&self) -> Option<&TableId> {
        self.landing_table.as_ref()
    }

    pub fn presence(&self) -> &TablePresence {
        &self.presence
    }

    /// Apply a polled snapshot; `None` if a newer one was already applied
    pub fn apply_snapshot(&mut self, seq: u64, snapshot: TableSnapshot) -> Option<Vec<TableTransition>> {
        let transitions = self.presence.apply_sequenced(seq, snapshot)?;
        for t in &transitions {
            tracing::info!(table = %t.table, from = ?t.from, to = ?t.to, "Table state changed");
        }
        Some(transitions)
    }
}
