//! Table presence reconciler
//!
//! Diffs each polled snapshot against the previously applied one by table
//! identifier and emits the resulting state transitions. Tables that stay
//! occupied (or stay free) produce nothing, so replaying a snapshot is a
//! no-op.

use super::TableId;
use super::snapshot::TableSnapshot;
use crate::sequence::SequenceGuard;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableState {
    /// No open order
    #[default]
    Idle,
    /// At least one open order
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableTransition {
    pub table: TableId,
    pub from: TableState,
    pub to: TableState,
}

#[derive(Debug, Clone)]
pub struct TablePresence {
    /// Rendered universe, fixed at construction
    states: BTreeMap<TableId, TableState>,
    /// Last applied snapshot, restricted to the universe
    previous: TableSnapshot,
    sequence: SequenceGuard,
}

impl TablePresence {
    /// All tables of `universe` start out idle
    pub fn new<T: Into<TableId>>(universe: impl IntoIterator<Item = T>) -> Self {
        Self {
            states: universe
                .into_iter()
                .map(|t| (t.into(), TableState::Idle))
                .collect(),
            previous: TableSnapshot::new(),
            sequence: SequenceGuard::new(),
        }
    }

    pub fn state(&self, table: &str) -> Option<TableState> {
        self.states.get(table).copied()
    }

    pub fn active_tables(&self) -> impl Iterator<Item = &TableId> {
        self.states
            .iter()
            .filter(|(_, s)| **s == TableState::Active)
            .map(|(t, _)| t)
    }

    pub fn previous(&self) -> &TableSnapshot {
        &self.previous
    }

    /// Reconcile against a new snapshot
    ///
    /// Tables outside the universe are ignored. The stored snapshot is
    /// replaced, never merged.
    pub fn apply(&mut self, mut snapshot: TableSnapshot) -> Vec<TableTransition> {
        snapshot.retain(|t| {
            let known = self.states.contains_key(t);
            if !known {
                tracing::debug!(table = %t, "Ignoring unknown table in snapshot");
            }
            known
        });

        let removed: Vec<TableId> = self.previous.difference(&snapshot).cloned().collect();
        let added: Vec<TableId> = snapshot.difference(&self.previous).cloned().collect();

        let mut transitions = Vec::with_capacity(removed.len() + added.len());
        for table in removed {
            if let Some(t) = self.transition(table, TableState::Idle) {
                transitions.push(t);
            }
        }
        for table in added {
            if let Some(t) = self.transition(table, TableState::Active) {
                transitions.push(t);
            }
        }

        self.previous = snapshot;
        transitions
    }

    /// [`apply`](Self::apply) unless a newer response was already applied
    ///
    /// Returns `None` for a stale response.
    pub fn apply_sequenced(&mut self, seq: u64, snapshot: TableSnapshot) -> Option<Vec<TableTransition>> {
        if !self.sequence.admit(seq) {
            tracing::debug!(
                seq,
                last_applied = ?self.sequence.last_applied(),
                "Discarding stale occupancy snapshot"
            );
            return None;
        }
        Some(self.apply(snapshot))
    }

    fn transition(&mut self, table: TableId, to: TableState) -> Option<TableTransition> {
        let state = self.states.get_mut(&table)?;
        if *state == to {
            return None;
        }
        let from = std::mem::replace(state, to);
        Some(TableTransition { table, from, to })
    }
}
