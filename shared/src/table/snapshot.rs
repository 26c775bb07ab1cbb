//! Occupancy snapshot

use super::TableId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of occupied tables delivered by one poll
///
/// Always replaces the previous snapshot wholesale. Deserializes from the
/// plain JSON array the occupancy endpoint returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableSnapshot {
    occupied: BTreeSet<TableId>,
}

impl TableSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, table: &str) -> bool {
        self.occupied.contains(table)
    }

    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableId> {
        self.occupied.iter()
    }

    /// Tables in `self` but not in `other`
    pub fn difference<'a>(&'a self, other: &'a TableSnapshot) -> impl Iterator<Item = &'a TableId> {
        self.occupied.difference(&other.occupied)
    }

    /// Keep only tables accepted by `keep`
    pub fn retain(&mut self, keep: impl FnMut(&TableId) -> bool) {
        self.occupied.retain(keep);
    }
}

impl<T: Into<TableId>> FromIterator<T> for TableSnapshot {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            occupied: iter.into_iter().map(Into::into).collect(),
        }
    }
}
