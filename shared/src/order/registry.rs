//! Line registry - the ordered set of lines in the current view
//!
//! A single `BTreeMap` keyed by line id, so iteration is always in
//! ascending id order regardless of insertion order. The registry is
//! rebuilt from scratch on every full view load.

use super::line::{LineId, OrderLine};
use crate::error::RegistryError;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineRegistry {
    lines: BTreeMap<LineId, OrderLine>,
}

impl LineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a freshly loaded view
    pub fn from_lines(lines: impl IntoIterator<Item = OrderLine>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for line in lines {
            registry.insert(line)?;
        }
        Ok(registry)
    }

    /// Add a line; ids must be unique
    pub fn insert(&mut self, mut line: OrderLine) -> Result<(), RegistryError> {
        let id = line.id();
        if self.lines.contains_key(&id) {
            return Err(RegistryError::DuplicateLine(id));
        }
        line.enforce_bounds();
        self.lines.insert(id, line);
        Ok(())
    }

    pub fn remove(&mut self, id: LineId) -> Option<OrderLine> {
        self.lines.remove(&id)
    }

    pub fn get(&self, id: LineId) -> Option<&OrderLine> {
        self.lines.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: LineId) -> Option<&mut OrderLine> {
        self.lines.get_mut(&id)
    }

    pub fn contains(&self, id: LineId) -> bool {
        self.lines.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &OrderLine> {
        self.lines.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut OrderLine> {
        self.lines.values_mut()
    }

    pub fn ids(&self) -> Vec<LineId> {
        self.lines.keys().copied().collect()
    }
}
