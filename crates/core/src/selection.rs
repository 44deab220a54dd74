//! Per-session destination selection with toggle semantics.
//!
//! Owned by the planner session and passed explicitly to the itinerary
//! builder. Never persisted.

use serde::Serialize;

use crate::catalog::Destination;
use crate::types::{DayCount, DestinationId};

/// What a toggle did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionChange {
    Added,
    Removed,
}

/// Ordered, duplicate-free list of chosen destinations (keyed by id).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    destinations: Vec<Destination>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the destination if absent, remove it if present.
    pub fn toggle(&mut self, destination: &Destination) -> SelectionChange {
        if self.remove(destination.id).is_some() {
            SelectionChange::Removed
        } else {
            self.destinations.push(destination.clone());
            SelectionChange::Added
        }
    }

    /// Append a destination. Returns `false` if it was already selected.
    pub fn add(&mut self, destination: Destination) -> bool {
        if self.contains(destination.id) {
            return false;
        }
        self.destinations.push(destination);
        true
    }

    /// Remove by id, returning the removed destination.
    pub fn remove(&mut self, id: DestinationId) -> Option<Destination> {
        let index = self.destinations.iter().position(|d| d.id == id)?;
        Some(self.destinations.remove(index))
    }

    pub fn contains(&self, id: DestinationId) -> bool {
        self.destinations.iter().any(|d| d.id == id)
    }

    pub fn clear(&mut self) {
        self.destinations.clear();
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Selected destinations in selection order.
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn ids(&self) -> Vec<DestinationId> {
        self.destinations.iter().map(|d| d.id).collect()
    }

    /// Sum of the selected stay lengths, saturating at `DayCount::MAX`.
    pub fn total_stay_days(&self) -> DayCount {
        self.destinations
            .iter()
            .map(|d| d.duration_days)
            .fold(0, DayCount::saturating_add)
    }
}
