//! # Bayesian network model layer
//!
//! This module implements the graphical-model structure the merge engine
//! operates on: labelled binary events connected by directed dependencies,
//! each event owning a conditional probability table.
//!
//! ## Lifecycle
//!
//! A network is built in two phases:
//!
//! - **open**: events and dependencies may be added; tables do not exist
//!   yet because parent-index correspondence is undefined.
//! - **finalized**: [`BayesNet::finalize_structure`] freezes the node/edge
//!   set and creates an empty table per event; from then on table lines may
//!   be added and looked up, and [`BayesNet::validate`] may run.
//!
//! ## Determinism
//!
//! Events are stored in creation order in a `Vec` with an `FxHashMap` label
//! index, so iteration order is deterministic and lookups are O(1).
//!
//! ## Example
//!
//! ```rust,ignore
//! use bayfuse_core::BayesNet;
//!
//! let mut net = BayesNet::default();
//! net.create_event("Rain")?;
//! net.create_event("Wet Grass")?;
//! net.create_dependency("Rain", "Wet Grass")?;
//! net.finalize_structure()?;
//! net.event_mut("Rain")?.table_mut()?.add_line(0.2, true, &[])?;
//! ```

use rustc_hash::FxHashMap;

use crate::engine::errors::ModelError;
use crate::engine::table::ProbTable;

/// A binary random variable in a network.
///
/// Identified by its label, which is unique within the owning network.
/// The parent list is ordered — table lines index their arguments by
/// parent position — but logically a set: no duplicates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    label: String,
    parents: Vec<String>,
    table: Option<ProbTable>,
}

impl Event {
    /// The event's unique label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Parent labels in dependency-creation order. Empty if the event has
    /// no parents.
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// The event's probability table.
    ///
    /// Fails with [`ModelError::StructureOpen`] before the owning network
    /// is finalized.
    pub fn table(&self) -> Result<&ProbTable, ModelError> {
        self.table.as_ref().ok_or(ModelError::StructureOpen)
    }

    /// Mutable access to the event's probability table.
    pub fn table_mut(&mut self) -> Result<&mut ProbTable, ModelError> {
        self.table.as_mut().ok_or(ModelError::StructureOpen)
    }
}

/// A Bayesian network of binary events.
///
/// Owns its events and their tables exclusively. See the module docs for
/// the open/finalized lifecycle.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BayesNet {
    events: Vec<Event>,
    index: FxHashMap<String, usize>,
    finalized: bool,
}

impl BayesNet {
    /// Adds an event with no parents.
    ///
    /// Fails if the label already exists or the structure is finalized.
    pub fn create_event(&mut self, label: impl Into<String>) -> Result<(), ModelError> {
        if self.finalized {
            return Err(ModelError::StructureFinalized);
        }
        let label = label.into();
        if self.index.contains_key(&label) {
            return Err(ModelError::DuplicateEvent(label));
        }

        self.index.insert(label.clone(), self.events.len());
        self.events.push(Event {
            label,
            parents: Vec::new(),
            table: None,
        });
        Ok(())
    }

    /// Adds a directed dependency `parent -> child`.
    ///
    /// The child's table becomes conditioned on the parent. Fails if either
    /// label is unknown, the edge already exists, or the structure is
    /// finalized.
    pub fn create_dependency(&mut self, parent: &str, child: &str) -> Result<(), ModelError> {
        if self.finalized {
            return Err(ModelError::StructureFinalized);
        }
        if !self.index.contains_key(parent) {
            return Err(ModelError::UnknownEvent(parent.to_string()));
        }
        let child_index = *self
            .index
            .get(child)
            .ok_or_else(|| ModelError::UnknownEvent(child.to_string()))?;

        let child_event = &mut self.events[child_index];
        if child_event.parents.iter().any(|p| p == parent) {
            return Err(ModelError::DuplicateDependency {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }
        child_event.parents.push(parent.to_string());
        Ok(())
    }

    /// Freezes the node/edge set and creates an empty table per event.
    ///
    /// Required before table lines may be added or looked up. Calling it a
    /// second time is an error.
    pub fn finalize_structure(&mut self) -> Result<(), ModelError> {
        if self.finalized {
            return Err(ModelError::StructureFinalized);
        }
        self.finalized = true;
        for event in &mut self.events {
            event.table = Some(ProbTable::new(event.parents.len()));
        }
        Ok(())
    }

    /// Whether [`finalize_structure`](Self::finalize_structure) has run.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Whether an event with this label exists.
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Looks up an event by label.
    pub fn event(&self, label: &str) -> Result<&Event, ModelError> {
        self.index
            .get(label)
            .map(|&i| &self.events[i])
            .ok_or_else(|| ModelError::UnknownEvent(label.to_string()))
    }

    /// Looks up an event by label with mutable access.
    pub fn event_mut(&mut self, label: &str) -> Result<&mut Event, ModelError> {
        match self.index.get(label) {
            Some(&i) => Ok(&mut self.events[i]),
            None => Err(ModelError::UnknownEvent(label.to_string())),
        }
    }

    /// Iterates events in creation order.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Iterates labels in creation order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|e| e.label.as_str())
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the network has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Checks internal consistency of the finalized network.
    ///
    /// Every event's table must cover each assignment of its parents
    /// exactly once with a probability in [0, 1]. Duplicate assignments and
    /// wrong-width lines are rejected at insertion, so the checks here
    /// catch incomplete tables and any drift that bypassed `add_line`.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.finalized {
            return Err(ModelError::StructureOpen);
        }
        for event in &self.events {
            let table = event.table()?;
            let expected = 1usize << table.arity();
            if table.lines().len() != expected {
                return Err(ModelError::Validation(format!(
                    "event '{}' covers {} of {} parent assignments",
                    event.label,
                    table.lines().len(),
                    expected
                )));
            }
            for line in table.lines() {
                if line.arguments().len() != table.arity() {
                    return Err(ModelError::Validation(format!(
                        "event '{}' has a line of width {} for {} parents",
                        event.label,
                        line.arguments().len(),
                        table.arity()
                    )));
                }
                let p = line.probability(true);
                if !(0.0..=1.0).contains(&p) {
                    return Err(ModelError::Validation(format!(
                        "event '{}' has probability {} outside [0, 1]",
                        event.label, p
                    )));
                }
            }
            for (i, a) in table.lines().iter().enumerate() {
                for b in table.lines().iter().skip(i + 1) {
                    if a.arguments() == b.arguments() {
                        return Err(ModelError::Validation(format!(
                            "event '{}' has duplicate lines for {:?}",
                            event.label,
                            a.arguments()
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> BayesNet {
        let mut net = BayesNet::default();
        net.create_event("A").unwrap();
        net.create_event("B").unwrap();
        net.create_dependency("A", "B").unwrap();
        net
    }

    #[test]
    fn create_event_rejects_duplicate_label() {
        let mut net = BayesNet::default();
        net.create_event("A").unwrap();
        assert!(matches!(
            net.create_event("A"),
            Err(ModelError::DuplicateEvent(_))
        ));
    }

    #[test]
    fn create_event_rejects_finalized_network() {
        let mut net = chain();
        net.finalize_structure().unwrap();
        assert!(matches!(
            net.create_event("C"),
            Err(ModelError::StructureFinalized)
        ));
    }

    #[test]
    fn create_dependency_rejects_unknown_labels() {
        let mut net = chain();
        assert!(matches!(
            net.create_dependency("X", "B"),
            Err(ModelError::UnknownEvent(_))
        ));
        assert!(matches!(
            net.create_dependency("A", "X"),
            Err(ModelError::UnknownEvent(_))
        ));
    }

    #[test]
    fn create_dependency_rejects_duplicate_edge() {
        let mut net = chain();
        assert!(matches!(
            net.create_dependency("A", "B"),
            Err(ModelError::DuplicateDependency { .. })
        ));
    }

    #[test]
    fn parents_preserve_creation_order() {
        let mut net = BayesNet::default();
        net.create_event("C").unwrap();
        net.create_event("A").unwrap();
        net.create_event("B").unwrap();
        net.create_dependency("C", "B").unwrap();
        net.create_dependency("A", "B").unwrap();

        assert_eq!(net.event("B").unwrap().parents(), ["C", "A"]);
    }

    #[test]
    fn table_access_requires_finalized_structure() {
        let mut net = chain();
        assert!(matches!(
            net.event("A").unwrap().table(),
            Err(ModelError::StructureOpen)
        ));

        net.finalize_structure().unwrap();
        assert_eq!(net.event("A").unwrap().table().unwrap().arity(), 0);
        assert_eq!(net.event("B").unwrap().table().unwrap().arity(), 1);
    }

    #[test]
    fn finalize_twice_is_an_error() {
        let mut net = chain();
        net.finalize_structure().unwrap();
        assert!(matches!(
            net.finalize_structure(),
            Err(ModelError::StructureFinalized)
        ));
    }

    #[test]
    fn validate_requires_finalized_structure() {
        let net = chain();
        assert!(matches!(net.validate(), Err(ModelError::StructureOpen)));
    }

    #[test]
    fn validate_rejects_incomplete_table() {
        let mut net = chain();
        net.finalize_structure().unwrap();
        net.event_mut("A")
            .unwrap()
            .table_mut()
            .unwrap()
            .add_line(0.3, true, &[])
            .unwrap();
        // B's table covers only one of its two assignments.
        net.event_mut("B")
            .unwrap()
            .table_mut()
            .unwrap()
            .add_line(0.6, true, &[true])
            .unwrap();

        assert!(matches!(net.validate(), Err(ModelError::Validation(_))));
    }

    #[test]
    fn validate_accepts_complete_network() {
        let mut net = chain();
        net.finalize_structure().unwrap();
        net.event_mut("A")
            .unwrap()
            .table_mut()
            .unwrap()
            .add_line(0.3, true, &[])
            .unwrap();
        let table = net.event_mut("B").unwrap().table_mut().unwrap();
        table.add_line(0.6, true, &[true]).unwrap();
        table.add_line(0.2, true, &[false]).unwrap();

        net.validate().unwrap();
    }

    #[test]
    fn events_iterate_in_creation_order() {
        let mut net = BayesNet::default();
        for label in ["Z", "M", "A"] {
            net.create_event(label).unwrap();
        }
        let labels: Vec<&str> = net.labels().collect();
        assert_eq!(labels, ["Z", "M", "A"]);
    }
}
