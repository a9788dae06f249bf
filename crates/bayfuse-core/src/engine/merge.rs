//! Merging two Bayesian networks into one.
//!
//! The merge classifies every label by where it lives and how its causal
//! parents relate to the intersection of the two label sets, then applies a
//! per-class policy:
//!
//! - **outside** (present in one source): structure and table are copied
//!   verbatim from that source.
//! - **internal** (shared, with all parents inside the intersection in at
//!   least one source): exactly one source's structure and table are
//!   adopted wholesale (the delete rule).
//! - **external** (shared, with parents escaping the intersection in both
//!   sources): the parent sets are unioned and a fresh table is computed by
//!   enumerating every assignment of the merged parents, looking up each
//!   source's marginal under its own parent subset, and combining the TRUE
//!   and FALSE masses with probabilistic OR before renormalizing.
//!
//! The inputs are borrowed immutably and never change; the merged network
//! is built, finalized, populated, and validated entirely within one call.
//!
//! Table enumeration is exponential in the merged parent count of each
//! external node (`2^k` rows); that cost is inherent to dense tables and is
//! not bounded here.

use std::cmp::Ordering;

use rustc_hash::FxHashSet;
use smallvec::smallvec;
use tracing::debug;

use crate::engine::errors::MergeError;
use crate::engine::network::BayesNet;
use crate::engine::table::{assignments, Assignment};

/// The three disjoint label classes driving the per-node merge policy.
///
/// Together the classes partition the union of both networks' labels:
/// `internal` and `external` split the intersection, and `outside` holds
/// every label present in exactly one source. Vectors preserve the
/// networks' creation order, so classification is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Classification {
    /// Shared labels whose parents lie entirely within the intersection in
    /// at least one source. A shared label with no parents is trivially
    /// internal.
    pub internal: Vec<String>,
    /// Shared labels whose parents escape the intersection in both sources.
    pub external: Vec<String>,
    /// Labels present in exactly one source.
    pub outside: Vec<String>,
}

/// Which source wins the delete rule when both parent sets lie inside the
/// intersection and have equal size.
///
/// The preference for the first network is a convention, not an algorithmic
/// necessity, so it is surfaced as a policy knob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// Adopt the first network's structure and table.
    #[default]
    First,
    /// Adopt the second network's structure and table.
    Second,
}

/// Per-invocation policy for [`merge_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeOptions {
    /// Delete-rule tie-break; defaults to [`TieBreak::First`].
    pub tie_break: TieBreak,
}

/// The probability that at least one of two independent events with
/// probabilities `p` and `q` occurs: `p + q - p*q`.
pub fn probabilistic_or(p: f64, q: f64) -> f64 {
    p + q - p * q
}

/// Partitions the labels of two networks into internal, external, and
/// outside classes.
///
/// Evaluated independently per source: a shared label is internal if all
/// of its parents lie inside the intersection in the first source *or* in
/// the second.
pub fn classify(first: &BayesNet, second: &BayesNet) -> Result<Classification, MergeError> {
    let intersection: FxHashSet<&str> = first
        .labels()
        .filter(|label| second.contains(label))
        .collect();

    let mut sets = Classification::default();
    for label in first.labels() {
        if !intersection.contains(label) {
            continue;
        }
        let within_first = parents_within(first, label, &intersection)?;
        let within_second = parents_within(second, label, &intersection)?;
        if within_first || within_second {
            sets.internal.push(label.to_string());
        } else {
            sets.external.push(label.to_string());
        }
    }
    for label in first.labels().chain(second.labels()) {
        if !intersection.contains(label) {
            sets.outside.push(label.to_string());
        }
    }
    Ok(sets)
}

fn parents_within(
    net: &BayesNet,
    label: &str,
    intersection: &FxHashSet<&str>,
) -> Result<bool, MergeError> {
    let event = net.event(label).map_err(MergeError::InconsistentInput)?;
    Ok(event
        .parents()
        .iter()
        .all(|parent| intersection.contains(parent.as_str())))
}

/// Merges two finalized, validated networks with default options.
///
/// Pure and deterministic: the inputs are never mutated, and the same pair
/// always yields the same structure and probabilities. Either a fully
/// validated network is returned or the first error aborts the call.
pub fn merge(first: &BayesNet, second: &BayesNet) -> Result<BayesNet, MergeError> {
    merge_with(first, second, MergeOptions::default())
}

/// Merges two finalized, validated networks under the given options.
pub fn merge_with(
    first: &BayesNet,
    second: &BayesNet,
    options: MergeOptions,
) -> Result<BayesNet, MergeError> {
    let sets = classify(first, second)?;
    debug!(
        internal = sets.internal.len(),
        external = sets.external.len(),
        outside = sets.outside.len(),
        "classified labels"
    );

    let intersection: FxHashSet<String> = sets
        .internal
        .iter()
        .chain(sets.external.iter())
        .cloned()
        .collect();
    let mut merger = Merger {
        first,
        second,
        options,
        sets,
        intersection,
        decisions: Vec::new(),
        merged: BayesNet::default(),
    };

    merger.create_events()?;
    merger.outside_dependencies()?;
    merger.delete_rule_dependencies()?;
    merger.union_external_dependencies()?;
    merger
        .merged
        .finalize_structure()
        .map_err(MergeError::Internal)?;

    merger.outside_tables()?;
    merger.delete_rule_tables()?;
    merger.merge_external_tables()?;
    merger.merged.validate().map_err(MergeError::Validation)?;

    Ok(merger.merged)
}

/// Which input network a delete-rule decision adopted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    First,
    Second,
}

/// Working state for one merge invocation.
struct Merger<'a> {
    first: &'a BayesNet,
    second: &'a BayesNet,
    options: MergeOptions,
    sets: Classification,
    intersection: FxHashSet<String>,
    /// Delete-rule decisions, aligned index-for-index with `sets.internal`.
    /// Recorded by the structure phase and reused by the table phase.
    decisions: Vec<Source>,
    merged: BayesNet,
}

impl<'a> Merger<'a> {
    /// Creates every merged event, internal then external then outside, so
    /// that all labels exist before any dependency references them.
    fn create_events(&mut self) -> Result<(), MergeError> {
        let labels: Vec<String> = self
            .sets
            .internal
            .iter()
            .chain(self.sets.external.iter())
            .chain(self.sets.outside.iter())
            .cloned()
            .collect();
        for label in labels {
            self.merged.create_event(label).map_err(MergeError::Internal)?;
        }
        Ok(())
    }

    /// An outside label exists in exactly one source; this returns it.
    fn outside_source(&self, label: &str) -> &'a BayesNet {
        if self.first.contains(label) {
            self.first
        } else {
            self.second
        }
    }

    fn source_net(&self, source: Source) -> &'a BayesNet {
        match source {
            Source::First => self.first,
            Source::Second => self.second,
        }
    }

    fn parents_in_intersection(&self, net: &BayesNet, label: &str) -> Result<bool, MergeError> {
        let event = net.event(label).map_err(MergeError::InconsistentInput)?;
        Ok(event
            .parents()
            .iter()
            .all(|parent| self.intersection.contains(parent)))
    }

    /// The delete rule: pick the one source whose structure an internal
    /// node adopts.
    ///
    /// A source whose parents escape the intersection captures causal
    /// structure the other source cannot see, so it wins outright. When
    /// both parent sets lie inside the intersection, the larger one wins,
    /// and equal sizes fall back to the configured tie-break.
    fn choose_source(&self, label: &str) -> Result<Source, MergeError> {
        if !self.parents_in_intersection(self.first, label)? {
            return Ok(Source::First);
        }
        if !self.parents_in_intersection(self.second, label)? {
            return Ok(Source::Second);
        }

        let first_count = self
            .first
            .event(label)
            .map_err(MergeError::InconsistentInput)?
            .parents()
            .len();
        let second_count = self
            .second
            .event(label)
            .map_err(MergeError::InconsistentInput)?
            .parents()
            .len();
        Ok(match first_count.cmp(&second_count) {
            Ordering::Greater => Source::First,
            Ordering::Less => Source::Second,
            Ordering::Equal => match self.options.tie_break {
                TieBreak::First => Source::First,
                TieBreak::Second => Source::Second,
            },
        })
    }

    fn outside_dependencies(&mut self) -> Result<(), MergeError> {
        let outside = self.sets.outside.clone();
        for label in &outside {
            debug!(%label, "copying dependencies of outside node");
            let source = self.outside_source(label);
            let parents = source
                .event(label)
                .map_err(MergeError::InconsistentInput)?
                .parents()
                .to_vec();
            for parent in &parents {
                self.merged
                    .create_dependency(parent, label)
                    .map_err(MergeError::Internal)?;
            }
        }
        Ok(())
    }

    fn delete_rule_dependencies(&mut self) -> Result<(), MergeError> {
        let internal = self.sets.internal.clone();
        for label in &internal {
            let source = self.choose_source(label)?;
            self.decisions.push(source);
            debug!(%label, ?source, "delete rule adopted dependencies");
            let parents = self
                .source_net(source)
                .event(label)
                .map_err(MergeError::InconsistentInput)?
                .parents()
                .to_vec();
            for parent in &parents {
                self.merged
                    .create_dependency(parent, label)
                    .map_err(MergeError::Internal)?;
            }
        }
        Ok(())
    }

    /// Unions both sources' parent edges for every external node. A parent
    /// present in both sources collapses to a single edge because the
    /// merged network tracks parents by label.
    fn union_external_dependencies(&mut self) -> Result<(), MergeError> {
        let external = self.sets.external.clone();
        for label in &external {
            debug!(%label, "unioning dependencies of external node");
            let first_parents = self
                .first
                .event(label)
                .map_err(MergeError::InconsistentInput)?
                .parents()
                .to_vec();
            let second_parents = self
                .second
                .event(label)
                .map_err(MergeError::InconsistentInput)?
                .parents()
                .to_vec();
            for parent in first_parents.iter().chain(second_parents.iter()) {
                let present = self
                    .merged
                    .event(label)
                    .map_err(MergeError::Internal)?
                    .parents()
                    .iter()
                    .any(|p| p == parent);
                if !present {
                    self.merged
                        .create_dependency(parent, label)
                        .map_err(MergeError::Internal)?;
                }
            }
        }
        Ok(())
    }

    fn outside_tables(&mut self) -> Result<(), MergeError> {
        let outside = self.sets.outside.clone();
        for label in &outside {
            debug!(%label, "copying table of outside node");
            let source = self.outside_source(label);
            self.copy_table(source, label)?;
        }
        Ok(())
    }

    fn delete_rule_tables(&mut self) -> Result<(), MergeError> {
        let pairs: Vec<(String, Source)> = self
            .sets
            .internal
            .iter()
            .cloned()
            .zip(self.decisions.iter().copied())
            .collect();
        for (label, source) in pairs {
            debug!(label = %label, ?source, "delete rule adopted table");
            let net = self.source_net(source);
            self.copy_table(net, &label)?;
        }
        Ok(())
    }

    /// Copies an event's full line set from `source` into the merged
    /// network. The merged event adopted the same parent list, so argument
    /// vectors carry over positionally.
    fn copy_table(&mut self, source: &BayesNet, label: &str) -> Result<(), MergeError> {
        let lines = source
            .event(label)
            .map_err(MergeError::InconsistentInput)?
            .table()
            .map_err(MergeError::InconsistentInput)?
            .lines()
            .to_vec();
        let table = self
            .merged
            .event_mut(label)
            .map_err(MergeError::Internal)?
            .table_mut()
            .map_err(MergeError::Internal)?;
        for line in &lines {
            table
                .add_line(line.probability(true), true, line.arguments())
                .map_err(MergeError::Internal)?;
        }
        Ok(())
    }

    fn merge_external_tables(&mut self) -> Result<(), MergeError> {
        let external = self.sets.external.clone();
        for label in &external {
            debug!(%label, "merging tables of external node");
            self.merge_external_table(label)?;
        }
        Ok(())
    }

    /// Computes an external node's merged table.
    ///
    /// For each assignment of the merged parents, each source's table is
    /// looked up under the sub-assignment restricted to its own parents;
    /// parents absent from a source simply do not take part in that lookup.
    /// The TRUE and FALSE masses combine as independent alternative causes
    /// and need not sum to 1, so the stored probability is renormalized.
    fn merge_external_table(&mut self, label: &str) -> Result<(), MergeError> {
        let merged_parents = self
            .merged
            .event(label)
            .map_err(MergeError::Internal)?
            .parents()
            .to_vec();
        let first_event = self.first.event(label).map_err(MergeError::InconsistentInput)?;
        let second_event = self
            .second
            .event(label)
            .map_err(MergeError::InconsistentInput)?;
        let first_table = first_event.table().map_err(MergeError::InconsistentInput)?;
        let second_table = second_event.table().map_err(MergeError::InconsistentInput)?;
        let first_slots = parent_slots(&merged_parents, first_event.parents());
        let second_slots = parent_slots(&merged_parents, second_event.parents());

        let mut lines = Vec::with_capacity(1usize << merged_parents.len());
        for assignment in assignments(merged_parents.len()) {
            let first_args = project(&assignment, &first_slots, first_event.parents().len());
            let second_args = project(&assignment, &second_slots, second_event.parents().len());

            let p_first = first_table
                .probability(true, &first_args)
                .map_err(MergeError::InconsistentInput)?;
            let p_second = second_table
                .probability(true, &second_args)
                .map_err(MergeError::InconsistentInput)?;

            let true_mass = probabilistic_or(p_first, p_second);
            let false_mass = probabilistic_or(1.0 - p_first, 1.0 - p_second);
            lines.push((true_mass / (true_mass + false_mass), assignment));
        }

        let table = self
            .merged
            .event_mut(label)
            .map_err(MergeError::Internal)?
            .table_mut()
            .map_err(MergeError::Internal)?;
        for (probability, assignment) in &lines {
            table
                .add_line(*probability, true, assignment)
                .map_err(MergeError::Internal)?;
        }
        Ok(())
    }
}

/// For each merged parent position, the position of the same label in a
/// source's parent list, or `None` if that source lacks the parent.
fn parent_slots(merged_parents: &[String], source_parents: &[String]) -> Vec<Option<usize>> {
    merged_parents
        .iter()
        .map(|label| source_parents.iter().position(|parent| parent == label))
        .collect()
}

/// Restricts a merged-parent assignment to one source's parent subset,
/// placing each truth value at the source's own parent position.
fn project(assignment: &[bool], slots: &[Option<usize>], arity: usize) -> Assignment {
    let mut arguments: Assignment = smallvec![false; arity];
    for (position, slot) in slots.iter().enumerate() {
        if let Some(index) = *slot {
            arguments[index] = assignment[position];
        }
    }
    arguments
}
