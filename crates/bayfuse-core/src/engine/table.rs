//! Conditional probability tables for binary events.
//!
//! A table owns one [`TableLine`] per assignment of truth values to the
//! event's parents. Each line stores the probability of the event being
//! TRUE under that assignment; the FALSE probability is always derived as
//! `1 - p`, so a TRUE/FALSE pair that does not sum to 1 cannot be
//! represented.
//!
//! Tables are dense: a finalized event with `k` parents covers all `2^k`
//! assignments. [`assignments`] enumerates them by binary counting, which
//! makes the exponential cost explicit at every call site that iterates a
//! full table.

use smallvec::SmallVec;

use crate::engine::errors::ModelError;

/// A fixed-length vector of parent truth values, one per parent in the
/// event's parent order.
pub type Assignment = SmallVec<[bool; 8]>;

/// One row of a conditional probability table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableLine {
    arguments: Assignment,
    p_true: f64,
}

impl TableLine {
    /// The parent truth assignment this line covers.
    pub fn arguments(&self) -> &[bool] {
        &self.arguments
    }

    /// The probability of the given outcome under this line's assignment.
    ///
    /// The FALSE probability is the complement of the stored TRUE
    /// probability.
    pub fn probability(&self, outcome: bool) -> f64 {
        if outcome {
            self.p_true
        } else {
            1.0 - self.p_true
        }
    }
}

/// A conditional probability table owned by a single event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbTable {
    arity: usize,
    lines: Vec<TableLine>,
}

impl ProbTable {
    /// Creates an empty table for an event with `arity` parents.
    pub(crate) fn new(arity: usize) -> Self {
        Self {
            arity,
            lines: Vec::new(),
        }
    }

    /// Number of parents the owning event has.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// All lines, in insertion order.
    pub fn lines(&self) -> &[TableLine] {
        &self.lines
    }

    /// Appends a line for the given parent assignment.
    ///
    /// `probability` is the probability of `outcome`; a FALSE line is
    /// stored as the complementary TRUE line. Fails if the probability is
    /// outside [0, 1], the argument count does not match the arity, or a
    /// line for this assignment already exists.
    pub fn add_line(
        &mut self,
        probability: f64,
        outcome: bool,
        arguments: &[bool],
    ) -> Result<(), ModelError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(ModelError::ProbabilityRange(probability));
        }
        if arguments.len() != self.arity {
            return Err(ModelError::ArityMismatch {
                expected: self.arity,
                actual: arguments.len(),
            });
        }
        if self.lines.iter().any(|line| line.arguments() == arguments) {
            return Err(ModelError::DuplicateLine(arguments.to_vec()));
        }

        let p_true = if outcome { probability } else { 1.0 - probability };
        self.lines.push(TableLine {
            arguments: Assignment::from_slice(arguments),
            p_true,
        });
        Ok(())
    }

    /// Looks up the line covering the given parent assignment.
    pub fn find_line(&self, arguments: &[bool]) -> Result<&TableLine, ModelError> {
        self.lines
            .iter()
            .find(|line| line.arguments() == arguments)
            .ok_or_else(|| ModelError::MissingLine(arguments.to_vec()))
    }

    /// The probability of `outcome` under the given parent assignment.
    pub fn probability(&self, outcome: bool, arguments: &[bool]) -> Result<f64, ModelError> {
        Ok(self.find_line(arguments)?.probability(outcome))
    }
}

/// Iterator over all `2^arity` parent assignments.
///
/// See [`assignments`].
#[derive(Debug)]
pub struct Assignments {
    arity: usize,
    next: usize,
    count: usize,
}

impl Iterator for Assignments {
    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        if self.next == self.count {
            return None;
        }
        let mask = self.next;
        self.next += 1;

        let mut arguments = Assignment::with_capacity(self.arity);
        for position in 0..self.arity {
            // High bit first, with 0 meaning TRUE: the all-TRUE row comes
            // out first and the all-FALSE row last.
            let bit = (mask >> (self.arity - 1 - position)) & 1;
            arguments.push(bit == 0);
        }
        Some(arguments)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Assignments {}

/// Enumerates every assignment of truth values to `arity` parents.
///
/// Counts through all `2^arity` combinations; an arity of zero yields the
/// single empty assignment. The cost is exponential in the arity, which is
/// inherent to dense tables.
pub fn assignments(arity: usize) -> Assignments {
    Assignments {
        arity,
        next: 0,
        count: 1usize << arity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignments_zero_arity_yields_single_empty_row() {
        let rows: Vec<Assignment> = assignments(0).collect();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_empty());
    }

    #[test]
    fn assignments_enumerate_all_true_first() {
        let rows: Vec<Vec<bool>> = assignments(2).map(|a| a.to_vec()).collect();
        assert_eq!(
            rows,
            vec![
                vec![true, true],
                vec![true, false],
                vec![false, true],
                vec![false, false],
            ]
        );
    }

    #[test]
    fn assignments_cover_every_combination_once() {
        let rows: Vec<Assignment> = assignments(4).collect();
        assert_eq!(rows.len(), 16);
        for (i, a) in rows.iter().enumerate() {
            for (j, b) in rows.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "rows {} and {} collide", i, j);
                }
            }
        }
    }

    #[test]
    fn false_line_is_stored_as_complement() {
        let mut table = ProbTable::new(1);
        table.add_line(0.4, false, &[true]).unwrap();

        let line = table.find_line(&[true]).unwrap();
        assert!((line.probability(true) - 0.6).abs() < 1e-12);
        assert!((line.probability(false) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn true_and_false_probabilities_sum_to_one() {
        let mut table = ProbTable::new(2);
        table.add_line(0.37, true, &[true, false]).unwrap();

        let line = table.find_line(&[true, false]).unwrap();
        assert_eq!(line.probability(true) + line.probability(false), 1.0);
    }

    #[test]
    fn add_line_rejects_out_of_range_probability() {
        let mut table = ProbTable::new(0);
        assert!(matches!(
            table.add_line(1.5, true, &[]),
            Err(ModelError::ProbabilityRange(_))
        ));
        assert!(matches!(
            table.add_line(-0.1, true, &[]),
            Err(ModelError::ProbabilityRange(_))
        ));
    }

    #[test]
    fn add_line_rejects_arity_mismatch() {
        let mut table = ProbTable::new(2);
        assert!(matches!(
            table.add_line(0.5, true, &[true]),
            Err(ModelError::ArityMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn add_line_rejects_duplicate_assignment() {
        let mut table = ProbTable::new(1);
        table.add_line(0.5, true, &[true]).unwrap();
        assert!(matches!(
            table.add_line(0.6, true, &[true]),
            Err(ModelError::DuplicateLine(_))
        ));
        // The complementary outcome is still the same assignment.
        assert!(matches!(
            table.add_line(0.4, false, &[true]),
            Err(ModelError::DuplicateLine(_))
        ));
    }

    #[test]
    fn find_line_fails_on_missing_assignment() {
        let table = ProbTable::new(1);
        assert!(matches!(
            table.find_line(&[true]),
            Err(ModelError::MissingLine(_))
        ));
    }
}
