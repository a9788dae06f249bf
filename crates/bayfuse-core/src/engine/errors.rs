//! Error types for the bayfuse engine.

use thiserror::Error;

/// Errors raised by the graphical-model layer.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in the future without breaking changes.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ModelError {
    /// No event with the given label exists in the network.
    #[error("unknown event '{0}'")]
    UnknownEvent(String),

    /// An event with the given label already exists in the network.
    #[error("event '{0}' already exists")]
    DuplicateEvent(String),

    /// The child already lists this parent.
    ///
    /// Parent lists are ordered but logically sets; the same edge cannot
    /// be added twice.
    #[error("duplicate dependency '{parent}' -> '{child}'")]
    DuplicateDependency { parent: String, child: String },

    /// A structural operation was attempted on a finalized network,
    /// or `finalize_structure` was called twice.
    #[error("structure is already finalized")]
    StructureFinalized,

    /// A table operation was attempted before the structure was finalized.
    ///
    /// Parent-index correspondence is undefined until the structure is
    /// frozen, so tables only exist from that point on.
    #[error("structure is not finalized")]
    StructureOpen,

    /// A probability outside the unit interval was supplied.
    #[error("probability {0} is outside [0, 1]")]
    ProbabilityRange(f64),

    /// A table line's argument count does not match the event's parent count.
    #[error("table line has {actual} arguments, expected {expected}")]
    ArityMismatch { expected: usize, actual: usize },

    /// A table already holds a line for this parent assignment.
    #[error("duplicate table line for arguments {0:?}")]
    DuplicateLine(Vec<bool>),

    /// No table line matches this parent assignment.
    #[error("no table line for arguments {0:?}")]
    MissingLine(Vec<bool>),

    /// Whole-network validation failed.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Errors raised by a merge invocation.
///
/// A merge never returns a partial result: the first error aborts the call.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MergeError {
    /// A lookup on one of the input networks failed.
    ///
    /// The classifier and the builders agree on which labels exist where;
    /// a failed input lookup means that contract was broken and must not
    /// be silently tolerated.
    #[error("inconsistent input: {0}")]
    InconsistentInput(#[source] ModelError),

    /// Construction of the merged network itself failed.
    ///
    /// This indicates a bug in the merge logic, not a problem with the
    /// inputs.
    #[error("internal error: {0}")]
    Internal(#[source] ModelError),

    /// The merged network failed its final validation.
    ///
    /// Merging is deterministic, so retrying cannot help; this is surfaced
    /// as a fatal error.
    #[error("merged network failed validation: {0}")]
    Validation(#[source] ModelError),
}
