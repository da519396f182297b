use thiserror::Error;

/// Errors reported by list and cursor operations.
///
/// Absence (an empty list, a value that is not present, a cursor that has run
/// off either end) is never an error: those cases are reported as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// A positional operation addressed an index outside the list.
    #[error("index {index} is out of range for a list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The node a cursor was positioned on has been removed from its list.
    #[error("cursor refers to a node that is no longer in the list")]
    StaleCursor,

    /// The node chain disagrees with the recorded length or its links are
    /// inconsistent. The list must not be used after this is reported.
    #[error("list structure is corrupted: walked {walked} nodes, recorded length is {recorded}")]
    Corrupted { walked: usize, recorded: usize },
}

impl ListError {
    /// Whether the error indicates a broken structural invariant.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ListError::Corrupted { .. })
    }
}

pub type Result<T, E = ListError> = core::result::Result<T, E>;
