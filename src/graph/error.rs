//! Error types for molecular graph mutation and query operations.
//!
//! Structural violations (unknown endpoints, duplicate identities, malformed
//! descriptors) are reported through [`GraphError`]. Removal of an entity that
//! is not present is *not* an error; removal operations report `false`/`None`
//! instead, making them idempotent.

use thiserror::Error;

/// Errors raised by [`Molecule`](super::container::Molecule) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The referenced entity is not a member of this container.
    ///
    /// Raised by adjacency and aggregate queries on a foreign atom, by
    /// electron-store insertions binding one, and by endpoint assignment on a
    /// foreign bond.
    #[error("entity is not a member of this structure")]
    NotAMember,

    /// A bond endpoint is not a member of the atom table.
    ///
    /// Bonds never adopt foreign atoms; every endpoint must be added to the
    /// container first.
    #[error("bond endpoint at position {position} is not an atom of this structure")]
    UnknownEndpoint {
        /// Position of the offending endpoint in the bond's endpoint list.
        position: usize,
    },

    /// A positional argument is outside the table.
    #[error("index {index} is out of range for a table of {len} entries")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Current table length.
        len: usize,
    },

    /// The entity is already present elsewhere in the table.
    ///
    /// Raised by `set_atom` when the replacement atom already occupies a
    /// different slot; identity is judged on the fully unwrapped payload.
    #[error("entity is already present at index {index}")]
    DuplicateEntity {
        /// Index of the existing occurrence.
        index: usize,
    },

    /// A bond was built with fewer than two endpoints.
    #[error("a bond requires at least two endpoints, got {count}")]
    MalformedBond {
        /// Number of endpoints supplied.
        count: usize,
    },

    /// A stereo descriptor was built with the wrong number of carriers for
    /// its kind. Validated at construction, never deferred to use.
    #[error("{kind} stereo requires {expected} carriers, got {actual}")]
    MalformedDescriptor {
        /// Descriptor kind name.
        kind: &'static str,
        /// Carriers the kind requires.
        expected: usize,
        /// Carriers supplied.
        actual: usize,
    },
}

impl GraphError {
    /// Creates an [`UnknownEndpoint`](GraphError::UnknownEndpoint) error.
    pub(crate) fn unknown_endpoint(position: usize) -> Self {
        Self::UnknownEndpoint { position }
    }

    /// Creates an [`IndexOutOfRange`](GraphError::IndexOutOfRange) error.
    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Creates a [`MalformedDescriptor`](GraphError::MalformedDescriptor)
    /// error.
    pub(crate) fn malformed_descriptor(kind: &'static str, expected: usize, actual: usize) -> Self {
        Self::MalformedDescriptor {
            kind,
            expected,
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            GraphError::NotAMember.to_string(),
            "entity is not a member of this structure"
        );
        assert_eq!(
            GraphError::unknown_endpoint(1).to_string(),
            "bond endpoint at position 1 is not an atom of this structure"
        );
        assert_eq!(
            GraphError::out_of_range(4, 3).to_string(),
            "index 4 is out of range for a table of 3 entries"
        );
        assert_eq!(
            GraphError::DuplicateEntity { index: 2 }.to_string(),
            "entity is already present at index 2"
        );
        assert_eq!(
            GraphError::MalformedBond { count: 1 }.to_string(),
            "a bond requires at least two endpoints, got 1"
        );
        assert_eq!(
            GraphError::malformed_descriptor("tetrahedral", 4, 3).to_string(),
            "tetrahedral stereo requires 4 carriers, got 3"
        );
    }
}
