//! Error handling logic

use std::fmt;

/// Error types for oracle synthesis and simulation.
///
/// Everything here is a synchronous rejection of malformed input or a
/// malformed circuit; synthesis itself is pure and never retries.
#[derive(Debug, Clone, PartialEq, Eq)] // Eq useful for testing error variants
pub enum DisqError {
    /// An index-domain failure: out-of-range linear position, equal-vertex
    /// edge request, or invalid vertex permutation.
    IndexDomain {
        /// IndexDomain failure message
        message: String,
    },

    /// A distance profile that cannot produce a valid flag mask: empty,
    /// non-positive target distance, or an edge position outside the
    /// indexing's universe.
    InvalidProfile {
        /// InvalidProfile failure message
        message: String,
    },

    /// An operation inconsistent with the circuit or execution mode it is
    /// applied to (qubit out of range, aliased gate operands, a basis-changing
    /// gate in bit-exact execution).
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// General error encountered during the simulation process itself.
    SimulationError {
        /// SimulationError failure message
        message: String,
    },
}

impl fmt::Display for DisqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisqError::IndexDomain { message } => write!(f, "Index Domain Violation: {}", message),
            DisqError::InvalidProfile { message } => write!(f, "Invalid Profile: {}", message),
            DisqError::InvalidOperation { message } => write!(f, "Invalid Operation: {}", message),
            DisqError::SimulationError { message } => {
                write!(f, "Simulation Process Error: {}", message)
            }
        }
    }
}

// Implement the standard Error trait to allow for easy integration with Rust error handling.
impl std::error::Error for DisqError {}
