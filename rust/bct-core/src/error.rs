//! Error type shared by every fallible BCT operation.

use crate::carry::CarrySchedule;

/// Errors raised by the invariant engine.
///
/// Neither variant is recovered internally: the operation that raises it
/// returns immediately and the caller decides whether to skip, log or abort.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BctError {
    /// An argument violates a documented precondition.
    #[error("{operation}: {reason}")]
    Domain {
        operation: &'static str,
        reason: String,
    },

    /// A carry simulation did not reach binary form within its round bound.
    #[error("{schedule} carry normalization exceeded {limit} rounds")]
    ComputationLimit {
        schedule: CarrySchedule,
        limit: usize,
    },
}

impl BctError {
    pub(crate) fn domain(operation: &'static str, reason: impl Into<String>) -> Self {
        BctError::Domain {
            operation,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BctError>;
