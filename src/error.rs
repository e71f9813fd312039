//! Error taxonomy for the allocator.
//!
//! Every failure is reported before any output is produced; the allocator
//! never hands back a partially rebalanced assignment.
//!
//! The all-NaN "sleep" target vector is not an error. It yields
//! [`Allocation::Sleep`](crate::rcg::Allocation::Sleep).

use thiserror::Error;

/// Reasons an allocation request is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    /// The target vector length does not match the user dimension of the
    /// cost matrix.
    #[error("rcg input mismatch: cost matrix has {users} users but the target vector has {targets} entries")]
    InputMismatch {
        /// Number of user columns in the cost matrix.
        users: usize,
        /// Number of entries in the target vector.
        targets: usize,
    },

    /// The finite targets do not add up to the subcarrier count, so no
    /// assignment can meet them.
    #[error("targets sum to {target_sum} but there are {subcarriers} subcarriers to hand out")]
    InconsistentTarget {
        /// Sum of the finite target entries.
        target_sum: usize,
        /// Number of subcarriers (rows) in the cost matrix.
        subcarriers: usize,
    },

    /// A finite target entry is negative, fractional or infinite.
    #[error("target for user {user} must be a non-negative integer, got {value}")]
    InvalidTarget {
        /// User whose target is invalid.
        user: usize,
        /// The rejected value.
        value: f32,
    },

    /// A flat cost buffer does not hold exactly `subcarriers * users` values.
    #[error("a {subcarriers}x{users} cost matrix cannot be built from {values} values")]
    MalformedCostMatrix {
        /// Requested subcarrier (row) count.
        subcarriers: usize,
        /// Requested user (column) count.
        users: usize,
        /// Length of the supplied buffer.
        values: usize,
    },

    /// A cost matrix row has a different width than the first row.
    #[error("cost matrix row {row} has {found} columns, expected {expected}")]
    RaggedCostMatrix {
        /// Offending row index.
        row: usize,
        /// Width of row 0.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },

    /// Every cost in a subcarrier row is NaN, so no user can be picked for it.
    #[error("subcarrier {subcarrier} has no usable cost for any user")]
    UnrankableSubcarrier {
        /// Offending subcarrier.
        subcarrier: usize,
    },

    /// An overloaded user holds subcarriers, but every pairing with a
    /// dissatisfied user has a NaN cost.
    #[error("user {user} is overloaded but none of its subcarriers can move to a dissatisfied user")]
    Untradeable {
        /// The overloaded user that could not shed load.
        user: usize,
    },
}
