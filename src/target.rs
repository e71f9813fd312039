//! Per-user target subcarrier counts.
//!
//! The external rate allocator hands targets over as floats so that a slot
//! with no active user can be signalled with NaN. [`TargetCounts::parse`]
//! turns that vector into typed counts:
//!
//! | Input | Result |
//! |-------|--------|
//! | every entry NaN (or no entries) | [`TargetCounts::Sleep`] |
//! | some entries NaN | those users are inactive, target `0` |
//! | finite non-negative integer | that count |
//! | negative, fractional, infinite | [`AllocationError::InvalidTarget`] |

use alloc::vec::Vec;

use crate::error::AllocationError;

/// Typed target vector for one scheduling interval.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetCounts {
    /// No user is active this interval.
    Sleep {
        /// Length of the original target vector.
        users: usize,
    },
    /// Exact number of subcarriers each user must end up with.
    Active(Vec<usize>),
}

impl TargetCounts {
    /// Parse a NaN-capable target vector.
    pub fn parse(raw: &[f32]) -> Result<Self, AllocationError> {
        if raw.iter().all(|t| t.is_nan()) {
            return Ok(Self::Sleep { users: raw.len() });
        }
        let mut counts = Vec::with_capacity(raw.len());
        for (user, &value) in raw.iter().enumerate() {
            if value.is_nan() {
                tracing::debug!(user, "inactive user, target forced to zero");
                counts.push(0);
                continue;
            }
            let count = float_to_count(value).ok_or(AllocationError::InvalidTarget { user, value })?;
            counts.push(count);
        }
        Ok(Self::Active(counts))
    }

    /// Wrap integer counts directly.
    pub fn from_counts(counts: &[usize]) -> Self {
        Self::Active(counts.to_vec())
    }

    /// Number of users the vector covers.
    pub fn users(&self) -> usize {
        match self {
            Self::Sleep { users } => *users,
            Self::Active(counts) => counts.len(),
        }
    }

    /// `true` for the all-NaN sleep slot.
    pub fn is_sleep(&self) -> bool {
        matches!(self, Self::Sleep { .. })
    }

    /// The counts, or `None` when sleeping.
    pub fn counts(&self) -> Option<&[usize]> {
        match self {
            Self::Sleep { .. } => None,
            Self::Active(counts) => Some(counts),
        }
    }

    /// Sum of all counts, saturating. Zero when sleeping.
    pub fn total(&self) -> usize {
        self.counts()
            .map_or(0, |c| c.iter().fold(0usize, |acc, &n| acc.saturating_add(n)))
    }
}

/// Exact non-negative integer conversion; `None` for anything else.
fn float_to_count(value: f32) -> Option<usize> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let n = value as usize;
    if n as f32 == value { Some(n) } else { None }
}
