//! Dense `[subcarriers][users]` goodness matrix and NaN-aware reductions.
//!
//! Values are stored row-major as `f32`, one row per subcarrier. A NaN cell
//! marks a (subcarrier, user) pair that must never be used: it is skipped by
//! every reduction in this crate.
//!
//! # Invariants
//!
//! - `values.len() == subcarriers * users`
//! - The matrix is read-only once built; the allocator only borrows it.

use alloc::vec::Vec;

use crate::error::AllocationError;

/// Per-(subcarrier, user) goodness scores. Higher is better.
#[derive(Clone, Debug, PartialEq)]
pub struct CostMatrix {
    subcarriers: usize,
    users: usize,
    values: Vec<f32>,
}

impl CostMatrix {
    /// Build a matrix from a row-major buffer of `subcarriers * users` values.
    pub fn new(subcarriers: usize, users: usize, values: Vec<f32>) -> Result<Self, AllocationError> {
        let expected = subcarriers.checked_mul(users);
        if expected != Some(values.len()) {
            return Err(AllocationError::MalformedCostMatrix {
                subcarriers,
                users,
                values: values.len(),
            });
        }
        Ok(Self { subcarriers, users, values })
    }

    /// Build a matrix from one slice per subcarrier.
    ///
    /// Every row must have the width of row 0. An empty slice yields a
    /// `0 x 0` matrix; use [`CostMatrix::new`] for zero subcarriers with a
    /// non-zero user count.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self, AllocationError> {
        let users = rows.first().map_or(0, |r| r.as_ref().len());
        let mut values = Vec::with_capacity(rows.len() * users);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != users {
                return Err(AllocationError::RaggedCostMatrix {
                    row,
                    expected: users,
                    found: r.len(),
                });
            }
            values.extend_from_slice(r);
        }
        Ok(Self { subcarriers: rows.len(), users, values })
    }

    /// Build a matrix from a fixed-size array. Cannot fail.
    pub fn from_array<const S: usize, const U: usize>(rows: &[[f32; U]; S]) -> Self {
        let mut values = Vec::with_capacity(S * U);
        for r in rows {
            values.extend_from_slice(r);
        }
        Self { subcarriers: S, users: U, values }
    }

    /// Number of subcarriers (rows).
    pub fn subcarriers(&self) -> usize {
        self.subcarriers
    }

    /// Number of users (columns).
    pub fn users(&self) -> usize {
        self.users
    }

    /// Goodness of giving `subcarrier` to `user`.
    ///
    /// # Panics
    /// If either index is out of range.
    #[inline]
    pub fn get(&self, subcarrier: usize, user: usize) -> f32 {
        assert!(user < self.users, "user {user} out of range");
        self.values[subcarrier * self.users + user]
    }

    /// All user scores for one subcarrier.
    #[inline]
    pub fn row(&self, subcarrier: usize) -> &[f32] {
        let start = subcarrier * self.users;
        &self.values[start..start + self.users]
    }

    /// Iterate over rows in subcarrier order.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        // chunks_exact panics on a zero chunk size; a zero-user buffer is empty anyway
        self.values.chunks_exact(self.users.max(1))
    }

    /// The user with the highest non-NaN score for `subcarrier`.
    ///
    /// Ties go to the lowest user index. `None` when the row is all NaN.
    pub fn best_user(&self, subcarrier: usize) -> Option<usize> {
        nan_argmax(self.row(subcarrier))
    }
}

/// Index of the largest non-NaN value, first occurrence on ties.
///
/// Returns `None` for an empty slice or one holding only NaN.
pub fn nan_argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// `|x|` using only `core` arithmetic.
#[inline]
pub(crate) fn abs_f32(x: f32) -> f32 {
    if x < 0.0 { -x } else { x }
}
