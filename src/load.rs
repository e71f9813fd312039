/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Per-user load counters and their satisfaction classification.
//!
//! # Invariants
//!
//! - **LOAD-001**: `loads[u]` equals the number of subcarriers currently
//!   owned by `u`. Only [`UserLoad::assign`] and [`UserLoad::transfer`]
//!   change it, and the allocator calls them in lockstep with the
//!   assignment vector.
//! - **LOAD-002**: classification is derived from `loads` and `targets` on
//!   every query, never cached.
//! - **LOAD-003**: `Overloaded` implies satisfied; a user can only receive a
//!   subcarrier while `Dissatisfied`, so a receiver never ends up overloaded.

use alloc::vec;
use alloc::vec::Vec;

/// Where a user's current load sits relative to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadState {
    /// `load < target`: may receive subcarriers.
    Dissatisfied,
    /// `load == target`.
    Satisfied,
    /// `load > target`: must give subcarriers away.
    Overloaded,
}

impl LoadState {
    /// Classify a load against its target.
    #[inline]
    pub fn classify(load: usize, target: usize) -> Self {
        match load.cmp(&target) {
            core::cmp::Ordering::Less => Self::Dissatisfied,
            core::cmp::Ordering::Equal => Self::Satisfied,
            core::cmp::Ordering::Greater => Self::Overloaded,
        }
    }

    /// `load >= target`.
    #[inline]
    pub fn is_satisfied(self) -> bool {
        !matches!(self, Self::Dissatisfied)
    }

    /// `load > target`.
    #[inline]
    pub fn is_overloaded(self) -> bool {
        matches!(self, Self::Overloaded)
    }
}

/// Running subcarrier count per user, paired with the fixed targets.
#[derive(Clone, Debug)]
pub struct UserLoad<'t> {
    loads: Vec<usize>,
    targets: &'t [usize],
}

impl<'t> UserLoad<'t> {
    /// All users start empty.
    pub fn new(targets: &'t [usize]) -> Self {
        Self { loads: vec![0; targets.len()], targets }
    }

    /// Number of users tracked.
    pub fn users(&self) -> usize {
        self.loads.len()
    }

    /// Current load of `user`.
    #[inline]
    pub fn load(&self, user: usize) -> usize {
        self.loads[user]
    }

    /// Target of `user`.
    #[inline]
    pub fn target(&self, user: usize) -> usize {
        self.targets[user]
    }

    /// Classification of `user` right now.
    #[inline]
    pub fn state(&self, user: usize) -> LoadState {
        LoadState::classify(self.loads[user], self.targets[user])
    }

    /// Count one more subcarrier for `user`.
    pub fn assign(&mut self, user: usize) {
        self.loads[user] += 1;
    }

    /// Move one subcarrier's worth of load from `from` to `to`.
    ///
    /// # Panics
    /// If `from` holds nothing.
    pub fn transfer(&mut self, from: usize, to: usize) {
        assert!(self.loads[from] > 0, "user {from} has no load to give");
        self.loads[from] -= 1;
        self.loads[to] += 1;
    }

    /// `true` if at least one user can still receive.
    pub fn any_dissatisfied(&self) -> bool {
        (0..self.users()).any(|u| self.state(u) == LoadState::Dissatisfied)
    }

    /// How many subcarriers `user` holds above its target.
    pub fn excess(&self, user: usize) -> usize {
        self.loads[user].saturating_sub(self.targets[user])
    }

    /// `true` once every load equals its target.
    pub fn is_balanced(&self) -> bool {
        self.loads.as_slice() == self.targets
    }

    /// Copy of the current loads.
    pub fn snapshot(&self) -> Vec<usize> {
        self.loads.clone()
    }
}
