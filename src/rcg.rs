/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Rate Craving Greedy (RCG) subcarrier allocation.
//!
//! Kivanc, Li & Liu (2003), "Computationally efficient bandwidth allocation
//! and power control for OFDMA". Once an external rate allocator has decided
//! how many subcarriers each user gets, RCG decides *which* ones.
//!
//! # Algorithm
//!
//! ```text
//! Phase 1  every subcarrier -> its best user (argmax, NaN ignored)
//!          loads snapshot    -> initial map
//! Phase 2  for u in 0..U:
//!            while load[u] > target[u]:
//!              (s*, c*) = argmin |C[s][c] - C[s][u]|
//!                         over s owned by u, c != u with load[c] < target[c]
//!              move s* from u to c*
//! ```
//!
//! The trade picked is the "nearest neighbour" in cost space: the one that
//! changes total goodness the least. Ties in both phases resolve to the
//! lowest index, scanning subcarriers before users.
//!
//! # Invariants
//!
//! - **RCG-001**: the cost matrix is only borrowed; it is never mutated.
//! - **RCG-002**: on success, the load derived from the owner vector equals
//!   the targets exactly and every owner index is `< U`.
//! - **RCG-003**: a receiver is always dissatisfied before the trade, so a
//!   user settled earlier in the pass is never overloaded again and one
//!   pass over users suffices.
//! - **RCG-004**: the number of trades equals
//!   `sum_u max(0, initial[u] - target[u])`, which is at most `S`.
//! - **RCG-005**: errors are reported before any output exists; there is no
//!   partially rebalanced result.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::AllocationError;
use crate::load::{LoadState, UserLoad};
use crate::matrix::{abs_f32, CostMatrix};
use crate::target::TargetCounts;

// ─── Config ──────────────────────────────────────────────────────────────────

/// Allocator configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RcgConfig {
    /// Keep a [`Trade`] log in the result.
    /// Default: `true`. When `false` only the trade count is kept and no
    /// log is allocated.
    pub record_trades: bool,
}

impl Default for RcgConfig {
    fn default() -> Self {
        Self { record_trades: true }
    }
}

// ─── Results ─────────────────────────────────────────────────────────────────

/// One Phase 2 reassignment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trade {
    /// Subcarrier that changed hands.
    pub subcarrier: usize,
    /// Overloaded user that gave it away.
    pub from: usize,
    /// Dissatisfied user that received it.
    pub to: usize,
    /// `C[subcarrier][to] - C[subcarrier][from]`; usually negative.
    pub cost_delta: f32,
}

/// A complete subcarrier-to-user assignment meeting every target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    users: usize,
    owners: Vec<usize>,
    initial_load: Vec<usize>,
    trades: Vec<Trade>,
    trade_count: usize,
}

impl Assignment {
    /// Owning user of every subcarrier, indexed by subcarrier.
    pub fn owners(&self) -> &[usize] {
        &self.owners
    }

    /// Owning user of `subcarrier`, or `None` if out of range.
    pub fn owner(&self, subcarrier: usize) -> Option<usize> {
        self.owners.get(subcarrier).copied()
    }

    /// Per-user load right after Phase 1. Diagnostic only.
    pub fn initial_load(&self) -> &[usize] {
        &self.initial_load
    }

    /// Trades in the order they were made. Empty when
    /// [`RcgConfig::record_trades`] is off.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Number of Phase 2 trades, recorded or not.
    pub fn trade_count(&self) -> usize {
        self.trade_count
    }

    /// Number of users the assignment was made for.
    pub fn users(&self) -> usize {
        self.users
    }

    /// Re-derive per-user load from the owner vector.
    pub fn load(&self) -> Vec<usize> {
        let mut load = vec![0; self.users];
        for &u in &self.owners {
            load[u] += 1;
        }
        load
    }

    /// Subcarriers owned by `user`, ascending.
    pub fn subcarriers_of(&self, user: usize) -> impl Iterator<Item = usize> + '_ {
        self.owners
            .iter()
            .enumerate()
            .filter(move |&(_, &u)| u == user)
            .map(|(s, _)| s)
    }

    /// Sum of `C[s][owner(s)]` over all subcarriers.
    pub fn total_goodness(&self, costs: &CostMatrix) -> f32 {
        self.owners
            .iter()
            .enumerate()
            .map(|(s, &u)| costs.get(s, u))
            .sum()
    }
}

/// Outcome of one allocation call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Allocation {
    /// Every target was NaN: nobody is scheduled this interval.
    Sleep {
        /// Number of subcarriers left unassigned.
        subcarriers: usize,
    },
    /// Every subcarrier has an owner and every target is met.
    Assigned(Assignment),
}

impl Allocation {
    /// `true` for the sleep slot.
    pub fn is_sleep(&self) -> bool {
        matches!(self, Self::Sleep { .. })
    }

    /// The assignment, unless sleeping.
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            Self::Sleep { .. } => None,
            Self::Assigned(a) => Some(a),
        }
    }

    /// Consume into the assignment, unless sleeping.
    pub fn into_assignment(self) -> Option<Assignment> {
        match self {
            Self::Sleep { .. } => None,
            Self::Assigned(a) => Some(a),
        }
    }

    /// Owner per subcarrier as floats, NaN everywhere in the sleep case.
    pub fn owner_map(&self) -> Vec<f32> {
        match self {
            Self::Sleep { subcarriers } => vec![f32::NAN; *subcarriers],
            Self::Assigned(a) => a.owners.iter().map(|&u| u as f32).collect(),
        }
    }

    /// Phase 1 load snapshot. `None` stands for the NaN snapshot of a
    /// sleep slot.
    pub fn initial_map(&self) -> Option<&[usize]> {
        self.assignment().map(Assignment::initial_load)
    }
}

// ─── Allocator ───────────────────────────────────────────────────────────────

/// Rate Craving Greedy allocator. Holds configuration only; every call owns
/// its working state.
#[derive(Clone, Debug, Default)]
pub struct RateCravingGreedy {
    config: RcgConfig,
}

impl RateCravingGreedy {
    /// Create an allocator with the given configuration.
    pub fn new(config: RcgConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &RcgConfig {
        &self.config
    }

    /// Allocate with a NaN-capable float target vector.
    ///
    /// The length check runs before the vector is parsed, so a short vector
    /// is always reported as [`AllocationError::InputMismatch`].
    pub fn allocate(&self, costs: &CostMatrix, targets: &[f32]) -> Result<Allocation, AllocationError> {
        check_users(costs, targets.len())?;
        let targets = TargetCounts::parse(targets).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected target vector");
        })?;
        self.allocate_counts(costs, &targets)
    }

    /// Allocate with already-typed targets.
    pub fn allocate_counts(
        &self,
        costs: &CostMatrix,
        targets: &TargetCounts,
    ) -> Result<Allocation, AllocationError> {
        check_users(costs, targets.users())?;

        let counts = match targets {
            TargetCounts::Sleep { .. } => {
                tracing::debug!(subcarriers = costs.subcarriers(), "sleep slot, nothing to allocate");
                return Ok(Allocation::Sleep { subcarriers: costs.subcarriers() });
            }
            TargetCounts::Active(counts) => counts.as_slice(),
        };

        let target_sum = targets.total();
        if target_sum != costs.subcarriers() {
            tracing::warn!(target_sum, subcarriers = costs.subcarriers(), "targets do not cover the band");
            return Err(AllocationError::InconsistentTarget {
                target_sum,
                subcarriers: costs.subcarriers(),
            });
        }

        tracing::debug!(
            subcarriers = costs.subcarriers(),
            users = costs.users(),
            "rcg allocation start"
        );

        let mut state = Working::initial(costs, counts)?;
        let initial_load = state.load.snapshot();
        tracing::debug!(?initial_load, "initial assignment");

        let mut trades = Vec::new();
        let mut trade_count = 0usize;
        for user in 0..costs.users() {
            while state.load.state(user).is_overloaded() {
                let trade = state.nearest_neighbour(costs, user)?;
                state.apply(&trade);
                tracing::trace!(
                    subcarrier = trade.subcarrier,
                    from = trade.from,
                    to = trade.to,
                    cost_delta = trade.cost_delta,
                    "trade"
                );
                trade_count += 1;
                if self.config.record_trades {
                    trades.push(trade);
                }
            }
        }
        debug_assert!(state.load.is_balanced());

        tracing::debug!(trades = trade_count, "rcg allocation done");
        Ok(Allocation::Assigned(Assignment {
            users: costs.users(),
            owners: state.owners,
            initial_load,
            trades,
            trade_count,
        }))
    }
}

/// Allocate with the default configuration.
///
/// ```rust
/// use rcg_core::{allocate, CostMatrix};
///
/// let costs = CostMatrix::from_array(&[[10.0, 1.0], [9.0, 2.0], [1.0, 10.0]]);
/// let allocation = allocate(&costs, &[1.0, 2.0]).unwrap();
///
/// assert_eq!(allocation.initial_map(), Some(&[2, 1][..]));
/// let assignment = allocation.assignment().unwrap();
/// assert_eq!(assignment.owners(), &[0, 1, 1]);
/// ```
pub fn allocate(costs: &CostMatrix, targets: &[f32]) -> Result<Allocation, AllocationError> {
    RateCravingGreedy::default().allocate(costs, targets)
}

fn check_users(costs: &CostMatrix, targets: usize) -> Result<(), AllocationError> {
    if targets != costs.users() {
        tracing::warn!(users = costs.users(), targets, "rcg input mismatch");
        return Err(AllocationError::InputMismatch { users: costs.users(), targets });
    }
    Ok(())
}

// ─── Working state ───────────────────────────────────────────────────────────

/// Owner vector and load counter, kept in lockstep.
struct Working<'t> {
    owners: Vec<usize>,
    load: UserLoad<'t>,
}

impl<'t> Working<'t> {
    /// Phase 1: each subcarrier goes to its best user regardless of targets.
    fn initial(costs: &CostMatrix, targets: &'t [usize]) -> Result<Self, AllocationError> {
        let mut owners = Vec::with_capacity(costs.subcarriers());
        let mut load = UserLoad::new(targets);
        for subcarrier in 0..costs.subcarriers() {
            let user = costs
                .best_user(subcarrier)
                .ok_or(AllocationError::UnrankableSubcarrier { subcarrier })?;
            owners.push(user);
            load.assign(user);
        }
        Ok(Self { owners, load })
    }

    /// Phase 2 step: the cheapest move of one of `user`'s subcarriers to a
    /// dissatisfied user.
    fn nearest_neighbour(&self, costs: &CostMatrix, user: usize) -> Result<Trade, AllocationError> {
        let candidates: Vec<usize> = (0..costs.users())
            .filter(|&c| c != user && self.load.state(c) == LoadState::Dissatisfied)
            .collect();
        if candidates.is_empty() {
            return Err(AllocationError::InconsistentTarget {
                target_sum: (0..self.load.users()).map(|u| self.load.target(u)).sum(),
                subcarriers: self.owners.len(),
            });
        }

        let mut best: Option<(f32, Trade)> = None;
        for (subcarrier, _) in self.owners.iter().enumerate().filter(|&(_, &o)| o == user) {
            let own = costs.get(subcarrier, user);
            for &to in &candidates {
                let cost_delta = costs.get(subcarrier, to) - own;
                if cost_delta.is_nan() {
                    continue;
                }
                let distance = abs_f32(cost_delta);
                // strict < keeps the first pair in row-major order
                if best.as_ref().map_or(true, |(d, _)| distance < *d) {
                    best = Some((distance, Trade { subcarrier, from: user, to, cost_delta }));
                }
            }
        }
        best.map(|(_, t)| t).ok_or(AllocationError::Untradeable { user })
    }

    fn apply(&mut self, trade: &Trade) {
        self.owners[trade.subcarrier] = trade.to;
        self.load.transfer(trade.from, trade.to);
    }
}
