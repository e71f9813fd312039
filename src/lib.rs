//! # rcg-core
//!
//! Rate Craving Greedy (RCG) subcarrier-to-user allocation for OFDMA
//! resource schedulers.
//!
//! ---
//!
//! ## What it solves
//!
//! An upstream rate allocator has already decided *how many* subcarriers
//! each user gets this scheduling interval. RCG decides *which* ones. It
//! takes a goodness score for every (subcarrier, user) pair and returns a
//! one-to-one assignment in which every user ends up with exactly its
//! target count, while giving up as little total goodness as a greedy
//! nearest-neighbour trade can.
//!
//! Two phases:
//!
//! 1. **Crave.** Every subcarrier goes to the user that scores it highest,
//!    regardless of targets.
//! 2. **Trade.** Each overloaded user hands subcarriers to users still below
//!    target, always picking the move that changes total goodness the least.
//!
//! ## The pipeline
//!
//! ```text
//! goodness [S][U] ─→ CostMatrix ─┐
//!                                ├─→ RateCravingGreedy ─→ Allocation
//! targets  [U] (f32, NaN) ─→ TargetCounts ┘        │
//!                                              UserLoad / LoadState
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`matrix`] | [`CostMatrix`] | Dense row-major goodness matrix; NaN-aware argmax |
//! | [`target`] | [`TargetCounts`] | NaN-capable target vector → typed counts or sleep |
//! | [`load`] | [`UserLoad`], [`LoadState`] | Per-user load and overloaded/satisfied classification |
//! | [`rcg`] | [`RateCravingGreedy`], [`Allocation`], [`Assignment`] | The two-phase algorithm |
//! | [`error`] | [`AllocationError`] | Why a request was rejected |
//!
//! ## Example
//!
//! ```rust
//! use rcg_core::{allocate, CostMatrix};
//!
//! // 3 subcarriers, 2 users
//! let costs = CostMatrix::from_array(&[[10.0, 1.0], [9.0, 2.0], [1.0, 10.0]]);
//! let allocation = allocate(&costs, &[1.0, 2.0]).unwrap();
//! let assignment = allocation.assignment().unwrap();
//!
//! assert_eq!(assignment.owners(), &[0, 1, 1]);
//! assert_eq!(assignment.load(), [1, 2]);
//!
//! // all-NaN targets: nobody is scheduled
//! let sleep = allocate(&costs, &[f32::NAN, f32::NAN]).unwrap();
//! assert!(sleep.owner_map().iter().all(|o| o.is_nan()));
//! assert_eq!(sleep.initial_map(), None);
//! ```
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` by default and needs only `alloc`. Enable the
//! `std` feature to forward `std` to its dependencies, `serde` for
//! serialisable results, and `python-ffi` for the PyO3 module.
//!
//! ## License
//!
//! Business Source License 1.1.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi")), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod error;
pub mod load;
pub mod matrix;
pub mod rcg;
pub mod target;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use error::AllocationError;
pub use load::{LoadState, UserLoad};
pub use matrix::CostMatrix;
pub use rcg::{allocate, Allocation, Assignment, RateCravingGreedy, RcgConfig, Trade};
pub use target::TargetCounts;
