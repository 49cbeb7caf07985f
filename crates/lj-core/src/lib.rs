//! # LJ-Baseline Core Library
//!
//! A shifted, truncated 12-6 Lennard-Jones pair potential for batches of
//! atomistic configurations, meant to be used as the physical baseline below a
//! learned interatomic potential.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`SystemSnapshot`, `NeighborPair`),
//!   the pure mathematics of the force field (`potentials`, `mixing`), the neighbor-list
//!   builder and frame file I/O.
//!
//! - **[`engine`]: The Logic Core.** The `LennardJonesEvaluator`, built once from an
//!   immutable configuration and shared freely between threads, together with the
//!   `AtomisticModel` contract a host runtime uses to drive it.
//!
//! - **[`workflows`]: The Public API.** End-to-end evaluation of a batch of frames:
//!   parameter loading, neighbor-list construction and evaluation in one call.

pub mod core;
pub mod engine;
pub mod workflows;
