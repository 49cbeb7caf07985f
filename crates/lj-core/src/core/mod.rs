//! # Core Module
//!
//! Stateless building blocks of the Lennard-Jones baseline: the data that
//! describes atomistic systems, the mathematics of the pair potential, and the
//! collaborators that feed the evaluator.
//!
//! ## Overview
//!
//! Nothing in this layer holds state between calls. Systems, neighbor pairs and
//! parameter tables are plain values; the functions that operate on them are
//! pure and deterministic.
//!
//! ## Architecture
//!
//! - **System Representation** ([`models`]) - Atom types, unit cells, system snapshots,
//!   neighbor pairs and atom selections
//! - **Force Field** ([`forcefield`]) - Per-type parameters, Lorentz-Berthelot mixing and
//!   the shifted 12-6 potential
//! - **Neighbor Search** ([`neighbors`]) - Half and full neighbor lists with periodic images,
//!   plus a check of the half-list convention
//! - **File I/O** ([`io`]) - Reading frames from (extended) XYZ files
//! - **Utilities** ([`utils`]) - Element symbol lookup

pub mod forcefield;
pub mod io;
pub mod models;
pub mod neighbors;
pub mod utils;
