//! # Core Models Module
//!
//! This module contains the plain data structures describing the inputs of a
//! Lennard-Jones evaluation.
//!
//! ## Overview
//!
//! All models are immutable once constructed and carry no evaluation state. A
//! [`system::SystemSnapshot`] is owned by the caller and only borrowed by the
//! evaluator for the duration of one call; neighbor pairs are produced per call
//! by whoever builds the neighbor list.
//!
//! ## Key Components
//!
//! - [`types`] - The integer [`types::AtomType`] code used as a parameter lookup key
//! - [`cell`] - Periodic unit cells with per-axis periodicity
//! - [`system`] - Positions, types and optional cell of one configuration
//! - [`pair`] - A single neighbor pair with its displacement vector
//! - [`selection`] - `(system, atom)` sets restricting which pairs contribute
//!
//! ## Usage
//!
//! ```ignore
//! use ljbaseline::core::models::{system::SystemSnapshot, types::AtomType};
//! use nalgebra::Point3;
//!
//! let system = SystemSnapshot::new(
//!     vec![Point3::origin(), Point3::new(3.0, 0.0, 0.0)],
//!     vec![AtomType(18), AtomType(18)],
//! )?;
//! ```

pub mod cell;
pub mod pair;
pub mod selection;
pub mod system;
pub mod types;
