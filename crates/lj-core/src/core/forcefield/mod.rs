//! # Force Field Module
//!
//! This module provides the Lennard-Jones parameters and the pair potential used by
//! the baseline evaluator.
//!
//! ## Overview
//!
//! Single-type constants are read from a parameter file ([`params::ParameterSet`]),
//! mixed once into a symmetric per-pair table with the Lorentz-Berthelot rules
//! ([`mixing::PairParameters`]) and evaluated through a shifted 12-6 potential
//! written in terms of the squared distance ([`potentials`]).
//!
//! ## Key Components
//!
//! - [`params`] - Per-type `{sigma, epsilon}` and their TOML/CSV loaders
//! - [`mixing`] - Lorentz-Berthelot combination and cutoff-shift precomputation
//! - [`potentials`] - The 12-6 potential as a function of `r²`
//!
//! ## Usage
//!
//! ```ignore
//! use ljbaseline::core::forcefield::{mixing::PairParameters, params::ParameterSet};
//!
//! let params = ParameterSet::load(Path::new("lj.toml"))?;
//! let table = PairParameters::new(params.as_map(), 6.0);
//! let energy = table.get(AtomType(8), AtomType(1)).unwrap().energy(9.0);
//! ```

pub mod mixing;
pub mod params;
pub mod potentials;
