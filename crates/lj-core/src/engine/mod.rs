//! # Engine Module
//!
//! The evaluation layer of LJ-Baseline: it turns per-type parameters into an
//! immutable pair table and sums shifted Lennard-Jones energies over neighbor
//! lists for whole batches of systems.
//!
//! ## Overview
//!
//! An [`evaluator::LennardJonesEvaluator`] is built once from an
//! [`config::EvaluatorConfig`] and then called any number of times, from any
//! number of threads. It never builds neighbor lists itself; it declares the
//! list it needs and trusts the caller to provide it.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Evaluator and workflow settings with their builders
//! - **Evaluation** ([`evaluator`]) - Total, per-atom and per-type-pair energies
//! - **Host Interface** ([`interface`]) - Capabilities and the `AtomisticModel` contract
//! - **Error Handling** ([`error`]) - Configuration and evaluation errors

pub mod config;
pub mod error;
pub mod evaluator;
pub mod interface;
