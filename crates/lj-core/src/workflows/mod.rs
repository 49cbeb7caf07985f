//! # Workflows Module
//!
//! End-to-end procedures built on the `core` and `engine` layers.
//!
//! ## Overview
//!
//! A workflow takes plain inputs (frames and an [`crate::engine::config::EvaluationConfig`]),
//! loads what it needs from disk, drives the evaluator and returns records ready
//! for reporting.
//!
//! - **Evaluation Workflow** ([`evaluate`]) - Lennard-Jones energies of a batch of frames,
//!   optionally per atom and restricted to a selection of atoms.

pub mod evaluate;
