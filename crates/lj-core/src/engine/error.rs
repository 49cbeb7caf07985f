use thiserror::Error;

use crate::core::models::types::AtomType;

/// Problems with the evaluator configuration, either caught at construction or
/// discovered when an input needs a type pair the table does not cover.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("No Lennard-Jones parameters for the pair of atom types {first} and {second}")]
    MissingPairParameters { first: AtomType, second: AtomType },

    #[error("No Lennard-Jones parameters for expected atom type {0}")]
    MissingTypeParameters(AtomType),

    #[error("Cutoff must be positive and finite, got {0}")]
    InvalidCutoff(f64),

    #[error(
        "Invalid parameters for atom type {atom_type}: sigma = {sigma}, epsilon = {epsilon} \
         (sigma must be positive, epsilon non-negative, both finite)"
    )]
    InvalidTypeParameters {
        atom_type: AtomType,
        sigma: f64,
        epsilon: f64,
    },

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvaluationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(
        "Neighbor list of system {system} contains the pair ({first}, {second}) in both \
         orientations, but the evaluator expects a half list"
    )]
    NeighborListConvention {
        system: usize,
        first: usize,
        second: usize,
    },

    #[error("Got {systems} systems but {neighbor_lists} neighbor lists")]
    BatchSizeMismatch {
        systems: usize,
        neighbor_lists: usize,
    },

    #[error("Neighbor pair in system {system} refers to atom {index}, but the system has {size} atoms")]
    AtomIndexOutOfRange {
        system: usize,
        index: usize,
        size: usize,
    },

    #[error("Atom selection refers to system {system}, but the batch has {batch_size} systems")]
    SelectionOutOfRange { system: usize, batch_size: usize },

    #[error("Unsupported output requested: '{0}'")]
    UnsupportedOutput(String),
}
