use crate::core::forcefield::params::{ParamLoadError, ParameterSet};
use crate::core::models::pair::NeighborPair;
use crate::core::models::selection::AtomSelection;
use crate::core::models::system::SystemSnapshot;
use crate::core::neighbors::{NeighborListError, build_neighbor_list};
use crate::engine::config::{EvaluationConfig, EvaluatorConfigBuilder};
use crate::engine::error::{ConfigurationError, EvaluationError};
use crate::engine::evaluator::LennardJonesEvaluator;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Energy of one input frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameEnergy {
    pub index: usize,
    pub n_atoms: usize,
    pub energy: f64,
    pub per_atom: Option<Vec<f64>>,
}

impl FrameEnergy {
    pub fn energy_per_atom(&self) -> Option<f64> {
        (self.n_atoms > 0).then(|| self.energy / self.n_atoms as f64)
    }
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to load Lennard-Jones parameters: {0}")]
    Parameters(#[from] ParamLoadError),
    #[error("Invalid evaluator configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Failed to build neighbor lists: {0}")]
    NeighborList(#[from] NeighborListError),
    #[error("Evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),
}

/// Evaluates the Lennard-Jones energy of every frame.
///
/// Loads the parameter file, builds an evaluator that must cover every atom
/// type present in `frames`, builds the neighbor lists it asks for and returns
/// one [`FrameEnergy`] per frame, in input order.
#[instrument(skip_all, name = "evaluation_workflow", fields(n_frames = frames.len()))]
pub fn run(
    frames: &[SystemSnapshot],
    config: &EvaluationConfig,
) -> Result<Vec<FrameEnergy>, WorkflowError> {
    info!(
        path = %config.parameters_path.display(),
        "Loading Lennard-Jones parameters."
    );
    let parameters = ParameterSet::load(&config.parameters_path)?;

    let present_types: BTreeSet<_> = frames
        .iter()
        .flat_map(|frame| frame.types().iter().copied())
        .collect();
    let evaluator_config = EvaluatorConfigBuilder::new()
        .cutoff(config.cutoff)
        .type_params(parameters.as_map().clone())
        .full_neighbor_list(config.full_neighbor_list)
        .check_neighbor_list(config.check_neighbor_list)
        .expected_types(present_types)
        .energy_unit(config.energy_unit.clone())
        .length_unit(config.length_unit.clone())
        .build()?;
    let evaluator = LennardJonesEvaluator::new(&evaluator_config)?;
    info!(
        n_types = evaluator.atomic_types().len(),
        cutoff = evaluator.cutoff(),
        "Evaluator ready."
    );

    let neighbors = build_all_neighbor_lists(frames, &evaluator)?;
    let selection = config
        .selected_atoms
        .as_ref()
        .map(|atoms| selection_for_frames(frames, atoms));

    let energies = evaluator.evaluate(frames, &neighbors, selection.as_ref())?;
    let per_atom = if config.per_atom {
        Some(evaluator.evaluate_per_atom(frames, &neighbors, selection.as_ref())?)
    } else {
        None
    };

    let mut per_atom = per_atom.map(Vec::into_iter);
    let results: Vec<FrameEnergy> = frames
        .iter()
        .zip(energies)
        .enumerate()
        .map(|(index, (frame, energy))| FrameEnergy {
            index,
            n_atoms: frame.len(),
            energy,
            per_atom: per_atom.as_mut().and_then(Iterator::next),
        })
        .collect();

    info!(n_frames = results.len(), "Evaluation complete.");
    Ok(results)
}

fn build_all_neighbor_lists(
    frames: &[SystemSnapshot],
    evaluator: &LennardJonesEvaluator,
) -> Result<Vec<Vec<NeighborPair>>, NeighborListError> {
    let options = evaluator.requested_neighbor_list();

    #[cfg(not(feature = "parallel"))]
    let iterator = frames.iter();

    #[cfg(feature = "parallel")]
    let iterator = frames.par_iter();

    iterator
        .map(|frame| build_neighbor_list(frame, &options))
        .collect()
}

/// The same atom indices in every frame; indices past the end of a frame are dropped.
fn selection_for_frames(frames: &[SystemSnapshot], atoms: &[usize]) -> AtomSelection {
    frames
        .iter()
        .enumerate()
        .flat_map(|(index, frame)| {
            atoms
                .iter()
                .filter(move |&&atom| atom < frame.len())
                .map(move |&atom| (index, atom))
        })
        .collect()
}
