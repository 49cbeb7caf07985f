use super::config::EvaluatorConfig;
use super::error::{ConfigurationError, EvaluationError};
use crate::core::forcefield::mixing::{PairParameter, PairParameters};
use crate::core::models::pair::NeighborPair;
use crate::core::models::selection::AtomSelection;
use crate::core::models::system::SystemSnapshot;
use crate::core::models::types::AtomType;
use crate::core::neighbors::{NeighborListOptions, find_duplicate_pair};
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Shifted, truncated 12-6 Lennard-Jones energy of batches of systems.
///
/// The evaluator owns an immutable [`PairParameters`] table built once at
/// construction and holds no other state, so it can be shared across threads
/// and called any number of times.
///
/// Every entry point takes the systems, one neighbor list per system and an
/// optional [`AtomSelection`]. A pair contributes when its squared length is
/// within the cutoff and, if a selection is given, at least one of its two atoms
/// is selected in that system. Each contribution is
/// `4ε[(σ²/r²)⁶ - (σ²/r²)³] - E(r_c)`, halved when the evaluator is configured
/// for full neighbor lists.
#[derive(Debug, Clone)]
pub struct LennardJonesEvaluator {
    pair_parameters: PairParameters,
    options: NeighborListOptions,
    check_neighbor_list: bool,
    energy_unit: String,
    length_unit: String,
}

impl LennardJonesEvaluator {
    pub fn new(config: &EvaluatorConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let pair_parameters = PairParameters::new(&config.type_params, config.cutoff);
        let options = if config.full_neighbor_list {
            NeighborListOptions::full(config.cutoff)
        } else {
            NeighborListOptions::half(config.cutoff)
        }
        .with_strict(true);

        debug!(
            n_types = pair_parameters.atomic_types().len(),
            n_pairs = pair_parameters.len(),
            cutoff = config.cutoff,
            full_list = config.full_neighbor_list,
            "Lennard-Jones pair table built."
        );

        Ok(Self {
            pair_parameters,
            options,
            check_neighbor_list: config.check_neighbor_list,
            energy_unit: config.energy_unit.clone(),
            length_unit: config.length_unit.clone(),
        })
    }

    pub fn cutoff(&self) -> f64 {
        self.pair_parameters.cutoff()
    }

    pub fn pair_parameters(&self) -> &PairParameters {
        &self.pair_parameters
    }

    pub fn atomic_types(&self) -> &[AtomType] {
        self.pair_parameters.atomic_types()
    }

    /// The neighbor list every input must be built with.
    pub fn requested_neighbor_list(&self) -> NeighborListOptions {
        self.options
    }

    pub fn energy_unit(&self) -> &str {
        &self.energy_unit
    }

    pub fn length_unit(&self) -> &str {
        &self.length_unit
    }

    /// Total energy of every system, in input order.
    #[instrument(skip_all, name = "lj_evaluate", fields(n_systems = systems.len()))]
    pub fn evaluate(
        &self,
        systems: &[SystemSnapshot],
        neighbors: &[Vec<NeighborPair>],
        selected: Option<&AtomSelection>,
    ) -> Result<Vec<f64>, EvaluationError> {
        self.map_systems(systems, neighbors, selected, |index, system, pairs| {
            let mut total = 0.0;
            self.accumulate(index, system, pairs, selected, |_, _, energy| {
                total += energy
            })?;
            Ok(self.checked_total(index, total))
        })
    }

    /// Energy of every atom of every system; half of each pair energy goes to
    /// each of its two atoms, so the values of one system sum to its total.
    #[instrument(skip_all, name = "lj_evaluate_per_atom", fields(n_systems = systems.len()))]
    pub fn evaluate_per_atom(
        &self,
        systems: &[SystemSnapshot],
        neighbors: &[Vec<NeighborPair>],
        selected: Option<&AtomSelection>,
    ) -> Result<Vec<Vec<f64>>, EvaluationError> {
        self.map_systems(systems, neighbors, selected, |index, system, pairs| {
            let mut per_atom = vec![0.0; system.len()];
            self.accumulate(index, system, pairs, selected, |pair, _, energy| {
                per_atom[pair.first] += 0.5 * energy;
                per_atom[pair.second] += 0.5 * energy;
            })?;
            self.checked_total(index, per_atom.iter().sum());
            Ok(per_atom)
        })
    }

    /// Energy of every system split by unordered atom type pair (smaller type first).
    #[instrument(skip_all, name = "lj_evaluate_by_pair_type", fields(n_systems = systems.len()))]
    pub fn evaluate_by_pair_type(
        &self,
        systems: &[SystemSnapshot],
        neighbors: &[Vec<NeighborPair>],
        selected: Option<&AtomSelection>,
    ) -> Result<Vec<BTreeMap<(AtomType, AtomType), f64>>, EvaluationError> {
        self.map_systems(systems, neighbors, selected, |index, system, pairs| {
            let mut contributions = BTreeMap::new();
            self.accumulate(index, system, pairs, selected, |_, key, energy| {
                *contributions.entry(key).or_insert(0.0) += energy;
            })?;
            Ok(contributions)
        })
    }

    fn map_systems<T, F>(
        &self,
        systems: &[SystemSnapshot],
        neighbors: &[Vec<NeighborPair>],
        selected: Option<&AtomSelection>,
        per_system: F,
    ) -> Result<Vec<T>, EvaluationError>
    where
        T: Send,
        F: Fn(usize, &SystemSnapshot, &[NeighborPair]) -> Result<T, EvaluationError> + Sync,
    {
        if systems.len() != neighbors.len() {
            return Err(EvaluationError::BatchSizeMismatch {
                systems: systems.len(),
                neighbor_lists: neighbors.len(),
            });
        }
        if let Some(system) = selected.and_then(AtomSelection::max_system) {
            if system >= systems.len() {
                return Err(EvaluationError::SelectionOutOfRange {
                    system,
                    batch_size: systems.len(),
                });
            }
        }

        #[cfg(not(feature = "parallel"))]
        let iterator = systems.iter().zip(neighbors.iter()).enumerate();

        #[cfg(feature = "parallel")]
        let iterator = systems.par_iter().zip(neighbors.par_iter()).enumerate();

        // per-system results keep input order, so the reported error is always
        // the one of the lowest failing system
        let results: Vec<Result<T, EvaluationError>> = iterator
            .map(|(index, (system, pairs))| per_system(index, system, pairs))
            .collect();
        results.into_iter().collect()
    }

    /// Walks the neighbor list of one system and hands every contributing pair,
    /// its normalized type key and its (weighted) energy to `sink`.
    fn accumulate(
        &self,
        index: usize,
        system: &SystemSnapshot,
        pairs: &[NeighborPair],
        selected: Option<&AtomSelection>,
        mut sink: impl FnMut(&NeighborPair, (AtomType, AtomType), f64),
    ) -> Result<(), EvaluationError> {
        if self.check_neighbor_list && !self.options.full_list {
            if let Some((first, second)) = find_duplicate_pair(pairs) {
                return Err(EvaluationError::NeighborListConvention {
                    system: index,
                    first,
                    second,
                });
            }
        }

        let types = system.types();
        let type_indices: Vec<Option<usize>> = types
            .iter()
            .map(|&atom_type| self.pair_parameters.index_of(atom_type))
            .collect();
        let cutoff2 = self.cutoff() * self.cutoff();
        let weight = if self.options.full_list { 0.5 } else { 1.0 };
        let mut skipped_beyond_cutoff = 0usize;

        for pair in pairs {
            let param = self.lookup(index, system, &type_indices, pair)?;

            if let Some(selection) = selected {
                if !selection.contains(index, pair.first) && !selection.contains(index, pair.second)
                {
                    continue;
                }
            }

            let r2 = pair.distance_squared();
            if r2 > cutoff2 {
                skipped_beyond_cutoff += 1;
                continue;
            }

            let key = types[pair.first].ordered_pair(types[pair.second]);
            sink(pair, key, weight * param.energy(r2));
        }

        debug!(
            system = index,
            n_pairs = pairs.len(),
            skipped_beyond_cutoff,
            "System evaluated."
        );
        Ok(())
    }

    fn lookup(
        &self,
        index: usize,
        system: &SystemSnapshot,
        type_indices: &[Option<usize>],
        pair: &NeighborPair,
    ) -> Result<&PairParameter, EvaluationError> {
        let size = system.len();
        for atom in [pair.first, pair.second] {
            if atom >= size {
                return Err(EvaluationError::AtomIndexOutOfRange {
                    system: index,
                    index: atom,
                    size,
                });
            }
        }
        match (type_indices[pair.first], type_indices[pair.second]) {
            (Some(i), Some(j)) => Ok(self.pair_parameters.get_by_index(i, j)),
            _ => {
                let types = system.types();
                let (first, second) = types[pair.first].ordered_pair(types[pair.second]);
                Err(ConfigurationError::MissingPairParameters { first, second }.into())
            }
        }
    }

    fn checked_total(&self, index: usize, total: f64) -> f64 {
        if !total.is_finite() {
            warn!(
                system = index,
                energy = total,
                "Lennard-Jones energy is not finite; two atoms probably overlap."
            );
        }
        total
    }
}
