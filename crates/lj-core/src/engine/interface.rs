use super::error::EvaluationError;
use super::evaluator::LennardJonesEvaluator;
use crate::core::models::pair::NeighborPair;
use crate::core::models::selection::AtomSelection;
use crate::core::models::system::SystemSnapshot;
use crate::core::models::types::AtomType;
use crate::core::neighbors::NeighborListOptions;
use std::collections::BTreeMap;

/// Name of the only output the Lennard-Jones model produces.
pub const ENERGY_OUTPUT: &str = "energy";

#[derive(Debug, Clone, PartialEq)]
pub struct ModelOutput {
    pub quantity: String,
    pub unit: String,
    pub per_atom: bool,
}

/// What a model declares to its host before any evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCapabilities {
    pub outputs: BTreeMap<String, ModelOutput>,
    pub atomic_types: Vec<AtomType>,
    pub interaction_range: f64,
    pub length_unit: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputRequest {
    pub per_atom: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputValues {
    PerSystem(Vec<f64>),
    PerAtom(Vec<Vec<f64>>),
}

pub type ModelOutputs = BTreeMap<String, OutputValues>;

/// The contract between an atomistic model and the runtime that drives it: the
/// host reads the capabilities, builds the requested neighbor lists and calls
/// `forward` with the outputs it wants.
pub trait AtomisticModel: Send + Sync {
    fn capabilities(&self) -> ModelCapabilities;

    fn requested_neighbor_lists(&self) -> Vec<NeighborListOptions>;

    fn forward(
        &self,
        systems: &[SystemSnapshot],
        neighbors: &[Vec<NeighborPair>],
        outputs: &BTreeMap<String, OutputRequest>,
        selected: Option<&AtomSelection>,
    ) -> Result<ModelOutputs, EvaluationError>;
}

impl AtomisticModel for LennardJonesEvaluator {
    fn capabilities(&self) -> ModelCapabilities {
        let energy = ModelOutput {
            quantity: ENERGY_OUTPUT.to_string(),
            unit: self.energy_unit().to_string(),
            per_atom: true,
        };
        ModelCapabilities {
            outputs: BTreeMap::from([(ENERGY_OUTPUT.to_string(), energy)]),
            atomic_types: self.atomic_types().to_vec(),
            interaction_range: self.cutoff(),
            length_unit: self.length_unit().to_string(),
        }
    }

    fn requested_neighbor_lists(&self) -> Vec<NeighborListOptions> {
        vec![self.requested_neighbor_list()]
    }

    fn forward(
        &self,
        systems: &[SystemSnapshot],
        neighbors: &[Vec<NeighborPair>],
        outputs: &BTreeMap<String, OutputRequest>,
        selected: Option<&AtomSelection>,
    ) -> Result<ModelOutputs, EvaluationError> {
        let mut results = ModelOutputs::new();
        for (name, request) in outputs {
            if name != ENERGY_OUTPUT {
                return Err(EvaluationError::UnsupportedOutput(name.clone()));
            }
            let values = if request.per_atom {
                OutputValues::PerAtom(self.evaluate_per_atom(systems, neighbors, selected)?)
            } else {
                OutputValues::PerSystem(self.evaluate(systems, neighbors, selected)?)
            };
            results.insert(name.clone(), values);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::params::TypeParams;
    use crate::engine::config::EvaluatorConfigBuilder;
    use nalgebra::{Point3, Vector3};

    fn create_test_model() -> Box<dyn AtomisticModel> {
        let config = EvaluatorConfigBuilder::new()
            .cutoff(5.0)
            .type_params(BTreeMap::from([
                (AtomType(10), TypeParams::new(2.8, 3.0e-3)),
                (AtomType(18), TypeParams::new(3.4, 1.0e-2)),
            ]))
            .energy_unit("kcal/mol")
            .build()
            .unwrap();
        Box::new(LennardJonesEvaluator::new(&config).unwrap())
    }

    fn create_test_batch() -> (Vec<SystemSnapshot>, Vec<Vec<NeighborPair>>) {
        let system = SystemSnapshot::new(
            vec![Point3::origin(), Point3::new(3.2, 0.0, 0.0)],
            vec![AtomType(10), AtomType(18)],
        )
        .unwrap();
        let pairs = vec![NeighborPair::new(0, 1, Vector3::new(3.2, 0.0, 0.0))];
        (vec![system], vec![pairs])
    }

    #[test]
    fn capabilities_describe_the_energy_output() {
        let capabilities = create_test_model().capabilities();
        assert_eq!(capabilities.interaction_range, 5.0);
        assert_eq!(capabilities.atomic_types, vec![AtomType(10), AtomType(18)]);
        assert_eq!(capabilities.length_unit, "Angstrom");

        let energy = &capabilities.outputs[ENERGY_OUTPUT];
        assert_eq!(energy.unit, "kcal/mol");
        assert!(energy.per_atom);
    }

    #[test]
    fn model_requests_a_single_strict_half_list() {
        let requests = create_test_model().requested_neighbor_lists();
        assert_eq!(requests, vec![NeighborListOptions::half(5.0)]);
    }

    #[test]
    fn forward_produces_per_system_and_per_atom_energies() {
        let model = create_test_model();
        let (systems, neighbors) = create_test_batch();

        let total_request = BTreeMap::from([(ENERGY_OUTPUT.to_string(), OutputRequest::default())]);
        let totals = model
            .forward(&systems, &neighbors, &total_request, None)
            .unwrap();
        let OutputValues::PerSystem(totals) = &totals[ENERGY_OUTPUT] else {
            panic!("expected per-system energies");
        };

        let per_atom_request = BTreeMap::from([(
            ENERGY_OUTPUT.to_string(),
            OutputRequest { per_atom: true },
        )]);
        let per_atom = model
            .forward(&systems, &neighbors, &per_atom_request, None)
            .unwrap();
        let OutputValues::PerAtom(per_atom) = &per_atom[ENERGY_OUTPUT] else {
            panic!("expected per-atom energies");
        };

        assert_eq!(totals.len(), 1);
        assert_eq!(per_atom[0].len(), 2);
        assert!((per_atom[0].iter().sum::<f64>() - totals[0]).abs() < 1e-12);
    }

    #[test]
    fn forward_rejects_unknown_outputs() {
        let model = create_test_model();
        let (systems, neighbors) = create_test_batch();
        let request = BTreeMap::from([("forces".to_string(), OutputRequest::default())]);
        let result = model.forward(&systems, &neighbors, &request, None);
        assert_eq!(
            result,
            Err(EvaluationError::UnsupportedOutput("forces".to_string()))
        );
    }

    #[test]
    fn forward_with_no_requests_is_empty() {
        let model = create_test_model();
        let (systems, neighbors) = create_test_batch();
        let outputs = model
            .forward(&systems, &neighbors, &BTreeMap::new(), None)
            .unwrap();
        assert!(outputs.is_empty());
    }
}
