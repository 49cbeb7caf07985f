use super::error::ConfigurationError;
use crate::core::forcefield::params::TypeParams;
use crate::core::models::types::AtomType;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_ENERGY_UNIT: &str = "eV";
pub const DEFAULT_LENGTH_UNIT: &str = "Angstrom";

/// Everything a [`LennardJonesEvaluator`](super::evaluator::LennardJonesEvaluator)
/// needs at construction. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatorConfig {
    pub cutoff: f64,
    pub type_params: BTreeMap<AtomType, TypeParams>,
    /// Neighbor lists contain both `(i, j)` and `(j, i)`; each pair then counts half.
    pub full_neighbor_list: bool,
    /// Scan every half list for pairs stored in both orientations before summing.
    pub check_neighbor_list: bool,
    /// When set, every listed type must have parameters, checked at construction.
    pub expected_types: Option<Vec<AtomType>>,
    pub energy_unit: String,
    pub length_unit: String,
}

impl EvaluatorConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.cutoff.is_finite() && self.cutoff > 0.0) {
            return Err(ConfigurationError::InvalidCutoff(self.cutoff));
        }
        for (&atom_type, params) in &self.type_params {
            let sigma_ok = params.sigma.is_finite() && params.sigma > 0.0;
            let epsilon_ok = params.epsilon.is_finite() && params.epsilon >= 0.0;
            if !(sigma_ok && epsilon_ok) {
                return Err(ConfigurationError::InvalidTypeParameters {
                    atom_type,
                    sigma: params.sigma,
                    epsilon: params.epsilon,
                });
            }
        }
        if let Some(expected) = &self.expected_types {
            if let Some(&missing) = expected
                .iter()
                .find(|atom_type| !self.type_params.contains_key(atom_type))
            {
                return Err(ConfigurationError::MissingTypeParameters(missing));
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct EvaluatorConfigBuilder {
    cutoff: Option<f64>,
    type_params: Option<BTreeMap<AtomType, TypeParams>>,
    full_neighbor_list: bool,
    check_neighbor_list: bool,
    expected_types: Option<Vec<AtomType>>,
    energy_unit: Option<String>,
    length_unit: Option<String>,
}

impl EvaluatorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn type_params(mut self, params: BTreeMap<AtomType, TypeParams>) -> Self {
        self.type_params = Some(params);
        self
    }
    pub fn full_neighbor_list(mut self, full: bool) -> Self {
        self.full_neighbor_list = full;
        self
    }
    pub fn check_neighbor_list(mut self, check: bool) -> Self {
        self.check_neighbor_list = check;
        self
    }
    pub fn expected_types(mut self, types: impl IntoIterator<Item = AtomType>) -> Self {
        self.expected_types = Some(types.into_iter().collect());
        self
    }
    pub fn energy_unit(mut self, unit: impl Into<String>) -> Self {
        self.energy_unit = Some(unit.into());
        self
    }
    pub fn length_unit(mut self, unit: impl Into<String>) -> Self {
        self.length_unit = Some(unit.into());
        self
    }

    pub fn build(self) -> Result<EvaluatorConfig, ConfigurationError> {
        let config = EvaluatorConfig {
            cutoff: self
                .cutoff
                .ok_or(ConfigurationError::MissingParameter("cutoff"))?,
            type_params: self
                .type_params
                .ok_or(ConfigurationError::MissingParameter("type_params"))?,
            full_neighbor_list: self.full_neighbor_list,
            check_neighbor_list: self.check_neighbor_list,
            expected_types: self.expected_types,
            energy_unit: self
                .energy_unit
                .unwrap_or_else(|| DEFAULT_ENERGY_UNIT.to_string()),
            length_unit: self
                .length_unit
                .unwrap_or_else(|| DEFAULT_LENGTH_UNIT.to_string()),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Settings of the end-to-end evaluation workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    pub parameters_path: PathBuf,
    pub cutoff: f64,
    pub full_neighbor_list: bool,
    pub check_neighbor_list: bool,
    pub per_atom: bool,
    /// Atom indices counted in every frame; `None` counts all atoms.
    pub selected_atoms: Option<Vec<usize>>,
    pub energy_unit: String,
    pub length_unit: String,
}

#[derive(Default)]
pub struct EvaluationConfigBuilder {
    parameters_path: Option<PathBuf>,
    cutoff: Option<f64>,
    full_neighbor_list: bool,
    check_neighbor_list: bool,
    per_atom: bool,
    selected_atoms: Option<Vec<usize>>,
    energy_unit: Option<String>,
    length_unit: Option<String>,
}

impl EvaluationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parameters_path(mut self, path: PathBuf) -> Self {
        self.parameters_path = Some(path);
        self
    }
    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn full_neighbor_list(mut self, full: bool) -> Self {
        self.full_neighbor_list = full;
        self
    }
    pub fn check_neighbor_list(mut self, check: bool) -> Self {
        self.check_neighbor_list = check;
        self
    }
    pub fn per_atom(mut self, per_atom: bool) -> Self {
        self.per_atom = per_atom;
        self
    }
    pub fn selected_atoms(mut self, atoms: Option<Vec<usize>>) -> Self {
        self.selected_atoms = atoms;
        self
    }
    pub fn energy_unit(mut self, unit: impl Into<String>) -> Self {
        self.energy_unit = Some(unit.into());
        self
    }
    pub fn length_unit(mut self, unit: impl Into<String>) -> Self {
        self.length_unit = Some(unit.into());
        self
    }

    pub fn build(self) -> Result<EvaluationConfig, ConfigurationError> {
        let cutoff = self
            .cutoff
            .ok_or(ConfigurationError::MissingParameter("cutoff"))?;
        if !(cutoff.is_finite() && cutoff > 0.0) {
            return Err(ConfigurationError::InvalidCutoff(cutoff));
        }
        Ok(EvaluationConfig {
            parameters_path: self
                .parameters_path
                .ok_or(ConfigurationError::MissingParameter("parameters_path"))?,
            cutoff,
            full_neighbor_list: self.full_neighbor_list,
            check_neighbor_list: self.check_neighbor_list,
            per_atom: self.per_atom,
            selected_atoms: self.selected_atoms,
            energy_unit: self
                .energy_unit
                .unwrap_or_else(|| DEFAULT_ENERGY_UNIT.to_string()),
            length_unit: self
                .length_unit
                .unwrap_or_else(|| DEFAULT_LENGTH_UNIT.to_string()),
        })
    }
}
