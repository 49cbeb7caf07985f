use super::cell::UnitCell;
use super::types::AtomType;
use nalgebra::Point3;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SystemError {
    #[error("System has {positions} positions but {types} atom types")]
    LengthMismatch { positions: usize, types: usize },
    #[error("Position of atom {index} is not finite")]
    NonFinitePosition { index: usize },
}

/// One atomistic configuration at one instant.
///
/// A snapshot is owned by the caller and is never mutated by the evaluator. The
/// positions and types are kept in lock-step: index `i` in both refers to the
/// same atom, which the constructor enforces.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemSnapshot {
    positions: Vec<Point3<f64>>,
    types: Vec<AtomType>,
    cell: Option<UnitCell>,
}

impl SystemSnapshot {
    /// Creates a non-periodic system.
    ///
    /// # Arguments
    ///
    /// * `positions` - Cartesian coordinates of every atom.
    /// * `types` - The atom type of every atom, in the same order.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::LengthMismatch`] if the two vectors differ in length
    /// and [`SystemError::NonFinitePosition`] if a coordinate is NaN or infinite.
    pub fn new(positions: Vec<Point3<f64>>, types: Vec<AtomType>) -> Result<Self, SystemError> {
        if positions.len() != types.len() {
            return Err(SystemError::LengthMismatch {
                positions: positions.len(),
                types: types.len(),
            });
        }
        if let Some(index) = positions
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(SystemError::NonFinitePosition { index });
        }
        Ok(Self {
            positions,
            types,
            cell: None,
        })
    }

    /// Attaches a periodic cell to the system.
    pub fn with_cell(mut self, cell: UnitCell) -> Self {
        self.cell = Some(cell);
        self
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn types(&self) -> &[AtomType] {
        &self.types
    }

    pub fn cell(&self) -> Option<&UnitCell> {
        self.cell.as_ref()
    }

    pub fn atom_type(&self, index: usize) -> Option<AtomType> {
        self.types.get(index).copied()
    }

    /// The distinct atom types present in this system, sorted.
    pub fn unique_types(&self) -> BTreeSet<AtomType> {
        self.types.iter().copied().collect()
    }
}
