use super::params::TypeParams;
use super::potentials;
use crate::core::models::types::AtomType;
use itertools::Itertools;
use std::collections::BTreeMap;

/// Combined Lennard-Jones constants for one unordered pair of atom types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairParameter {
    pub sigma: f64,
    pub epsilon: f64,
    pub energy_at_cutoff: f64,
}

impl PairParameter {
    /// Mixes two single-type parameter sets with the Lorentz-Berthelot rules.
    pub fn lorentz_berthelot(a: &TypeParams, b: &TypeParams, cutoff: f64) -> Self {
        let sigma = (a.sigma + b.sigma) / 2.0;
        let epsilon = (a.epsilon * b.epsilon).sqrt();
        Self {
            sigma,
            epsilon,
            energy_at_cutoff: potentials::energy_at_cutoff(cutoff, sigma, epsilon),
        }
    }

    /// Shifted pair energy at squared distance `r2`.
    #[inline]
    pub fn energy(&self, r2: f64) -> f64 {
        potentials::shifted_lennard_jones_12_6_sq(r2, self.sigma, self.epsilon, self.energy_at_cutoff)
    }
}

/// The symmetric table of mixed parameters for every pair of configured types.
///
/// Types are stored sorted and the table is dense (`n * n` entries), so that a
/// lookup by type index is a single slice access. Only the upper triangle is
/// computed; the lower triangle is a mirror of it, which keeps
/// `get(i, j) == get(j, i)` exact rather than approximate.
#[derive(Debug, Clone, PartialEq)]
pub struct PairParameters {
    cutoff: f64,
    types: Vec<AtomType>,
    table: Vec<PairParameter>,
}

impl PairParameters {
    pub fn new(params: &BTreeMap<AtomType, TypeParams>, cutoff: f64) -> Self {
        let types: Vec<AtomType> = params.keys().copied().collect();
        let single: Vec<&TypeParams> = params.values().collect();
        let n = types.len();

        let mut table = vec![
            PairParameter {
                sigma: 0.0,
                epsilon: 0.0,
                energy_at_cutoff: 0.0,
            };
            n * n
        ];
        for pair in (0..n).combinations_with_replacement(2) {
            let (i, j) = (pair[0], pair[1]);
            let mixed = PairParameter::lorentz_berthelot(single[i], single[j], cutoff);
            table[i * n + j] = mixed;
            table[j * n + i] = mixed;
        }

        Self {
            cutoff,
            types,
            table,
        }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// The configured atom types, sorted.
    pub fn atomic_types(&self) -> &[AtomType] {
        &self.types
    }

    pub fn contains_type(&self, atom_type: AtomType) -> bool {
        self.index_of(atom_type).is_some()
    }

    /// Dense index of a configured type, used for repeated lookups in hot loops.
    #[inline]
    pub fn index_of(&self, atom_type: AtomType) -> Option<usize> {
        self.types.binary_search(&atom_type).ok()
    }

    pub fn get(&self, a: AtomType, b: AtomType) -> Option<&PairParameter> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.get_by_index(i, j))
    }

    /// # Panics
    ///
    /// Panics if either index is not smaller than the number of configured types.
    #[inline]
    pub fn get_by_index(&self, i: usize, j: usize) -> &PairParameter {
        &self.table[i * self.types.len() + j]
    }

    /// Number of distinct unordered type pairs.
    pub fn len(&self) -> usize {
        let n = self.types.len();
        n * (n + 1) / 2
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates over every unordered type pair once, smaller type first.
    pub fn iter(&self) -> impl Iterator<Item = ((AtomType, AtomType), &PairParameter)> + '_ {
        let n = self.types.len();
        (0..n)
            .combinations_with_replacement(2)
            .map(move |pair| {
                let (i, j) = (pair[0], pair[1]);
                ((self.types[i], self.types[j]), self.get_by_index(i, j))
            })
    }
}
