use super::options::NeighborListOptions;
use crate::core::models::cell::UnitCell;
use crate::core::models::pair::NeighborPair;
use crate::core::models::system::SystemSnapshot;
use nalgebra::{Point3, Vector3};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NeighborListError {
    #[error("Neighbor list cutoff must be positive and finite, got {0}")]
    InvalidCutoff(f64),
}

/// Builds the neighbor list of a system by brute force over all atom pairs and
/// all periodic images within reach of the cutoff.
///
/// Every pair with `|r_ij| <= cutoff` is returned, so the list always satisfies
/// `options.strict`. With `options.full_list == false` each unordered pair
/// (including an atom with one of its own images) appears exactly once.
///
/// # Errors
///
/// Returns [`NeighborListError::InvalidCutoff`] for a non-positive or non-finite cutoff.
#[instrument(level = "debug", skip_all, fields(n_atoms = system.len(), cutoff = options.cutoff, full = options.full_list))]
pub fn build_neighbor_list(
    system: &SystemSnapshot,
    options: &NeighborListOptions,
) -> Result<Vec<NeighborPair>, NeighborListError> {
    let cutoff = options.cutoff;
    if !(cutoff.is_finite() && cutoff > 0.0) {
        return Err(NeighborListError::InvalidCutoff(cutoff));
    }
    let cutoff2 = cutoff * cutoff;

    let (positions, images) = match system.cell() {
        Some(cell) => (
            wrap_positions(cell, system.positions()),
            image_translations(cell, cutoff),
        ),
        None => (
            system.positions().to_vec(),
            vec![(Vector3::zeros(), Vector3::zeros())],
        ),
    };

    let n = positions.len();
    let mut pairs = Vec::new();
    for (shift, translation) in &images {
        let is_home_cell = *shift == Vector3::zeros();
        let keeps_self_image = options.full_list || is_lexicographically_positive(shift);
        for i in 0..n {
            let start = if options.full_list { 0 } else { i };
            for j in start..n {
                if i == j && (is_home_cell || !keeps_self_image) {
                    continue;
                }
                let vector = positions[j] - positions[i] + translation;
                if vector.norm_squared() <= cutoff2 {
                    pairs.push(NeighborPair::new(i, j, vector));
                }
            }
        }
    }

    debug!(
        n_pairs = pairs.len(),
        n_images = images.len(),
        "Neighbor list built."
    );
    Ok(pairs)
}

/// Folds positions back into the cell along its periodic directions.
fn wrap_positions(cell: &UnitCell, positions: &[Point3<f64>]) -> Vec<Point3<f64>> {
    positions
        .iter()
        .map(|position| {
            let mut fractional = cell.to_fractional(position);
            for axis in 0..3 {
                if cell.is_periodic(axis) {
                    fractional[axis] -= fractional[axis].floor();
                }
            }
            cell.to_cartesian(&fractional)
        })
        .collect()
}

/// All image shifts (and their cartesian translations) that can bring two
/// wrapped atoms within `cutoff` of each other.
fn image_translations(cell: &UnitCell, cutoff: f64) -> Vec<(Vector3<i32>, Vector3<f64>)> {
    let widths = cell.perpendicular_widths();
    let reach: [i32; 3] = std::array::from_fn(|axis| {
        if cell.is_periodic(axis) {
            (cutoff / widths[axis]).ceil() as i32
        } else {
            0
        }
    });

    let mut images = Vec::new();
    for a in -reach[0]..=reach[0] {
        for b in -reach[1]..=reach[1] {
            for c in -reach[2]..=reach[2] {
                let shift = Vector3::new(a, b, c);
                images.push((shift, cell.shift_vector(&shift)));
            }
        }
    }
    images
}

fn is_lexicographically_positive(shift: &Vector3<i32>) -> bool {
    shift
        .iter()
        .find(|&&component| component != 0)
        .is_some_and(|&component| component > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::types::AtomType;
    use crate::core::neighbors::convention::find_duplicate_pair;

    const TOLERANCE: f64 = 1e-9;

    fn system_of(positions: Vec<Point3<f64>>) -> SystemSnapshot {
        let types = vec![AtomType(18); positions.len()];
        SystemSnapshot::new(positions, types).unwrap()
    }

    #[test]
    fn half_list_stores_each_isolated_pair_once() {
        let system = system_of(vec![Point3::origin(), Point3::new(1.5, 0.0, 0.0)]);
        let pairs = build_neighbor_list(&system, &NeighborListOptions::half(2.0)).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].first, pairs[0].second), (0, 1));
        assert_eq!(pairs[0].vector, Vector3::new(1.5, 0.0, 0.0));
    }

    #[test]
    fn full_list_stores_both_orientations() {
        let system = system_of(vec![Point3::origin(), Point3::new(1.5, 0.0, 0.0)]);
        let pairs = build_neighbor_list(&system, &NeighborListOptions::full(2.0)).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].reversed(), pairs[1]);
    }

    #[test]
    fn pairs_beyond_cutoff_are_excluded() {
        let system = system_of(vec![Point3::origin(), Point3::new(2.5, 0.0, 0.0)]);
        let pairs = build_neighbor_list(&system, &NeighborListOptions::half(2.0)).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn single_atom_sees_its_nearest_periodic_images() {
        let cell = UnitCell::orthorhombic(3.0, 3.0, 3.0).unwrap();
        let system = system_of(vec![Point3::new(1.0, 1.0, 1.0)]).with_cell(cell);

        let half = build_neighbor_list(&system, &NeighborListOptions::half(3.5)).unwrap();
        assert_eq!(half.len(), 3);
        assert!(half.iter().all(|p| (p.distance_squared() - 9.0).abs() < TOLERANCE));
        assert_eq!(find_duplicate_pair(&half), None);

        let full = build_neighbor_list(&system, &NeighborListOptions::full(3.5)).unwrap();
        assert_eq!(full.len(), 6);
    }

    #[test]
    fn pairs_across_the_boundary_use_minimum_image() {
        let cell = UnitCell::orthorhombic(10.0, 10.0, 10.0).unwrap();
        let system = system_of(vec![Point3::new(0.5, 5.0, 5.0), Point3::new(9.5, 5.0, 5.0)])
            .with_cell(cell);
        let pairs = build_neighbor_list(&system, &NeighborListOptions::half(2.0)).unwrap();
        assert_eq!(pairs.len(), 1);
        assert!((pairs[0].distance_squared() - 1.0).abs() < TOLERANCE);
        assert!((pairs[0].vector.x + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn atoms_outside_the_cell_are_wrapped() {
        let cell = UnitCell::orthorhombic(10.0, 10.0, 10.0).unwrap();
        let system = system_of(vec![Point3::new(-9.0, 5.0, 5.0), Point3::new(0.5, 5.0, 5.0)])
            .with_cell(cell);
        let pairs = build_neighbor_list(&system, &NeighborListOptions::half(2.0)).unwrap();
        assert_eq!(pairs.len(), 1);
        assert!((pairs[0].distance_squared() - 0.25).abs() < TOLERANCE);
    }

    #[test]
    fn non_periodic_axes_generate_no_images() {
        let cell = UnitCell::orthorhombic(10.0, 10.0, 10.0)
            .unwrap()
            .with_periodicity([true, true, false]);
        let system = system_of(vec![Point3::new(5.0, 5.0, 0.5), Point3::new(5.0, 5.0, 9.5)])
            .with_cell(cell);
        let pairs = build_neighbor_list(&system, &NeighborListOptions::half(2.0)).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn full_list_is_twice_the_half_list_in_a_triclinic_cell() {
        let cell = UnitCell::new(
            Vector3::new(4.0, 0.0, 0.0),
            Vector3::new(1.0, 4.0, 0.0),
            Vector3::new(0.5, 0.5, 4.0),
        )
        .unwrap();
        let system = system_of(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.3, 0.1),
            Point3::new(0.7, 2.2, 1.9),
            Point3::new(3.1, 3.3, 2.7),
        ])
        .with_cell(cell);

        let half = build_neighbor_list(&system, &NeighborListOptions::half(4.5)).unwrap();
        let full = build_neighbor_list(&system, &NeighborListOptions::full(4.5)).unwrap();
        assert!(!half.is_empty());
        assert_eq!(full.len(), 2 * half.len());
        assert_eq!(find_duplicate_pair(&half), None);
        assert!(find_duplicate_pair(&full).is_some());
    }

    #[test]
    fn invalid_cutoff_is_rejected() {
        let system = system_of(vec![Point3::origin()]);
        for cutoff in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = build_neighbor_list(&system, &NeighborListOptions::half(cutoff));
            assert!(matches!(result, Err(NeighborListError::InvalidCutoff(_))));
        }
    }

    #[test]
    fn shift_ordering_keeps_one_of_each_opposite_pair() {
        assert!(is_lexicographically_positive(&Vector3::new(0, 0, 1)));
        assert!(is_lexicographically_positive(&Vector3::new(1, -1, 0)));
        assert!(!is_lexicographically_positive(&Vector3::new(0, -1, 1)));
        assert!(!is_lexicographically_positive(&Vector3::zeros()));
    }
}
