use crate::core::models::pair::NeighborPair;
use nalgebra::Vector3;
use std::collections::HashMap;

/// Displacement vectors are compared on a grid of this spacing.
const VECTOR_RESOLUTION: f64 = 1e-6;

type PairKey = (usize, usize, [i64; 3]);

/// Finds a pair that is present more than once in a neighbor list.
///
/// An interaction `i -> j` with vector `v` is the same as `j -> i` with `-v`, so
/// a half list must not contain both. Exact repeats are reported too. Returns
/// the `(first, second)` atoms of the entry that was stored first, or `None`
/// for a valid half list. Runs in O(pairs) time and memory.
///
/// Vectors are matched with a tolerance: two entries whose components all agree
/// to within `1e-6` are always the same interaction, and entries
/// differing by more than twice that in any component never are.
pub fn find_duplicate_pair(pairs: &[NeighborPair]) -> Option<(usize, usize)> {
    let mut seen: HashMap<PairKey, usize> = HashMap::with_capacity(pairs.len());
    for (index, pair) in pairs.iter().enumerate() {
        let (a, b, vector) = oriented(pair);
        let earlier = lookup_keys(a, b, vector)
            .chain((a == b).then(|| lookup_keys(a, b, -vector)).into_iter().flatten())
            .find_map(|key| seen.get(&key).copied());
        if let Some(earlier) = earlier {
            let stored = &pairs[earlier];
            return Some((stored.first, stored.second));
        }
        seen.entry((a, b, quantize(&vector))).or_insert(index);
    }
    None
}

/// Smaller atom first, with the vector flipped to match.
fn oriented(pair: &NeighborPair) -> (usize, usize, Vector3<f64>) {
    if pair.first <= pair.second {
        (pair.first, pair.second, pair.vector)
    } else {
        (pair.second, pair.first, -pair.vector)
    }
}

/// The grid cell of `vector` and its 26 neighbours, so that two nearly equal
/// vectors on either side of a cell boundary still meet.
fn lookup_keys(a: usize, b: usize, vector: Vector3<f64>) -> impl Iterator<Item = PairKey> {
    let [x, y, z] = quantize(&vector);
    let near = |c: i64, d: i64| c.saturating_add(d);
    (-1..=1i64).flat_map(move |dx| {
        (-1..=1i64).flat_map(move |dy| {
            (-1..=1i64).map(move |dz| (a, b, [near(x, dx), near(y, dy), near(z, dz)]))
        })
    })
}

fn quantize(vector: &Vector3<f64>) -> [i64; 3] {
    [
        (vector.x / VECTOR_RESOLUTION).floor() as i64,
        (vector.y / VECTOR_RESOLUTION).floor() as i64,
        (vector.z / VECTOR_RESOLUTION).floor() as i64,
    ]
}
