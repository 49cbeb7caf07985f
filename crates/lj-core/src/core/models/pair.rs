use nalgebra::Vector3;

/// One candidate interaction between two atoms of the same system.
///
/// `vector` points from the first atom to the second atom and already includes
/// any periodic image shift, so the pair distance never depends on the cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborPair {
    pub first: usize,
    pub second: usize,
    pub vector: Vector3<f64>,
}

impl NeighborPair {
    pub fn new(first: usize, second: usize, vector: Vector3<f64>) -> Self {
        Self {
            first,
            second,
            vector,
        }
    }

    #[inline]
    pub fn distance_squared(&self) -> f64 {
        self.vector.norm_squared()
    }

    /// The same interaction seen from the second atom.
    pub fn reversed(&self) -> Self {
        Self {
            first: self.second,
            second: self.first,
            vector: -self.vector,
        }
    }

    #[inline]
    pub fn involves(&self, atom: usize) -> bool {
        self.first == atom || self.second == atom
    }
}
