use nalgebra::{Matrix3, Point3, Vector3};
use thiserror::Error;

const MIN_CELL_VOLUME: f64 = 1e-12;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CellError {
    #[error("Unit cell is degenerate (volume {volume:.3e})")]
    Degenerate { volume: f64 },
    #[error("Unit cell vectors must be finite")]
    NonFinite,
}

/// A periodic simulation cell.
///
/// The three lattice vectors are stored as the rows of a 3x3 matrix, so that a
/// point with fractional coordinates `f` sits at `M^T f` in cartesian space.
/// Periodicity can be switched off along individual lattice directions; along
/// such a direction the cell only carries geometry and no images are generated.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCell {
    vectors: Matrix3<f64>,
    inverse_transpose: Matrix3<f64>,
    periodic: [bool; 3],
}

impl UnitCell {
    /// Creates a fully periodic cell from three lattice vectors.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::Degenerate`] if the vectors are (nearly) coplanar and
    /// [`CellError::NonFinite`] if any component is NaN or infinite.
    pub fn new(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>) -> Result<Self, CellError> {
        let vectors = Matrix3::new(a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z);
        Self::from_matrix(vectors)
    }

    /// Creates a fully periodic rectangular box with the given edge lengths.
    pub fn orthorhombic(lx: f64, ly: f64, lz: f64) -> Result<Self, CellError> {
        Self::new(
            Vector3::new(lx, 0.0, 0.0),
            Vector3::new(0.0, ly, 0.0),
            Vector3::new(0.0, 0.0, lz),
        )
    }

    /// Creates a fully periodic cell from a matrix whose rows are the lattice vectors.
    pub fn from_matrix(vectors: Matrix3<f64>) -> Result<Self, CellError> {
        if vectors.iter().any(|v| !v.is_finite()) {
            return Err(CellError::NonFinite);
        }
        let volume = vectors.determinant().abs();
        if volume < MIN_CELL_VOLUME {
            return Err(CellError::Degenerate { volume });
        }
        let inverse_transpose = vectors
            .transpose()
            .try_inverse()
            .ok_or(CellError::Degenerate { volume })?;
        Ok(Self {
            vectors,
            inverse_transpose,
            periodic: [true; 3],
        })
    }

    pub fn with_periodicity(mut self, periodic: [bool; 3]) -> Self {
        self.periodic = periodic;
        self
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.vectors
    }

    pub fn periodicity(&self) -> [bool; 3] {
        self.periodic
    }

    pub fn is_periodic(&self, axis: usize) -> bool {
        self.periodic.get(axis).copied().unwrap_or(false)
    }

    pub fn lattice_vector(&self, axis: usize) -> Vector3<f64> {
        self.vectors.row(axis).transpose()
    }

    pub fn volume(&self) -> f64 {
        self.vectors.determinant().abs()
    }

    pub fn to_fractional(&self, point: &Point3<f64>) -> Vector3<f64> {
        self.inverse_transpose * point.coords
    }

    pub fn to_cartesian(&self, fractional: &Vector3<f64>) -> Point3<f64> {
        Point3::from(self.vectors.transpose() * fractional)
    }

    /// Cartesian translation corresponding to an integer image shift.
    pub fn shift_vector(&self, shift: &Vector3<i32>) -> Vector3<f64> {
        self.vectors.transpose() * shift.map(f64::from)
    }

    /// Distances between opposite faces of the cell, one per lattice direction.
    ///
    /// The number of periodic images needed to cover a cutoff `rc` along
    /// direction `k` is `ceil(rc / width_k)`.
    pub fn perpendicular_widths(&self) -> Vector3<f64> {
        let a = self.lattice_vector(0);
        let b = self.lattice_vector(1);
        let c = self.lattice_vector(2);
        let volume = self.volume();
        Vector3::new(
            volume / b.cross(&c).norm(),
            volume / c.cross(&a).norm(),
            volume / a.cross(&b).norm(),
        )
    }
}
