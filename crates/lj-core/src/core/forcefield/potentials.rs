/// 12-6 Lennard-Jones energy `4ε[(σ/r)^12 - (σ/r)^6]` as a function of the squared distance.
///
/// Only powers of `σ²/r²` are formed, so no square root is ever taken. The
/// expression is evaluated as `4ε·s6·(s6 - 1)`, which is algebraically identical
/// but sends overlapping atoms (`r2 == 0`) to `+inf` instead of `inf - inf = NaN`.
/// A pair with `ε == 0` does not interact and is exactly zero at every distance.
#[inline]
pub fn lennard_jones_12_6_sq(r2: f64, sigma: f64, epsilon: f64) -> f64 {
    if epsilon == 0.0 {
        return 0.0;
    }
    let s2 = sigma * sigma / r2;
    let s6 = s2 * s2 * s2;
    4.0 * epsilon * s6 * (s6 - 1.0)
}

/// Unshifted energy at the cutoff radius, subtracted from every pair energy so
/// that the truncated potential reaches exactly zero at `cutoff`.
#[inline]
pub fn energy_at_cutoff(cutoff: f64, sigma: f64, epsilon: f64) -> f64 {
    lennard_jones_12_6_sq(cutoff * cutoff, sigma, epsilon)
}

/// Shifted, truncated Lennard-Jones energy for a pair at squared distance `r2`.
#[inline]
pub fn shifted_lennard_jones_12_6_sq(
    r2: f64,
    sigma: f64,
    epsilon: f64,
    energy_at_cutoff: f64,
) -> f64 {
    lennard_jones_12_6_sq(r2, sigma, epsilon) - energy_at_cutoff
}
