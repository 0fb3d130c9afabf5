//! Random point generation helpers for tests and benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::geometry::point::Point2;

/// Error generating random points.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PointGenerationError {
    /// The coordinate range is empty, unordered, or non-finite.
    #[error("invalid coordinate range: min {min} must be finite and below max {max}")]
    InvalidRange {
        /// Lower bound that was passed in.
        min: f64,
        /// Upper bound that was passed in.
        max: f64,
    },
}

/// Generates `n_points` points with both coordinates drawn uniformly from
/// `range`, using the provided generator.
///
/// # Errors
///
/// [`PointGenerationError::InvalidRange`] when `range` is not finite and
/// strictly increasing.
pub fn generate_random_points<R: Rng + ?Sized>(
    n_points: usize,
    range: (f64, f64),
    rng: &mut R,
) -> Result<Vec<Point2>, PointGenerationError> {
    let (min, max) = range;
    if !(min.is_finite() && max.is_finite() && min < max) {
        return Err(PointGenerationError::InvalidRange { min, max });
    }
    Ok((0..n_points)
        .map(|_| Point2::new(rng.random_range(min..max), rng.random_range(min..max)))
        .collect())
}

/// Deterministic variant of [`generate_random_points`], seeded from `seed`.
///
/// # Errors
///
/// [`PointGenerationError::InvalidRange`] when `range` is not finite and
/// strictly increasing.
pub fn generate_random_points_seeded(
    n_points: usize,
    range: (f64, f64),
    seed: u64,
) -> Result<Vec<Point2>, PointGenerationError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_random_points(n_points, range, &mut rng)
}
