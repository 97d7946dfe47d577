//! Gene vector operations for the genetic algorithm.
//!
//! These are the building blocks [`PopulationEvolver`](crate::genetic::PopulationEvolver)
//! combines into one reproduction step:
//!
//! - **Initialization**: [`random`] draws every gene uniformly from `[-1, 1]`
//! - **Crossover**: [`uniform_crossover`] takes each gene from either parent with equal odds
//! - **Mutation**: [`mutate`] adds Gaussian noise to some genes and clamps the result
//!
//! Genes always lie in [`GENE_RANGE`]: initialization samples inside it, crossover only
//! copies existing genes, and mutation clamps.

use std::ops::RangeInclusive;

use rand::{Rng, distr::Distribution as _};
use rand_distr::Normal;

pub const MIN_GENE: f32 = -1.0;
pub const MAX_GENE: f32 = 1.0;
pub const GENE_RANGE: RangeInclusive<f32> = MIN_GENE..=MAX_GENE;

/// Creates a gene vector by applying a function to each index.
///
/// ```
/// use amaze_training::genes;
///
/// let genes = genes::from_fn(|i| if i % 2 == 0 { 0.5 } else { -0.5 }, 4);
/// assert_eq!(genes, vec![0.5, -0.5, 0.5, -0.5]);
/// ```
pub fn from_fn<F>(mut f: F, len: usize) -> Vec<f32>
where
    F: FnMut(usize) -> f32,
{
    let mut values = Vec::with_capacity(len);
    for i in 0..len {
        values.push(f(i));
    }
    values
}

/// Generates `len` genes uniformly distributed over [`GENE_RANGE`].
pub fn random<R>(rng: &mut R, len: usize) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    from_fn(|_| rng.random_range(GENE_RANGE), len)
}

/// Uniform crossover: every gene is independently copied from `p1` or `p2` with
/// probability 1/2 each.
///
/// # Panics
///
/// Panics if the parents have different lengths.
pub fn uniform_crossover<R>(p1: &[f32], p2: &[f32], rng: &mut R) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    assert_eq!(p1.len(), p2.len());
    from_fn(
        |i| if rng.random_bool(0.5) { p1[i] } else { p2[i] },
        p1.len(),
    )
}

/// Applies Gaussian mutation in place.
///
/// Each gene is perturbed with probability `rate` by a sample of `noise` and then clamped
/// to [`GENE_RANGE`].
///
/// # Panics
///
/// Panics if `rate` is outside `[0, 1]`.
pub fn mutate<R>(genes: &mut [f32], noise: &Normal<f32>, rate: f32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for gene in genes {
        if rng.random_bool(rate.into()) {
            *gene = (*gene + noise.sample(rng)).clamp(MIN_GENE, MAX_GENE);
        }
    }
}
