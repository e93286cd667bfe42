//! Selection operators for genetic algorithms
//!
//! Implements fitness-proportional (roulette wheel) selection: each genome
//! is drawn with probability equal to its share of the total fitness.

use rand::Rng;

use crate::genome::Genome;

/// Selection probability of each genome. A population without any fitness
/// gets uniform weights.
pub fn selection_weights(fitness: &[f64]) -> Vec<f64> {
    let total: f64 = fitness.iter().sum();
    if total <= 0.0 {
        let uniform = 1.0 / fitness.len().max(1) as f64;
        return vec![uniform; fitness.len()];
    }
    fitness.iter().map(|f| f / total).collect()
}

/// Roulette wheel draw over precomputed `weights`.
///
/// Returns the first index whose cumulative weight exceeds a uniform draw
/// in `[0, 1)`, or the last index when rounding leaves the draw uncovered.
///
/// # Panics
/// Panics if `weights` is empty
pub fn roulette_index<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    assert!(!weights.is_empty(), "Population cannot be empty");

    let draw: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (idx, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if draw < cumulative {
            return idx;
        }
    }
    weights.len() - 1
}

/// Draw `count` genomes with replacement, proportional to fitness.
///
/// # Arguments
/// * `genomes` - Population to select from
/// * `fitness` - Accumulated fitness, parallel to `genomes`
/// * `count` - Size of the intermediate pool
/// * `rng` - Random number generator
pub fn roulette_pool<R: Rng>(
    genomes: &[Genome],
    fitness: &[f64],
    count: usize,
    rng: &mut R,
) -> Vec<Genome> {
    assert_eq!(genomes.len(), fitness.len(), "Population and fitness must have same length");

    let weights = selection_weights(fitness);
    (0..count)
        .map(|_| genomes[roulette_index(&weights, rng)].clone())
        .collect()
}
