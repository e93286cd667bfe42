//! Point mutation for genomes

use rand::Rng;

use crate::genome::{Gene, Genome};

/// With probability `rate`, replace one random gene with a fresh draw
/// from `0..=gene_max`. Returns whether a gene was replaced.
pub fn mutate<R: Rng>(genome: &mut Genome, rate: f64, gene_max: Gene, rng: &mut R) -> bool {
    if genome.is_empty() || rng.gen::<f64>() >= rate {
        return false;
    }
    let idx = rng.gen_range(0..genome.len());
    genome[idx] = rng.gen_range(0..=gene_max);
    true
}
