//! Crossover operators for genome evolution

use rand::Rng;

use crate::genome::{Gene, Genome};

/// Swap the tails of two parents at `pivot`.
///
/// The first child takes `a[..pivot]` then `b[pivot..]`, the second the
/// mirror image. `pivot` may equal the genome length, which copies both
/// parents unchanged.
pub fn crossover_at(a: &[Gene], b: &[Gene], pivot: usize) -> (Genome, Genome) {
    debug_assert_eq!(a.len(), b.len(), "parents differ in length");
    let pivot = pivot.min(a.len()).min(b.len());

    let mut first = a[..pivot].to_vec();
    first.extend_from_slice(&b[pivot..]);
    let mut second = b[..pivot].to_vec();
    second.extend_from_slice(&a[pivot..]);
    (first, second)
}

/// Single-point crossover with a uniform pivot in `[0, len]`
pub fn single_point<R: Rng>(a: &[Gene], b: &[Gene], rng: &mut R) -> (Genome, Genome) {
    let pivot = rng.gen_range(0..=a.len());
    crossover_at(a, b, pivot)
}
