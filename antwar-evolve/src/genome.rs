//! Placement genomes and their decoding into board coordinates

use antwar_core::board::{Coord, BOARD_WIDTH};
use rand::Rng;

/// One gene: a placement priority, lower is placed first
pub type Gene = u16;

/// Fixed-length priority vector over the cells of one home territory
pub type Genome = Vec<Gene>;

/// Draw a genome of `len` genes uniformly from `0..=gene_max`
pub fn random_genome<R: Rng>(len: usize, gene_max: Gene, rng: &mut R) -> Genome {
    (0..len).map(|_| rng.gen_range(0..=gene_max)).collect()
}

/// Cell assigned to genome index `idx`
fn cell_for_index(idx: usize, row_offset: i8) -> Coord {
    let width = BOARD_WIDTH as usize;
    Coord::new((idx % width) as i8, (idx / width) as i8 + row_offset)
}

/// Decode `genome` into placement order.
///
/// Index `i` stands for cell `(i % 10, i / 10 + row_offset)`. Cells are
/// returned by ascending gene value; equal genes keep index order.
pub fn decode(genome: &[Gene], row_offset: i8) -> Vec<Coord> {
    let mut ranked: Vec<(Gene, Coord)> = genome
        .iter()
        .enumerate()
        .map(|(idx, &gene)| (gene, cell_for_index(idx, row_offset)))
        .collect();
    ranked.sort_by_key(|&(gene, _)| gene);
    ranked.into_iter().map(|(_, coord)| coord).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_sorted_genome_is_row_major() {
        let genome: Genome = (0..40).collect();
        let coords = decode(&genome, 0);
        assert_eq!(coords[0], Coord::new(0, 0));
        assert_eq!(coords[1], Coord::new(1, 0));
        assert_eq!(coords[9], Coord::new(9, 0));
        assert_eq!(coords[10], Coord::new(0, 1));
        assert_eq!(coords[39], Coord::new(9, 3));
    }

    #[test]
    fn test_decode_is_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            let genome = random_genome(40, 1000, &mut rng);
            let coords = decode(&genome, 6);
            assert_eq!(coords.len(), genome.len());
            let unique: FxHashSet<Coord> = coords.iter().copied().collect();
            assert_eq!(unique.len(), genome.len());
            assert!(coords.iter().all(|c| c.is_valid() && (6..=9).contains(&c.y)));
        }
    }

    #[test]
    fn test_inverted_genes_reverse_order() {
        let genome: Genome = (0..40).map(|i| (i * 17) % 40 * 10).collect();
        let inverted: Genome = genome.iter().map(|&g| 1000 - g).collect();
        let mut backward = decode(&inverted, 0);
        backward.reverse();
        assert_eq!(decode(&genome, 0), backward);
    }

    #[test]
    fn test_ties_keep_index_order() {
        let genome: Genome = vec![5, 3, 5, 3, 0, 0, 0, 0, 0, 0];
        let coords = decode(&genome, 0);
        assert_eq!(&coords[..6], &[4, 5, 6, 7, 8, 9].map(|x| Coord::new(x, 0)));
        assert_eq!(&coords[6..], &[1, 3, 0, 2].map(|x| Coord::new(x, 0)));
    }

    #[test]
    fn test_genes_within_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let genome = random_genome(400, 1000, &mut rng);
        assert_eq!(genome.len(), 400);
        assert!(genome.iter().all(|&g| g <= 1000));
    }
}
