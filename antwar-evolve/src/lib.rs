//! ANTWAR Evolution - Genetic algorithm for setup placement
//!
//! This crate evolves the placement genomes used by the learning agent:
//! - Genome generation and decoding into placement order
//! - Selection (roulette wheel)
//! - Crossover (single point)
//! - Mutation (point replacement)
//! - Two-population manager with shared fitness cadence

pub mod genome;
pub mod selection;
pub mod crossover;
pub mod mutation;
pub mod population;

use antwar_core::board::{BOARD_WIDTH, TERRITORY_ROWS};
use serde::{Deserialize, Serialize};

pub use genome::{decode, random_genome, Gene, Genome};
pub use population::{GenerationSummary, Population, PopulationManager};

/// Placements needed in setup phase 1
pub const MIN_GENOME_LENGTH: usize = antwar_core::rules::PHASE1_PLACEMENTS;

/// Cells in one home territory; longer genomes would decode off the half
pub const MAX_GENOME_LENGTH: usize = (BOARD_WIDTH as usize) * (TERRITORY_ROWS as usize);

/// Errors raised for an unusable evolution configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvolveError {
    #[error("population size must be even and non-zero, got {0}")]
    PopulationSize(usize),

    #[error("games per genome must be non-zero")]
    NoGames,

    #[error("genome length {len} outside {min}..={max}")]
    GenomeLength { len: usize, min: usize, max: usize },

    #[error("mutation rate {0} outside [0, 1]")]
    MutationRate(f64),
}

/// Evolution configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub games_per_genome: u32,
    pub genome_length: usize,
    /// Largest gene value; genes are drawn from `0..=gene_max`
    pub gene_max: Gene,
    pub mutation_rate: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 4,
            games_per_genome: 4,
            genome_length: 40,
            gene_max: 1000,
            mutation_rate: 0.1,
        }
    }
}

impl EvolutionConfig {
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    pub fn with_games_per_genome(mut self, games_per_genome: u32) -> Self {
        self.games_per_genome = games_per_genome;
        self
    }

    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }

    /// Check every bound the population manager relies on
    pub fn validate(&self) -> Result<(), EvolveError> {
        if self.population_size == 0 || self.population_size % 2 != 0 {
            return Err(EvolveError::PopulationSize(self.population_size));
        }
        if self.games_per_genome == 0 {
            return Err(EvolveError::NoGames);
        }
        if !(MIN_GENOME_LENGTH..=MAX_GENOME_LENGTH).contains(&self.genome_length) {
            return Err(EvolveError::GenomeLength {
                len: self.genome_length,
                min: MIN_GENOME_LENGTH,
                max: MAX_GENOME_LENGTH,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EvolveError::MutationRate(self.mutation_rate));
        }
        Ok(())
    }
}
