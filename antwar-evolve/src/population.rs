//! Population management
//!
//! Two populations evolve side by side: one of phase-1 genomes (own-half
//! layout) and one of phase-2 genomes (food on the opponent's half). The
//! genomes at the same index form one individual; they are evaluated
//! together, credited together and replaced at the same generation boundary.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::crossover::single_point;
use crate::genome::{random_genome, Genome};
use crate::mutation::mutate;
use crate::selection::roulette_pool;
use crate::{EvolutionConfig, EvolveError};

/// Fixed-size set of genomes with a parallel fitness accumulator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Population {
    pub genomes: Vec<Genome>,
    pub fitness: Vec<f64>,
}

impl Population {
    /// Fresh random population with zero fitness
    pub fn random<R: Rng>(config: &EvolutionConfig, rng: &mut R) -> Self {
        let genomes = (0..config.population_size)
            .map(|_| random_genome(config.genome_length, config.gene_max, rng))
            .collect();
        Self::from_genomes(genomes)
    }

    pub fn from_genomes(genomes: Vec<Genome>) -> Self {
        let fitness = vec![0.0; genomes.len()];
        Self { genomes, fitness }
    }

    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    pub fn credit(&mut self, idx: usize, amount: f64) {
        self.fitness[idx] += amount;
    }

    /// Select, mate and mutate into a new population of the same size.
    /// The result starts with zero fitness.
    pub fn next_generation<R: Rng>(&self, config: &EvolutionConfig, rng: &mut R) -> Self {
        let pool = roulette_pool(&self.genomes, &self.fitness, self.len(), rng);

        let mut children = Vec::with_capacity(pool.len());
        for pair in pool.chunks_exact(2) {
            let (mut first, mut second) = single_point(&pair[0], &pair[1], rng);
            mutate(&mut first, config.mutation_rate, config.gene_max, rng);
            mutate(&mut second, config.mutation_rate, config.gene_max, rng);
            children.push(first);
            children.push(second);
        }
        Self::from_genomes(children)
    }

    pub fn best_fitness(&self) -> f64 {
        self.fitness.iter().copied().fold(0.0, f64::max)
    }

    pub fn mean_fitness(&self) -> f64 {
        if self.fitness.is_empty() {
            return 0.0;
        }
        self.fitness.iter().sum::<f64>() / self.fitness.len() as f64
    }
}

/// Fitness figures of a completed generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub generation: u32,
    pub best_fitness: f64,
    pub mean_fitness: f64,
}

/// Lockstep manager of the phase-1 and phase-2 populations
#[derive(Clone, Debug)]
pub struct PopulationManager {
    config: EvolutionConfig,
    phase1: Population,
    phase2: Population,
    generation: u32,
    current: usize,
    games_played: u32,
}

impl PopulationManager {
    /// Seed both populations randomly
    pub fn new<R: Rng>(config: EvolutionConfig, rng: &mut R) -> Result<Self, EvolveError> {
        config.validate()?;
        let phase1 = Population::random(&config, rng);
        let phase2 = Population::random(&config, rng);
        Ok(Self {
            config,
            phase1,
            phase2,
            generation: 0,
            current: 0,
            games_played: 0,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn phase1(&self) -> &Population {
        &self.phase1
    }

    pub fn phase2(&self) -> &Population {
        &self.phase2
    }

    /// Phase-1 genome under evaluation
    pub fn active_phase1(&self) -> &Genome {
        &self.phase1.genomes[self.current]
    }

    /// Phase-2 genome under evaluation
    pub fn active_phase2(&self) -> &Genome {
        &self.phase2.genomes[self.current]
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Index of the individual under evaluation
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Games played by the current individual so far
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Account one finished game for the active individual.
    ///
    /// A win adds `1 / games_per_genome` fitness. After `games_per_genome`
    /// games the next individual becomes active; after the last individual
    /// both populations are regenerated and the summary of the finished
    /// generation is returned.
    pub fn record_outcome<R: Rng>(&mut self, won: bool, rng: &mut R) -> Option<GenerationSummary> {
        self.games_played += 1;
        if won {
            let amount = 1.0 / self.config.games_per_genome as f64;
            self.phase1.credit(self.current, amount);
            self.phase2.credit(self.current, amount);
        }

        if self.games_played < self.config.games_per_genome {
            return None;
        }
        self.games_played = 0;

        tracing::debug!(
            generation = self.generation,
            individual = self.current,
            fitness = self.phase1.fitness[self.current],
            "individual evaluated"
        );

        self.current += 1;
        if self.current < self.phase1.len() {
            return None;
        }
        Some(self.advance_generation(rng))
    }

    fn advance_generation<R: Rng>(&mut self, rng: &mut R) -> GenerationSummary {
        let summary = GenerationSummary {
            generation: self.generation,
            best_fitness: self.phase1.best_fitness(),
            mean_fitness: self.phase1.mean_fitness(),
        };
        tracing::info!(
            generation = summary.generation,
            best = summary.best_fitness,
            mean = summary.mean_fitness,
            "generation complete"
        );

        self.phase1 = self.phase1.next_generation(&self.config, rng);
        self.phase2 = self.phase2.next_generation(&self.config, rng);
        self.current = 0;
        self.generation += 1;
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn manager(seed: u64) -> (PopulationManager, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let manager = PopulationManager::new(EvolutionConfig::default(), &mut rng).unwrap();
        (manager, rng)
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = EvolutionConfig::default().with_population_size(3);
        assert!(PopulationManager::new(config, &mut rng).is_err());
    }

    #[test]
    fn test_win_credits_active_individual() {
        let (mut manager, mut rng) = manager(42);
        assert_eq!(manager.record_outcome(true, &mut rng), None);
        assert_eq!(manager.record_outcome(false, &mut rng), None);
        assert_eq!(manager.phase1().fitness[0], 0.25);
        assert_eq!(manager.phase2().fitness[0], 0.25);
        assert_eq!(manager.games_played(), 2);
        assert_eq!(manager.current_index(), 0);
    }

    #[test]
    fn test_advances_after_games_per_genome() {
        let (mut manager, mut rng) = manager(42);
        let second = manager.phase1().genomes[1].clone();
        for _ in 0..4 {
            manager.record_outcome(true, &mut rng);
        }
        assert_eq!(manager.current_index(), 1);
        assert_eq!(manager.games_played(), 0);
        assert_eq!(manager.phase1().fitness[0], 1.0);
        assert_eq!(manager.active_phase1(), &second);
    }

    #[test]
    fn test_generation_boundary_resets() {
        let (mut manager, mut rng) = manager(42);
        let mut summary = None;
        for game in 0..16 {
            summary = manager.record_outcome(game % 2 == 0, &mut rng);
        }
        let summary = summary.expect("generation should end after 16 games");
        assert_eq!(summary.generation, 0);
        assert_eq!(summary.best_fitness, 0.5);
        assert_eq!(summary.mean_fitness, 0.5);

        assert_eq!(manager.generation(), 1);
        assert_eq!(manager.current_index(), 0);
        for population in [manager.phase1(), manager.phase2()] {
            assert_eq!(population.len(), 4);
            assert!(population.genomes.iter().all(|g| g.len() == 40));
            assert_eq!(population.fitness, vec![0.0; 4]);
        }
    }

    #[test]
    fn test_all_losses_still_regenerate() {
        let (mut manager, mut rng) = manager(7);
        let mut summary = None;
        for _ in 0..16 {
            summary = manager.record_outcome(false, &mut rng);
        }
        assert_eq!(summary.map(|s| s.best_fitness), Some(0.0));
        assert_eq!(manager.phase1().len(), 4);
        assert_eq!(manager.phase2().len(), 4);
    }

    #[test]
    fn test_winner_dominates_next_generation() {
        let config = EvolutionConfig::default().with_mutation_rate(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut population = Population::from_genomes((0..4).map(|i| vec![i; 40]).collect());
        population.credit(2, 1.0);
        let next = population.next_generation(&config, &mut rng);
        assert!(next.genomes.iter().flatten().all(|&g| g == 2));
    }
}
