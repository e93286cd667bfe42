//! Learning agent: alpha-beta play with evolved setup placement

use antwar_core::rules::{PHASE1_PLACEMENTS, PHASE2_PLACEMENTS};
use antwar_core::{AlphaBetaAI, Ant, Coord, GameError, GameState, Move, Phase, PlayerId};
use antwar_evolve::{decode, PopulationManager};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::player::Player;

/// Agent whose mid-game policy is a fixed search and whose setup placement
/// evolves across games
pub struct GeneticAgent {
    name: String,
    ai: AlphaBetaAI,
    population: PopulationManager,
    rng: ChaCha8Rng,
    player_id: Option<PlayerId>,
}

impl GeneticAgent {
    pub fn new(config: AgentConfig) -> Result<Self, AgentError> {
        config.search.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let population = PopulationManager::new(config.evolution, &mut rng)?;
        let ai = AlphaBetaAI::with_seed(config.search, config.heuristics, config.seed.wrapping_add(1));
        Ok(Self {
            name: config.name,
            ai,
            population,
            rng,
            player_id: None,
        })
    }

    pub fn population(&self) -> &PopulationManager {
        &self.population
    }

    /// Identity seen on the last move request
    pub fn player_id(&self) -> Option<PlayerId> {
        self.player_id
    }

    /// Own-half layout: anthill then grass, highest priority first
    fn home_layout(&self, me: PlayerId) -> Vec<Coord> {
        let mut coords = decode(self.population.active_phase1(), me.home_row_offset());
        coords.truncate(PHASE1_PLACEMENTS);
        coords
    }

    /// First construction-free cells of the decoded phase-2 genome
    fn food_layout(&self, state: &GameState, me: PlayerId) -> Result<Vec<Coord>, AgentError> {
        let food: Vec<Coord> = decode(self.population.active_phase2(), me.opponent().home_row_offset())
            .into_iter()
            .filter(|&coord| state.construction_at(coord).is_none())
            .take(PHASE2_PLACEMENTS)
            .collect();
        if food.len() < PHASE2_PLACEMENTS {
            return Err(GameError::NoValidPlacement { phase: state.phase }.into());
        }
        Ok(food)
    }
}

impl Player for GeneticAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_placement(&mut self, state: &GameState) -> Result<Vec<Coord>, AgentError> {
        let me = state.whose_turn;
        match state.phase {
            Phase::SetupPhase1 => Ok(self.home_layout(me)),
            Phase::SetupPhase2 => self.food_layout(state, me),
            phase => Err(GameError::NotSetupPhase { phase }.into()),
        }
    }

    fn choose_move(&mut self, state: &GameState) -> Move {
        let me = state.whose_turn;
        self.player_id = Some(me);

        let outcome = self.ai.search(state, me);
        tracing::debug!(
            agent = %self.name,
            player = ?me,
            action = ?outcome.action,
            value = outcome.value,
            nodes = outcome.stats.nodes,
            "move chosen"
        );
        outcome.action.unwrap_or(Move::End)
    }

    fn choose_attack_target(
        &mut self,
        _state: &GameState,
        _attacker: &Ant,
        targets: &[Coord],
    ) -> Result<Coord, AgentError> {
        targets
            .choose(&mut self.rng)
            .copied()
            .ok_or(AgentError::Game(GameError::NoValidTarget { candidates: 0 }))
    }

    fn report_outcome(&mut self, won: bool) {
        let generation = self.population.generation();
        let individual = self.population.current_index();
        if let Some(summary) = self.population.record_outcome(won, &mut self.rng) {
            tracing::debug!(agent = %self.name, ?summary, "population regenerated");
        }
        tracing::debug!(agent = %self.name, generation, individual, won, "outcome recorded");
    }
}
