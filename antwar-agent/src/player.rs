//! The interface every agent exposes to the game

use antwar_core::{Ant, Coord, GameState, Move};

use crate::error::AgentError;

/// A participant the game runner can drive
pub trait Player {
    fn name(&self) -> &str;

    /// Setup coordinates for the current phase: 10 for phase 1 (anthill
    /// first, then grass), 2 food cells for phase 2.
    fn choose_placement(&mut self, state: &GameState) -> Result<Vec<Coord>, AgentError>;

    /// Next action for the player to move; must be legal
    fn choose_move(&mut self, state: &GameState) -> Move;

    /// Pick one of `targets` for `attacker`. Agents never withhold an attack.
    fn choose_attack_target(
        &mut self,
        state: &GameState,
        attacker: &Ant,
        targets: &[Coord],
    ) -> Result<Coord, AgentError>;

    /// Called once when a game ends; draws count as not won
    fn report_outcome(&mut self, won: bool);
}
