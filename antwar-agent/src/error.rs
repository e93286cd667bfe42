//! Agent-level errors

use antwar_core::GameError;
use antwar_evolve::EvolveError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AgentError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("invalid evolution settings: {0}")]
    Evolve(#[from] EvolveError),
}
