//! Error types shared by the engine surface and the agents

use crate::board::Coord;
use crate::game::{Move, Phase, PlayerId};

/// Errors raised by placement, attack selection, move validation and
/// search configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("no valid attack target among {candidates} candidates")]
    NoValidTarget { candidates: usize },

    #[error("no valid placement found during {phase:?}")]
    NoValidPlacement { phase: Phase },

    #[error("invalid placement at ({}, {}) for {player:?}: {reason}", coord.x, coord.y)]
    InvalidPlacement {
        coord: Coord,
        player: PlayerId,
        reason: &'static str,
    },

    #[error("expected {expected} placements, got {actual}")]
    PlacementCount { expected: usize, actual: usize },

    #[error("placement requested outside a setup phase ({phase:?})")]
    NotSetupPhase { phase: Phase },

    #[error("search depth must be at least 1, got {depth}")]
    SearchDepth { depth: u32 },

    #[error("illegal move for {player:?}: {mv:?}")]
    IllegalMove { player: PlayerId, mv: Move },
}

pub type Result<T> = std::result::Result<T, GameError>;
