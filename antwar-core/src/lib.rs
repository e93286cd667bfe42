//! ANTWAR Core - Game model and search AI
//!
//! This crate provides the core game logic for ANTWAR:
//! - Board geometry (10x10 grid, home territories)
//! - Unit and construction tables
//! - Game state, legal moves, setup placement and state transitions
//! - Position evaluation in [0, 1]
//! - Generic alpha-beta search with half-list pruning

pub mod board;
pub mod units;
pub mod game;
pub mod error;
pub mod rules;
pub mod transition;
pub mod eval;
pub mod ai;

// Re-exports for convenient access
pub use board::{Coord, BOARD_HEIGHT, BOARD_WIDTH, DIRECTIONS, TERRITORY_ROWS};
pub use units::{AntType, BuildType, ConstrType, UnitStats, UNIT_STATS};
pub use game::{Ant, Construction, GameResult, GameState, Inventory, Move, Phase, PlayerId, FOOD_GOAL};
pub use error::GameError;
pub use rules::{apply_placement, attack_targets, legal_moves, start_play, PHASE1_PLACEMENTS, PHASE2_PLACEMENTS};
pub use transition::{apply_move, apply_move_with};
pub use eval::{evaluate, Heuristics, LOSS_VALUE, WIN_VALUE};
pub use ai::{search, AlphaBetaAI, SearchConfig, SearchDomain, SearchOutcome, SearchStats};
