//! ANTWAR Agents - Players and single-game driver
//!
//! This crate provides the players the engine talks to:
//! - The `Player` interface (placement, move, attack, outcome)
//! - The learning agent (alpha-beta play, evolved placement)
//! - A reactive rule-based baseline
//! - A runner that plays one game between two players
//!
//! ## Architecture
//!
//! - Level 1: GameRunner::play_game (orchestration)
//! - Level 2: Player implementations (decisions)
//! - Level 3: antwar-core search, antwar-evolve populations

mod config;
mod error;
mod game_runner;
mod genetic;
mod player;
mod reactive;

pub use config::{AgentConfig, RunnerConfig};
pub use error::AgentError;
pub use game_runner::{GameOutcome, GameRunner};
pub use genetic::GeneticAgent;
pub use player::Player;
pub use reactive::ReactiveAgent;
