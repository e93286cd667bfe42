//! Position evaluation

use crate::board::Coord;
use crate::game::{GameState, PlayerId, FOOD_GOAL};
use crate::units::AntType;
use serde::{Deserialize, Serialize};

/// Score of a decided game won by the agent
pub const WIN_VALUE: f64 = 1.0;

/// Score of a decided game lost by the agent
pub const LOSS_VALUE: f64 = 0.0;

/// Neutral starting point of the heuristic
const NEUTRAL_VALUE: f64 = 0.5;

/// Highest score a non-terminal state may take
const MAX_HEURISTIC: f64 = 0.999;

/// Floor for remapped negative scores
const MIN_HEURISTIC: f64 = 1e-9;

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Bonus per missing health point of the enemy queen
    pub queen_damage_weight: f64,
    /// Weight of own queen's normalized distance to the nearest enemy
    pub queen_safety_weight: f64,
    /// Distance used to normalize queen safety
    pub max_distance: f64,
    /// Flat bonus per non-queen unit owned
    pub unit_bonus: f64,
    /// Penalty per step between each non-queen unit and the enemy queen
    pub aggression_penalty: f64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            queen_damage_weight: 0.025,
            queen_safety_weight: 0.3,
            max_distance: 18.0,
            unit_bonus: 0.01,
            aggression_penalty: 0.005,
        }
    }
}

/// Evaluate `state` for `agent`: 1.0 is a won game, 0.0 a lost one, anything
/// in between is strictly inside (0, 1).
///
/// The heuristic is computed for whoever is to move and reported as is when
/// that is the agent, or as `1 - score` otherwise.
pub fn evaluate(state: &GameState, agent: PlayerId, heuristics: &Heuristics) -> f64 {
    let score = evaluate_for_turn_owner(state, heuristics);
    if state.whose_turn == agent {
        score
    } else {
        1.0 - score
    }
}

/// Heuristic value for the player to move
fn evaluate_for_turn_owner(state: &GameState, heuristics: &Heuristics) -> f64 {
    let me = state.whose_turn;
    let mine = state.inventory(me);
    let theirs = state.inventory(me.opponent());

    let Some(my_queen) = mine.queen() else {
        return LOSS_VALUE;
    };
    if theirs.food >= FOOD_GOAL {
        return LOSS_VALUE;
    }
    let Some(enemy_queen) = theirs.queen() else {
        return WIN_VALUE;
    };
    if mine.food >= FOOD_GOAL {
        return WIN_VALUE;
    }

    let mut score = NEUTRAL_VALUE;

    let max_health = AntType::Queen.stats().health;
    score += heuristics.queen_damage_weight
        * max_health.saturating_sub(enemy_queen.health) as f64;

    let threat = nearest_enemy_distance(state, me, my_queen.coords)
        .map_or(heuristics.max_distance, |d| d as f64);
    score += threat / heuristics.max_distance * heuristics.queen_safety_weight;

    for ant in mine.ants.iter().filter(|a| !a.ant_type.is_queen()) {
        score += heuristics.unit_bonus;
        score -= heuristics.aggression_penalty * ant.coords.manhattan_to(enemy_queen.coords) as f64;
    }

    clamp_heuristic(score)
}

/// Keep 0.0 and 1.0 reserved for decided games
fn clamp_heuristic(raw: f64) -> f64 {
    if raw < 0.0 {
        (0.001 + raw * 0.0001).max(MIN_HEURISTIC)
    } else if raw > 1.0 {
        MAX_HEURISTIC
    } else if raw == 0.0 {
        MIN_HEURISTIC
    } else if raw == 1.0 {
        MAX_HEURISTIC
    } else {
        raw
    }
}

/// Manhattan distance from `from` to the closest unit of `player`'s opponent
fn nearest_enemy_distance(state: &GameState, player: PlayerId, from: Coord) -> Option<i32> {
    state
        .inventory(player.opponent())
        .ants
        .iter()
        .map(|ant| ant.coords.manhattan_to(from))
        .min()
}
