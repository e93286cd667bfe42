//! State transition: the state that results from taking an action
//!
//! The input state is never touched; every call works on a clone.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Coord;
use crate::game::{Ant, GameState, Move};
use crate::rules::attack_targets;
use crate::units::{BuildType, ConstrType};

/// Apply `mv` to a copy of `state`, attacking a uniformly random target
pub fn apply_move<R: Rng>(state: &GameState, mv: &Move, rng: &mut R) -> GameState {
    apply_move_with(state, mv, |_, _, targets| {
        *targets.choose(&mut *rng).unwrap_or(&targets[0])
    })
}

/// Apply `mv` to a copy of `state`. After a unit moves, `choose_target` is
/// called with the new state, the attacker and the non-empty list of enemy
/// coordinates in range; it must return one of them.
///
/// The action is assumed legal. Debug builds assert the moving unit exists.
pub fn apply_move_with<F>(state: &GameState, mv: &Move, mut choose_target: F) -> GameState
where
    F: FnMut(&GameState, &Ant, &[Coord]) -> Coord,
{
    let mut next = state.clone();
    let player = next.whose_turn;

    match mv {
        Move::Build { coord, build } => {
            let inv = next.inventory_mut(player);
            debug_assert!(inv.food >= build.cost(), "build not affordable: {:?}", build);
            inv.food = inv.food.saturating_sub(build.cost());
            match *build {
                BuildType::Ant(ant_type) => next.spawn_ant(ant_type, *coord, player),
                BuildType::Constr(constr_type) => {
                    next.place_construction(constr_type, *coord, Some(player))
                }
            }
        }
        Move::MoveAnt { path } => {
            let (Some(&from), Some(&to)) = (path.first(), path.last()) else {
                debug_assert!(false, "empty movement path");
                return next;
            };
            move_ant(&mut next, from, to, &mut choose_target);
        }
        Move::End => {
            for ant in next.inventory_mut(player).ants.iter_mut() {
                ant.has_moved = false;
            }
            next.whose_turn = player.opponent();
        }
    }

    next
}

fn move_ant<F>(state: &mut GameState, from: Coord, to: Coord, choose_target: &mut F)
where
    F: FnMut(&GameState, &Ant, &[Coord]) -> Coord,
{
    let constr = state
        .construction_at(to)
        .map(|c| (c.constr_type, c.owner));

    let Some(ant) = state.ant_at_mut(from) else {
        debug_assert!(false, "no unit at move origin {:?}", from);
        return;
    };
    ant.coords = to;
    ant.has_moved = true;

    let mut delivered = false;
    if ant.ant_type.is_carrier() {
        match constr {
            Some((ConstrType::Food, _)) if !ant.carrying => ant.carrying = true,
            Some((kind, owner)) if kind.is_drop_off() && ant.carrying && owner == Some(ant.owner) => {
                ant.carrying = false;
                delivered = true;
            }
            _ => {}
        }
    }
    let attacker = ant.clone();

    if delivered {
        state.inventory_mut(attacker.owner).food += 1;
    }

    let targets = attack_targets(state, attacker.ant_type, attacker.owner, to);
    if targets.is_empty() {
        return;
    }
    let target = choose_target(state, &attacker, &targets);
    debug_assert!(targets.contains(&target), "attack target not in range");

    let damage = attacker.ant_type.stats().attack;
    let enemy = state.inventory_mut(attacker.owner.opponent());
    if let Some(idx) = enemy.ants.iter().position(|a| a.coords == target) {
        if enemy.ants[idx].health <= damage {
            enemy.ants[idx].health = 0;
            enemy.ants.remove(idx);
        } else {
            enemy.ants[idx].health -= damage;
        }
    }
}
