//! Engine-side rules: legal move listing, path finding, setup placement
//!
//! This is the query surface the agents consume. It is a compact
//! implementation of the game engine.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::Coord;
use crate::error::{GameError, Result};
use crate::game::{GameState, Move, Phase, PlayerId, STARTING_FOOD};
use crate::units::{AntType, BuildType, ConstrType, BUILDABLE_ANTS, GRASS_MOVE_COST, TUNNEL_COST};

/// Coordinates returned in setup phase 1 (anthill + grass)
pub const PHASE1_PLACEMENTS: usize = 10;

/// Food deposits returned in setup phase 2
pub const PHASE2_PLACEMENTS: usize = 2;

// ============================================================================
// MOVE GENERATION
// ============================================================================

/// All legal actions for the player to move. `End` is always last during play.
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    if state.phase != Phase::Play {
        return Vec::new();
    }

    let player = state.whose_turn;
    let inv = state.inventory(player);
    let mut moves = Vec::new();

    for ant in inv.ants.iter().filter(|ant| !ant.has_moved) {
        let movement = ant.ant_type.stats().movement;
        for path in movement_paths_for(state, ant.coords, movement, ant.ant_type.stats().ignores_grass) {
            moves.push(Move::MoveAnt { path });
        }
    }

    if let Some(hill) = inv.anthill() {
        if state.ant_at(hill.coords).is_none() {
            for ant_type in BUILDABLE_ANTS {
                let build = BuildType::Ant(ant_type);
                if build.cost() <= inv.food {
                    moves.push(Move::Build {
                        coord: hill.coords,
                        build,
                    });
                }
            }
        }
    }

    if inv.food >= TUNNEL_COST {
        for worker in inv
            .ants
            .iter()
            .filter(|ant| ant.ant_type == AntType::Worker && !ant.has_moved)
        {
            if state.construction_at(worker.coords).is_none() {
                moves.push(Move::Build {
                    coord: worker.coords,
                    build: BuildType::Constr(ConstrType::Tunnel),
                });
            }
        }
    }

    moves.push(Move::End);
    moves
}

/// Shortest movement path to every destination reachable from `from` within
/// `movement` points. Cells holding units block; grass costs extra.
pub fn movement_paths(state: &GameState, from: Coord, movement: u8) -> Vec<Vec<Coord>> {
    let ignores_grass = state
        .ant_at(from)
        .map_or(false, |ant| ant.ant_type.stats().ignores_grass);
    movement_paths_for(state, from, movement, ignores_grass)
}

fn movement_paths_for(
    state: &GameState,
    from: Coord,
    movement: u8,
    ignores_grass: bool,
) -> Vec<Vec<Coord>> {
    let blocked: FxHashSet<Coord> = state
        .inventories
        .iter()
        .flat_map(|inv| inv.ants.iter())
        .map(|ant| ant.coords)
        .filter(|&c| c != from)
        .collect();

    let (costs, previous) = shortest_costs(state, from, ignores_grass, |c| !blocked.contains(&c));

    let mut destinations: Vec<Coord> = costs
        .iter()
        .filter(|&(&coord, &cost)| coord != from && cost <= movement as u32)
        .map(|(&coord, _)| coord)
        .collect();
    destinations.sort();

    destinations
        .into_iter()
        .map(|dest| rebuild_path(&previous, from, dest))
        .collect()
}

/// Movement cost of the cheapest route between two cells, ignoring units
pub fn steps_to_reach(state: &GameState, from: Coord, to: Coord) -> Option<u32> {
    let (costs, _) = shortest_costs(state, from, false, |_| true);
    costs.get(&to).copied()
}

/// Cost of stepping onto a cell
fn enter_cost(state: &GameState, coord: Coord, ignores_grass: bool) -> u32 {
    match state.construction_at(coord) {
        Some(c) if c.constr_type == ConstrType::Grass && !ignores_grass => GRASS_MOVE_COST as u32,
        _ => 1,
    }
}

type CostMap = FxHashMap<Coord, u32>;
type PrevMap = FxHashMap<Coord, Coord>;

/// Dijkstra over the grid from `from`
fn shortest_costs<F>(state: &GameState, from: Coord, ignores_grass: bool, passable: F) -> (CostMap, PrevMap)
where
    F: Fn(Coord) -> bool,
{
    let mut costs: CostMap = FxHashMap::default();
    let mut previous: PrevMap = FxHashMap::default();
    let mut frontier = BinaryHeap::new();

    costs.insert(from, 0);
    frontier.push(Reverse((0u32, from)));

    while let Some(Reverse((cost, coord))) = frontier.pop() {
        if costs.get(&coord).map_or(false, |&best| cost > best) {
            continue;
        }
        for next in coord.neighbors() {
            if !passable(next) {
                continue;
            }
            let next_cost = cost + enter_cost(state, next, ignores_grass);
            if costs.get(&next).map_or(true, |&best| next_cost < best) {
                costs.insert(next, next_cost);
                previous.insert(next, coord);
                frontier.push(Reverse((next_cost, next)));
            }
        }
    }

    (costs, previous)
}

fn rebuild_path(previous: &PrevMap, from: Coord, dest: Coord) -> Vec<Coord> {
    let mut path = vec![dest];
    let mut current = dest;
    while current != from {
        match previous.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Enemy units within `attacker`'s range after it stands on `at`
pub fn attack_targets(state: &GameState, attacker: AntType, owner: PlayerId, at: Coord) -> Vec<Coord> {
    let range = attacker.stats().range as i32;
    state
        .inventory(owner.opponent())
        .ants
        .iter()
        .map(|enemy| enemy.coords)
        .filter(|&coord| range * range >= at.squared_distance_to(coord))
        .collect()
}

// ============================================================================
// SETUP
// ============================================================================

/// Validate and apply a player's setup placement for the current phase
pub fn apply_placement(state: &mut GameState, player: PlayerId, coords: &[Coord]) -> Result<()> {
    match state.phase {
        Phase::SetupPhase1 => place_home(state, player, coords),
        Phase::SetupPhase2 => place_food(state, player, coords),
        phase => Err(GameError::NotSetupPhase { phase }),
    }
}

fn place_home(state: &mut GameState, player: PlayerId, coords: &[Coord]) -> Result<()> {
    if coords.len() != PHASE1_PLACEMENTS {
        return Err(GameError::PlacementCount {
            expected: PHASE1_PLACEMENTS,
            actual: coords.len(),
        });
    }
    let mut seen = FxHashSet::default();
    for &coord in coords {
        if !coord.is_valid() || !player.owns_row(coord) {
            return Err(invalid(coord, player, "outside own territory"));
        }
        if !seen.insert(coord) || state.construction_at(coord).is_some() {
            return Err(invalid(coord, player, "cell already occupied"));
        }
    }

    state.place_construction(ConstrType::Anthill, coords[0], Some(player));
    for &coord in &coords[1..] {
        state.place_construction(ConstrType::Grass, coord, None);
    }
    Ok(())
}

fn place_food(state: &mut GameState, player: PlayerId, coords: &[Coord]) -> Result<()> {
    if coords.len() != PHASE2_PLACEMENTS {
        return Err(GameError::PlacementCount {
            expected: PHASE2_PLACEMENTS,
            actual: coords.len(),
        });
    }
    let mut seen = FxHashSet::default();
    for &coord in coords {
        if !coord.is_valid() || !player.opponent().owns_row(coord) {
            return Err(invalid(coord, player, "outside opponent territory"));
        }
        if !seen.insert(coord) || state.construction_at(coord).is_some() {
            return Err(invalid(coord, player, "cell already occupied"));
        }
    }

    for &coord in coords {
        state.place_construction(ConstrType::Food, coord, None);
    }
    Ok(())
}

fn invalid(coord: Coord, player: PlayerId, reason: &'static str) -> GameError {
    GameError::InvalidPlacement {
        coord,
        player,
        reason,
    }
}

/// Put each queen on its anthill, hand out starting food, player one to move
pub fn start_play(state: &mut GameState) {
    for player in [PlayerId::One, PlayerId::Two] {
        if let Some(hill) = state.inventory(player).anthill().map(|c| c.coords) {
            state.spawn_ant(AntType::Queen, hill, player);
        }
        state.inventory_mut(player).food = STARTING_FOOD;
    }
    state.whose_turn = PlayerId::One;
    state.phase = Phase::Play;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_board() -> GameState {
        let mut state = GameState::empty(Phase::Play);
        state.place_construction(ConstrType::Anthill, Coord::new(0, 0), Some(PlayerId::One));
        state.place_construction(ConstrType::Anthill, Coord::new(9, 9), Some(PlayerId::Two));
        state.spawn_ant(AntType::Queen, Coord::new(0, 0), PlayerId::One);
        state.spawn_ant(AntType::Queen, Coord::new(9, 9), PlayerId::Two);
        state
    }

    #[test]
    fn test_end_always_legal() {
        let state = open_board();
        let moves = legal_moves(&state);
        assert_eq!(moves.last(), Some(&Move::End));
    }

    #[test]
    fn test_no_moves_outside_play() {
        let state = GameState::new();
        assert!(legal_moves(&state).is_empty());
    }

    #[test]
    fn test_queen_paths_from_corner() {
        let state = open_board();
        let paths = movement_paths(&state, Coord::new(0, 0), 2);
        // (1,0) (2,0) (0,1) (0,2) (1,1)
        assert_eq!(paths.len(), 5);
        for path in &paths {
            assert_eq!(path[0], Coord::new(0, 0));
            assert!(path.len() <= 3);
        }
    }

    #[test]
    fn test_grass_costs_extra() {
        let mut state = open_board();
        state.place_construction(ConstrType::Grass, Coord::new(1, 0), None);
        let paths = movement_paths(&state, Coord::new(0, 0), 2);
        let dests: Vec<Coord> = paths.iter().filter_map(|p| p.last().copied()).collect();
        assert!(dests.contains(&Coord::new(1, 0)));
        assert!(!dests.contains(&Coord::new(2, 0)));
        assert_eq!(steps_to_reach(&state, Coord::new(0, 0), Coord::new(2, 0)), Some(3));
    }

    #[test]
    fn test_units_block_paths() {
        let mut state = open_board();
        state.spawn_ant(AntType::Worker, Coord::new(1, 0), PlayerId::One);
        state.spawn_ant(AntType::Worker, Coord::new(0, 1), PlayerId::One);
        let paths = movement_paths(&state, Coord::new(0, 0), 2);
        assert!(paths.is_empty());
    }

    #[test]
    fn test_build_worker_when_hill_free() {
        let mut state = open_board();
        state.inventory_mut(PlayerId::One).food = 1;
        state.inventory_mut(PlayerId::One).ants[0].coords = Coord::new(1, 1);
        let moves = legal_moves(&state);
        assert!(moves.contains(&Move::Build {
            coord: Coord::new(0, 0),
            build: BuildType::Ant(AntType::Worker),
        }));
        assert!(!moves.iter().any(|m| matches!(
            m,
            Move::Build { build: BuildType::Ant(AntType::Soldier), .. }
        )));
    }

    #[test]
    fn test_no_build_when_hill_occupied() {
        let mut state = open_board();
        state.inventory_mut(PlayerId::One).food = 5;
        let moves = legal_moves(&state);
        assert!(!moves.iter().any(|m| matches!(m, Move::Build { .. })));
    }

    #[test]
    fn test_attack_targets_range() {
        let mut state = open_board();
        state.spawn_ant(AntType::Worker, Coord::new(5, 5), PlayerId::Two);
        state.spawn_ant(AntType::Worker, Coord::new(6, 6), PlayerId::Two);
        let near = attack_targets(&state, AntType::Drone, PlayerId::One, Coord::new(5, 4));
        assert_eq!(near, vec![Coord::new(5, 5)]);
        let ranged = attack_targets(&state, AntType::RangedSoldier, PlayerId::One, Coord::new(5, 4));
        assert_eq!(ranged.len(), 2);
    }

    #[test]
    fn test_setup_flow() {
        let mut state = GameState::new();
        let home: Vec<Coord> = (0..10).map(|x| Coord::new(x, 0)).collect();
        apply_placement(&mut state, PlayerId::One, &home).unwrap();
        let away: Vec<Coord> = (0..10).map(|x| Coord::new(x, 9)).collect();
        apply_placement(&mut state, PlayerId::Two, &away).unwrap();

        state.phase = Phase::SetupPhase2;
        let err = apply_placement(&mut state, PlayerId::One, &[Coord::new(0, 9), Coord::new(1, 8)]);
        assert!(matches!(err, Err(GameError::InvalidPlacement { .. })));
        apply_placement(&mut state, PlayerId::One, &[Coord::new(0, 8), Coord::new(1, 8)]).unwrap();

        start_play(&mut state);
        assert_eq!(state.phase, Phase::Play);
        assert!(state.inventory(PlayerId::One).queen().is_some());
        assert_eq!(state.inventory(PlayerId::Two).food, STARTING_FOOD);
    }

    #[test]
    fn test_phase1_rejects_wrong_half() {
        let mut state = GameState::new();
        let coords: Vec<Coord> = (0..10).map(|x| Coord::new(x, 5)).collect();
        assert!(apply_placement(&mut state, PlayerId::One, &coords).is_err());
        assert!(apply_placement(&mut state, PlayerId::One, &coords[..3]).is_err());
    }
}
