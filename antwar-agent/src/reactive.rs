//! Rule-based baseline agent: no search, no learning

use antwar_core::rules::{steps_to_reach, PHASE2_PLACEMENTS};
use antwar_core::{
    legal_moves, Ant, AntType, BuildType, ConstrType, Coord, GameError, GameState, Move, Phase,
    PlayerId, BOARD_HEIGHT,
};

use crate::error::AgentError;
use crate::player::Player;

/// Phase-1 layout for player one: anthill first, then grass
const HOME_LAYOUT: [(i8, i8); 10] = [
    (2, 1),
    (7, 1),
    (0, 3),
    (1, 3),
    (2, 3),
    (3, 3),
    (6, 3),
    (7, 3),
    (8, 3),
    (9, 3),
];

/// Food columns, most preferred first
const FOOD_COLUMNS: [i8; 10] = [4, 5, 3, 6, 2, 7, 1, 8, 0, 9];

/// Workers built before switching to drones
const WORKER_TARGET: usize = 2;

/// Map a cell given from player one's side onto `player`'s side
fn oriented(player: PlayerId, x: i8, y: i8) -> Coord {
    match player {
        PlayerId::One => Coord::new(x, y),
        PlayerId::Two => Coord::new(x, BOARD_HEIGHT - 1 - y),
    }
}

/// Reactive controller that follows fixed unit roles
#[derive(Clone, Debug)]
pub struct ReactiveAgent {
    name: String,
}

impl Default for ReactiveAgent {
    fn default() -> Self {
        Self::new("reactive")
    }
}

impl ReactiveAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Food goes on the two opponent rows closest to the middle
    fn food_layout(&self, state: &GameState, me: PlayerId) -> Result<Vec<Coord>, AgentError> {
        let rows = match me.opponent() {
            PlayerId::One => [3, 2],
            PlayerId::Two => [6, 7],
        };
        let food: Vec<Coord> = rows
            .iter()
            .flat_map(|&y| FOOD_COLUMNS.iter().map(move |&x| Coord::new(x, y)))
            .filter(|&coord| state.construction_at(coord).is_none())
            .take(PHASE2_PLACEMENTS)
            .collect();
        if food.len() < PHASE2_PLACEMENTS {
            return Err(GameError::NoValidPlacement { phase: state.phase }.into());
        }
        Ok(food)
    }

    /// Where `ant` wants to go, if anywhere
    fn goal_for(&self, state: &GameState, ant: &Ant) -> Option<Coord> {
        let me = ant.owner;
        match ant.ant_type {
            AntType::Queen => Some(oriented(me, 0, 0)),
            AntType::Worker if ant.carrying => nearest(
                state,
                ant.coords,
                state
                    .constructions_of(Some(me), &[ConstrType::Anthill, ConstrType::Tunnel])
                    .iter()
                    .map(|c| c.coords),
            ),
            AntType::Worker => nearest(
                state,
                ant.coords,
                state
                    .constructions_of(None, &[ConstrType::Food])
                    .iter()
                    .map(|c| c.coords),
            ),
            AntType::Drone => {
                let enemy = state.inventory(me.opponent());
                enemy
                    .queen()
                    .map(|q| q.coords)
                    .or_else(|| enemy.anthill().map(|c| c.coords))
            }
            AntType::Soldier | AntType::RangedSoldier => None,
        }
    }

    /// Legal move of the unit at `from` that ends closest to `goal`, when it
    /// gets strictly closer than standing still
    fn step_toward(moves: &[Move], from: Coord, goal: Coord) -> Option<Move> {
        let current = from.manhattan_to(goal);
        moves
            .iter()
            .filter(|mv| mv.origin() == Some(from))
            .filter_map(|mv| mv.destination().map(|dest| (dest.manhattan_to(goal), mv)))
            .filter(|&(distance, _)| distance < current)
            .min_by_key(|&(distance, mv)| (distance, path_len(mv)))
            .map(|(_, mv)| mv.clone())
    }

    fn build_choice(state: &GameState, moves: &[Move]) -> Option<Move> {
        let me = state.whose_turn;
        let workers = state.ants_of(Some(me), &[AntType::Worker]).len();
        let wanted = if workers < WORKER_TARGET {
            AntType::Worker
        } else {
            AntType::Drone
        };
        moves
            .iter()
            .find(|mv| matches!(mv, Move::Build { build: BuildType::Ant(t), .. } if *t == wanted))
            .cloned()
    }
}

fn path_len(mv: &Move) -> usize {
    match mv {
        Move::MoveAnt { path } => path.len(),
        _ => 0,
    }
}

/// Closest candidate by movement cost, falling back to Manhattan distance
fn nearest(state: &GameState, from: Coord, candidates: impl Iterator<Item = Coord>) -> Option<Coord> {
    candidates.min_by_key(|&to| {
        steps_to_reach(state, from, to).unwrap_or_else(|| from.manhattan_to(to) as u32)
    })
}

impl Player for ReactiveAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_placement(&mut self, state: &GameState) -> Result<Vec<Coord>, AgentError> {
        let me = state.whose_turn;
        match state.phase {
            Phase::SetupPhase1 => Ok(HOME_LAYOUT
                .iter()
                .map(|&(x, y)| oriented(me, x, y))
                .collect()),
            Phase::SetupPhase2 => self.food_layout(state, me),
            phase => Err(GameError::NotSetupPhase { phase }.into()),
        }
    }

    fn choose_move(&mut self, state: &GameState) -> Move {
        let moves = legal_moves(state);
        let me = state.whose_turn;

        let order = [AntType::Worker, AntType::Queen, AntType::Drone];
        for ant in state.ants_of(Some(me), &order).into_iter().filter(|a| !a.has_moved) {
            let Some(goal) = self.goal_for(state, ant) else {
                continue;
            };
            if let Some(mv) = Self::step_toward(&moves, ant.coords, goal) {
                tracing::debug!(agent = %self.name, unit = ?ant.ant_type, ?goal, "reactive move");
                return mv;
            }
        }

        Self::build_choice(state, &moves).unwrap_or(Move::End)
    }

    fn choose_attack_target(
        &mut self,
        state: &GameState,
        _attacker: &Ant,
        targets: &[Coord],
    ) -> Result<Coord, AgentError> {
        let preferred = targets.iter().find(|&&coord| match state.construction_at(coord) {
            None => true,
            Some(c) => c.constr_type == ConstrType::Anthill,
        });
        preferred
            .or_else(|| targets.first())
            .copied()
            .ok_or(AgentError::Game(GameError::NoValidTarget {
                candidates: targets.len(),
            }))
    }

    fn report_outcome(&mut self, _won: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use antwar_core::rules::apply_placement;
    use antwar_core::{apply_move, start_play};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn set_up(agent: &mut ReactiveAgent) -> GameState {
        let mut state = GameState::new();
        for phase in [Phase::SetupPhase1, Phase::SetupPhase2] {
            state.phase = phase;
            for player in [PlayerId::One, PlayerId::Two] {
                state.whose_turn = player;
                let coords = agent.choose_placement(&state).unwrap();
                apply_placement(&mut state, player, &coords).unwrap();
            }
        }
        start_play(&mut state);
        state
    }

    #[test]
    fn test_layouts_are_valid_for_both_sides() {
        let mut agent = ReactiveAgent::default();
        let state = set_up(&mut agent);
        assert_eq!(
            state.inventory(PlayerId::Two).anthill().map(|c| c.coords),
            Some(Coord::new(2, 8))
        );
        let food = state.constructions_of(None, &[ConstrType::Food]);
        assert_eq!(food.len(), 4);
        assert!(food.iter().any(|c| c.coords == Coord::new(4, 6)));
        assert!(food.iter().any(|c| c.coords == Coord::new(4, 3)));
    }

    #[test]
    fn test_queen_walks_to_corner() {
        let mut agent = ReactiveAgent::default();
        let state = set_up(&mut agent);
        let mv = agent.choose_move(&state);
        assert_eq!(mv.origin(), Some(Coord::new(2, 1)));
        let dest = mv.destination().unwrap();
        assert!(dest.manhattan_to(Coord::new(0, 0)) < Coord::new(2, 1).manhattan_to(Coord::new(0, 0)));
    }

    #[test]
    fn test_turn_always_terminates() {
        let mut agent = ReactiveAgent::default();
        let mut state = set_up(&mut agent);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let mv = agent.choose_move(&state);
            assert!(legal_moves(&state).contains(&mv), "illegal {:?}", mv);
            let ended = mv == Move::End;
            state = apply_move(&state, &mv, &mut rng);
            if ended {
                return;
            }
        }
        panic!("turn did not end");
    }

    #[test]
    fn test_builds_worker_first() {
        let mut agent = ReactiveAgent::default();
        let mut state = set_up(&mut agent);
        // Queen already moved off the anthill
        let hill = state.inventory(PlayerId::One).anthill().unwrap().coords;
        let queen = state.ant_at_mut(hill).unwrap();
        queen.coords = Coord::new(0, 0);
        queen.has_moved = true;

        let mv = agent.choose_move(&state);
        assert_eq!(
            mv,
            Move::Build {
                coord: hill,
                build: BuildType::Ant(AntType::Worker)
            }
        );
    }

    #[test]
    fn test_attack_prefers_open_ground() {
        let mut agent = ReactiveAgent::default();
        let mut state = GameState::empty(Phase::Play);
        state.place_construction(ConstrType::Grass, Coord::new(4, 5), None);
        let attacker = Ant::new(AntType::Drone, Coord::new(4, 4), PlayerId::One);
        let targets = [Coord::new(4, 5), Coord::new(5, 4)];
        assert_eq!(
            agent.choose_attack_target(&state, &attacker, &targets),
            Ok(Coord::new(5, 4))
        );

        state.place_construction(ConstrType::Grass, Coord::new(5, 4), None);
        assert_eq!(
            agent.choose_attack_target(&state, &attacker, &targets),
            Ok(Coord::new(4, 5))
        );
        assert!(agent.choose_attack_target(&state, &attacker, &[]).is_err());
    }
}
