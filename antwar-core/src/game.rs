//! Game state, inventories and actions

use crate::board::{Coord, BOARD_HEIGHT, TERRITORY_ROWS};
use crate::units::{AntType, BuildType, ConstrType};
use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Food needed for an economic victory
pub const FOOD_GOAL: u8 = 11;

/// Food each player holds when play begins
pub const STARTING_FOOD: u8 = 1;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player identity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One = 0,
    Two = 1,
}

impl PlayerId {
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// First row of this player's territory
    pub fn home_row_offset(self) -> i8 {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => BOARD_HEIGHT - TERRITORY_ROWS,
        }
    }

    /// Check if a coordinate lies in this player's territory
    pub fn owns_row(self, coord: Coord) -> bool {
        let offset = self.home_row_offset();
        coord.y >= offset && coord.y < offset + TERRITORY_ROWS
    }
}

/// Game phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Each player places its anthill and grass on its own half
    SetupPhase1,
    /// Each player places two food deposits on the opponent's half
    SetupPhase2,
    Play,
    Finished,
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Won(PlayerId),
}

impl GameResult {
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            GameResult::Ongoing => None,
            GameResult::Won(player) => Some(player),
        }
    }
}

/// A unit on the board
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ant {
    pub ant_type: AntType,
    pub coords: Coord,
    pub owner: PlayerId,
    pub health: u8,
    pub carrying: bool,
    pub has_moved: bool,
}

impl Ant {
    pub fn new(ant_type: AntType, coords: Coord, owner: PlayerId) -> Self {
        Self {
            ant_type,
            coords,
            owner,
            health: ant_type.stats().health,
            carrying: false,
            has_moved: false,
        }
    }
}

/// A structure on the board
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Construction {
    pub constr_type: ConstrType,
    pub coords: Coord,
    /// None for neutral grass and food
    pub owner: Option<PlayerId>,
}

impl Construction {
    pub fn new(constr_type: ConstrType, coords: Coord, owner: Option<PlayerId>) -> Self {
        Self {
            constr_type,
            coords,
            owner,
        }
    }
}

/// Per-player holdings
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub ants: Vec<Ant>,
    pub constrs: Vec<Construction>,
    pub food: u8,
}

impl Inventory {
    pub fn queen(&self) -> Option<&Ant> {
        self.ants.iter().find(|ant| ant.ant_type.is_queen())
    }

    pub fn anthill(&self) -> Option<&Construction> {
        self.constrs
            .iter()
            .find(|c| c.constr_type == ConstrType::Anthill)
    }
}

/// A legal action
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Build a unit or structure at a single coordinate
    Build { coord: Coord, build: BuildType },
    /// Move the unit at `path[0]` along the path to its last coordinate
    MoveAnt { path: Vec<Coord> },
    /// Pass the turn to the opponent
    End,
}

impl Move {
    /// Coordinate the acting unit starts from (moves only)
    pub fn origin(&self) -> Option<Coord> {
        match self {
            Move::MoveAnt { path } => path.first().copied(),
            _ => None,
        }
    }

    /// Coordinate the action resolves at
    pub fn destination(&self) -> Option<Coord> {
        match self {
            Move::MoveAnt { path } => path.last().copied(),
            Move::Build { coord, .. } => Some(*coord),
            Move::End => None,
        }
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Game state (clone to mutate)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Holdings indexed by `PlayerId::index`
    pub inventories: [Inventory; 2],
    /// Grass and food
    pub neutral: Vec<Construction>,
    pub whose_turn: PlayerId,
    pub phase: Phase,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Empty board at the start of setup phase 1
    pub fn new() -> Self {
        Self::empty(Phase::SetupPhase1)
    }

    /// Empty board in the given phase, player one to move
    pub fn empty(phase: Phase) -> Self {
        Self {
            inventories: [Inventory::default(), Inventory::default()],
            neutral: Vec::new(),
            whose_turn: PlayerId::One,
            phase,
        }
    }

    /// Add a unit at full health
    pub fn spawn_ant(&mut self, ant_type: AntType, coords: Coord, owner: PlayerId) {
        self.inventories[owner.index()]
            .ants
            .push(Ant::new(ant_type, coords, owner));
    }

    /// Add a structure, neutral when `owner` is None
    pub fn place_construction(
        &mut self,
        constr_type: ConstrType,
        coords: Coord,
        owner: Option<PlayerId>,
    ) {
        let constr = Construction::new(constr_type, coords, owner);
        match owner {
            Some(player) => self.inventories[player.index()].constrs.push(constr),
            None => self.neutral.push(constr),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn inventory(&self, player: PlayerId) -> &Inventory {
        &self.inventories[player.index()]
    }

    pub fn inventory_mut(&mut self, player: PlayerId) -> &mut Inventory {
        &mut self.inventories[player.index()]
    }

    /// Unit at a coordinate
    pub fn ant_at(&self, coord: Coord) -> Option<&Ant> {
        self.inventories
            .iter()
            .flat_map(|inv| inv.ants.iter())
            .find(|ant| ant.coords == coord)
    }

    pub fn ant_at_mut(&mut self, coord: Coord) -> Option<&mut Ant> {
        self.inventories
            .iter_mut()
            .flat_map(|inv| inv.ants.iter_mut())
            .find(|ant| ant.coords == coord)
    }

    /// Structure at a coordinate
    pub fn construction_at(&self, coord: Coord) -> Option<&Construction> {
        self.all_constructions().find(|c| c.coords == coord)
    }

    fn all_constructions(&self) -> impl Iterator<Item = &Construction> {
        self.inventories
            .iter()
            .flat_map(|inv| inv.constrs.iter())
            .chain(self.neutral.iter())
    }

    /// Units of the given classes, for one player or both when `owner` is None
    pub fn ants_of(&self, owner: Option<PlayerId>, types: &[AntType]) -> Vec<&Ant> {
        self.inventories
            .iter()
            .flat_map(|inv| inv.ants.iter())
            .filter(|ant| owner.map_or(true, |p| ant.owner == p))
            .filter(|ant| types.contains(&ant.ant_type))
            .collect()
    }

    /// Structures of the given classes; `owner` None matches every owner,
    /// including neutral structures
    pub fn constructions_of(
        &self,
        owner: Option<PlayerId>,
        types: &[ConstrType],
    ) -> Vec<&Construction> {
        self.all_constructions()
            .filter(|c| owner.map_or(true, |p| c.owner == Some(p)))
            .filter(|c| types.contains(&c.constr_type))
            .collect()
    }

    /// Win/loss check: losing the queen loses, reaching the food goal wins
    pub fn result(&self) -> GameResult {
        if self.phase != Phase::Play && self.phase != Phase::Finished {
            return GameResult::Ongoing;
        }
        for player in [PlayerId::One, PlayerId::Two] {
            let inv = self.inventory(player);
            if inv.queen().is_none() {
                return GameResult::Won(player.opponent());
            }
            if inv.food >= FOOD_GOAL {
                return GameResult::Won(player);
            }
        }
        GameResult::Ongoing
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_state() -> GameState {
        let mut state = GameState::empty(Phase::Play);
        state.place_construction(ConstrType::Anthill, Coord::new(2, 1), Some(PlayerId::One));
        state.place_construction(ConstrType::Anthill, Coord::new(7, 8), Some(PlayerId::Two));
        state.place_construction(ConstrType::Food, Coord::new(4, 7), None);
        state.spawn_ant(AntType::Queen, Coord::new(2, 1), PlayerId::One);
        state.spawn_ant(AntType::Queen, Coord::new(7, 8), PlayerId::Two);
        state.spawn_ant(AntType::Worker, Coord::new(3, 3), PlayerId::One);
        state
    }

    #[test]
    fn test_lookups() {
        let state = play_state();
        assert_eq!(
            state.ant_at(Coord::new(3, 3)).map(|a| a.ant_type),
            Some(AntType::Worker)
        );
        assert!(state.ant_at(Coord::new(0, 0)).is_none());
        assert_eq!(
            state.construction_at(Coord::new(4, 7)).map(|c| c.constr_type),
            Some(ConstrType::Food)
        );
        assert_eq!(state.ants_of(None, &[AntType::Queen]).len(), 2);
        assert_eq!(state.ants_of(Some(PlayerId::One), &[AntType::Worker]).len(), 1);
        assert_eq!(state.constructions_of(None, &[ConstrType::Food]).len(), 1);
        assert_eq!(
            state
                .constructions_of(Some(PlayerId::Two), &[ConstrType::Anthill, ConstrType::Food])
                .len(),
            1
        );
    }

    #[test]
    fn test_result_queen_loss() {
        let mut state = play_state();
        assert_eq!(state.result(), GameResult::Ongoing);
        state.inventory_mut(PlayerId::Two).ants.clear();
        assert_eq!(state.result(), GameResult::Won(PlayerId::One));
    }

    #[test]
    fn test_result_food_goal() {
        let mut state = play_state();
        state.inventory_mut(PlayerId::Two).food = FOOD_GOAL;
        assert_eq!(state.result().winner(), Some(PlayerId::Two));
    }

    #[test]
    fn test_setup_is_never_decided() {
        let state = GameState::new();
        assert_eq!(state.result(), GameResult::Ongoing);
    }

    #[test]
    fn test_territory() {
        assert!(PlayerId::One.owns_row(Coord::new(5, 3)));
        assert!(!PlayerId::One.owns_row(Coord::new(5, 4)));
        assert!(PlayerId::Two.owns_row(Coord::new(0, 6)));
        assert_eq!(PlayerId::Two.home_row_offset(), 6);
    }
}
