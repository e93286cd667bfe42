//! Unit and structure type definitions

use serde::{Deserialize, Serialize};

/// Unit class
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AntType {
    Queen,
    Worker,
    Drone,
    Soldier,
    RangedSoldier,
}

/// Structure class
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstrType {
    Anthill,
    Tunnel,
    Grass,
    Food,
}

/// Static unit statistics
#[derive(Clone, Debug)]
pub struct UnitStats {
    pub name: &'static str,
    pub movement: u8,
    pub health: u8,
    pub attack: u8,
    pub range: u8,
    /// Food cost to build (None = cannot be built)
    pub cost: Option<u8>,
    pub ignores_grass: bool,
}

impl UnitStats {
    const fn new(
        name: &'static str,
        movement: u8,
        health: u8,
        attack: u8,
        range: u8,
        cost: Option<u8>,
        ignores_grass: bool,
    ) -> Self {
        Self {
            name,
            movement,
            health,
            attack,
            range,
            cost,
            ignores_grass,
        }
    }
}

/// Stats indexed by `AntType as usize`
pub static UNIT_STATS: [UnitStats; 5] = [
    UnitStats::new("Queen", 2, 10, 2, 1, None, false),
    UnitStats::new("Worker", 2, 4, 1, 1, Some(1), false),
    UnitStats::new("Drone", 3, 5, 2, 1, Some(2), false),
    UnitStats::new("Soldier", 2, 10, 4, 1, Some(3), false),
    UnitStats::new("Ranged Soldier", 1, 8, 2, 3, Some(2), true),
];

/// All buildable unit classes, cheapest first
pub const BUILDABLE_ANTS: [AntType; 4] = [
    AntType::Worker,
    AntType::Drone,
    AntType::RangedSoldier,
    AntType::Soldier,
];

/// Food cost of a tunnel
pub const TUNNEL_COST: u8 = 3;

/// Movement points needed to enter a grass cell
pub const GRASS_MOVE_COST: u8 = 2;

impl AntType {
    pub fn stats(self) -> &'static UnitStats {
        &UNIT_STATS[self as usize]
    }

    pub fn is_queen(self) -> bool {
        self == AntType::Queen
    }

    /// Only workers carry food
    pub fn is_carrier(self) -> bool {
        self == AntType::Worker
    }
}

impl ConstrType {
    /// Structures where a carried food unit is exchanged for the owner's counter
    pub fn is_drop_off(self) -> bool {
        matches!(self, ConstrType::Anthill | ConstrType::Tunnel)
    }

    /// Food cost when built during play (None = setup only)
    pub fn build_cost(self) -> Option<u8> {
        match self {
            ConstrType::Tunnel => Some(TUNNEL_COST),
            _ => None,
        }
    }
}

/// Something a build action can produce
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildType {
    Ant(AntType),
    Constr(ConstrType),
}

impl BuildType {
    /// Food cost of this build
    pub fn cost(self) -> u8 {
        match self {
            BuildType::Ant(ant) => ant.stats().cost.unwrap_or(0),
            BuildType::Constr(constr) => constr.build_cost().unwrap_or(0),
        }
    }
}

/// Cheapest buildable unit class (the only one the search considers)
pub fn cheapest_ant() -> AntType {
    BUILDABLE_ANTS
        .iter()
        .copied()
        .min_by_key(|ant| ant.stats().cost.unwrap_or(u8::MAX))
        .unwrap_or(AntType::Worker)
}
