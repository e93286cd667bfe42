//! Square board geometry with (x, y) coordinates

use serde::{Deserialize, Serialize};

/// Board width (columns)
pub const BOARD_WIDTH: i8 = 10;

/// Board height (rows)
pub const BOARD_HEIGHT: i8 = 10;

/// Number of rows in each player's territory
pub const TERRITORY_ROWS: i8 = 4;

/// Grid coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Check if this coordinate is on the board
    pub fn is_valid(&self) -> bool {
        (0..BOARD_WIDTH).contains(&self.x) && (0..BOARD_HEIGHT).contains(&self.y)
    }

    /// Manhattan distance (every orthogonal step costs 1)
    pub fn manhattan_to(&self, other: Coord) -> i32 {
        (self.x as i32 - other.x as i32).abs() + (self.y as i32 - other.y as i32).abs()
    }

    /// Sum of squared axis differences, compared against squared attack range
    pub fn squared_distance_to(&self, other: Coord) -> i32 {
        let dx = self.x as i32 - other.x as i32;
        let dy = self.y as i32 - other.y as i32;
        dx * dx + dy * dy
    }

    /// On-board orthogonal neighbors
    pub fn neighbors(&self) -> impl Iterator<Item = Coord> + '_ {
        DIRECTIONS
            .iter()
            .map(move |&(dx, dy)| Coord::new(self.x + dx, self.y + dy))
            .filter(Coord::is_valid)
    }
}

impl From<(i8, i8)> for Coord {
    fn from((x, y): (i8, i8)) -> Self {
        Coord::new(x, y)
    }
}

/// Orthogonal step vectors (dx, dy): up, right, down, left
pub const DIRECTIONS: [(i8, i8); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Cells of the territory starting at `row_offset`, in row-major order
pub fn territory(row_offset: i8) -> impl Iterator<Item = Coord> {
    (row_offset..row_offset + TERRITORY_ROWS)
        .flat_map(|y| (0..BOARD_WIDTH).map(move |x| Coord::new(x, y)))
}
