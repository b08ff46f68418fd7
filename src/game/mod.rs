//! # Game Module
//!
//! Core engine state: topology, containment, visibility, the solar cycle,
//! doors, items, the player and NPCs.

pub mod containment;
pub mod doors;
pub mod fog;
pub mod items;
pub mod npc;
pub mod player;
pub mod solar;
pub mod state;
pub mod topology;
pub mod viewport;

pub use containment::*;
pub use doors::*;
pub use fog::*;
pub use items::*;
pub use npc::*;
pub use player::*;
pub use solar::*;
pub use state::*;
pub use topology::*;
pub use viewport::*;

use serde::{Deserialize, Serialize};

/// A cell coordinate in the world grid, row first.
///
/// Rows grow downwards and columns grow to the right.
///
/// # Examples
///
/// ```
/// use lantern::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.r, 10);
/// assert_eq!(pos.c, 5);
/// assert_eq!(pos + Position::new(1, -1), Position::new(11, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub r: i32,
    pub c: i32,
}

impl Position {
    /// Creates a new position with the given row and column.
    pub fn new(r: i32, c: i32) -> Self {
        Self { r, c }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Euclidean distance to another position.
    pub fn euclidean_distance(self, other: Position) -> f32 {
        let dr = (self.r - other.r) as f32;
        let dc = (self.c - other.c) as f32;
        (dr * dr + dc * dc).sqrt()
    }

    /// Clamps both coordinates into `0..=max.r` and `0..=max.c`.
    pub fn clamp_to(self, max: Position) -> Position {
        Position::new(self.r.clamp(0, max.r.max(0)), self.c.clamp(0, max.c.max(0)))
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.r + other.r, self.c + other.c)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.r - other.r, self.c - other.c)
    }
}

impl std::ops::Div<i32> for Position {
    type Output = Self;

    fn div(self, rhs: i32) -> Self {
        Self::new(self.r / rhs, self.c / rhs)
    }
}

/// Compass directions for movement, sun and shadow.
///
/// `None` is the "no direction" sentinel, used for rooms that cast no
/// shadow. It is never a valid sun direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    None,
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl Direction {
    /// Converts a direction to a (row, column) delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use lantern::{Direction, Position};
    ///
    /// assert_eq!(Direction::North.to_delta(), Position::new(-1, 0));
    /// assert_eq!(Direction::East.to_delta(), Position::new(0, 1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::None => Position::new(0, 0),
            Direction::North => Position::new(-1, 0),
            Direction::Northeast => Position::new(-1, 1),
            Direction::East => Position::new(0, 1),
            Direction::Southeast => Position::new(1, 1),
            Direction::South => Position::new(1, 0),
            Direction::Southwest => Position::new(1, -1),
            Direction::West => Position::new(0, -1),
            Direction::Northwest => Position::new(-1, -1),
        }
    }

    /// The diametrically opposite direction. `None` stays `None`.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::None => Direction::None,
            Direction::North => Direction::South,
            Direction::Northeast => Direction::Southwest,
            Direction::East => Direction::West,
            Direction::Southeast => Direction::Northwest,
            Direction::South => Direction::North,
            Direction::Southwest => Direction::Northeast,
            Direction::West => Direction::East,
            Direction::Northwest => Direction::Southeast,
        }
    }

    /// True for North, East, South and West.
    pub fn is_cardinal(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::South | Direction::West
        )
    }
}
