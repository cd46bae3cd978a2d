use serde::{Deserialize, Serialize};
use std::ops::Add;

/// A grid coordinate, or a movement delta between two coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction`
    pub fn step(self, direction: Direction) -> Self {
        self + direction.delta()
    }

    /// True if the two cells share an edge
    pub fn is_adjacent(self, other: Cell) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit delta for moving one cell in this direction (y grows downwards)
    pub fn delta(&self) -> Cell {
        match self {
            Direction::Up => Cell::new(0, -1),
            Direction::Down => Cell::new(0, 1),
            Direction::Left => Cell::new(-1, 0),
            Direction::Right => Cell::new(1, 0),
        }
    }
}

impl TryFrom<Cell> for Direction {
    type Error = Cell;

    /// Accepts exactly the four cardinal unit deltas
    fn try_from(delta: Cell) -> Result<Self, Self::Error> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.delta() == delta)
            .ok_or(delta)
    }
}
