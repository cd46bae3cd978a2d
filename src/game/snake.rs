use std::collections::VecDeque;

use super::cell::{Cell, Direction};

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Cell>,
    /// Direction the next move will take
    direction: Direction,
    /// Direction the last move took
    heading: Direction,
    pending_growth: bool,
    initial_body: Vec<Cell>,
    initial_direction: Direction,
}

impl Snake {
    /// Create a snake from its body (head first) and starting direction
    ///
    /// `reset` returns the snake to exactly this state.
    ///
    /// # Panics
    ///
    /// Panics if `initial_body` is empty. Bodies read from a config are
    /// checked by [`crate::game::GameConfig::validate`] before they get here.
    pub fn new(initial_body: Vec<Cell>, initial_direction: Direction) -> Self {
        assert!(!initial_body.is_empty(), "snake body cannot be empty");

        Self {
            body: initial_body.iter().copied().collect(),
            direction: initial_direction,
            heading: initial_direction,
            pending_growth: false,
            initial_body,
            initial_direction,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Body cells from head to tail
    pub fn body(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_growing(&self) -> bool {
        self.pending_growth
    }

    /// Move one cell in the current direction
    ///
    /// Keeps the tail when a growth is pending, otherwise drops it.
    pub fn advance(&mut self) {
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);

        if self.pending_growth {
            self.pending_growth = false;
        } else {
            self.body.pop_back();
        }

        self.heading = self.direction;
    }

    /// Grow by one segment on the next move
    pub fn grow(&mut self) {
        self.pending_growth = true;
    }

    /// Turn towards `direction` from the next move on
    ///
    /// Reversing the last move would drive the head into the neck, so that
    /// turn is refused and `false` is returned. The check is against the last
    /// move rather than the last accepted turn: two turns between ticks
    /// cannot add up to a reversal.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.heading.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Return to the starting body and direction
    pub fn reset(&mut self) {
        self.body = self.initial_body.iter().copied().collect();
        self.direction = self.initial_direction;
        self.heading = self.initial_direction;
        self.pending_growth = false;
    }

    /// Check if a cell is occupied by any part of the snake
    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Check if the head overlaps any other segment
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&cell| cell == head)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false, a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starting_snake() -> Snake {
        Snake::new(
            vec![Cell::new(6, 9), Cell::new(5, 9), Cell::new(4, 9)],
            Direction::Right,
        )
    }

    fn cells(snake: &Snake) -> Vec<Cell> {
        snake.body().collect()
    }

    #[test]
    fn test_snake_creation() {
        let snake = starting_snake();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(6, 9));
        assert_eq!(snake.tail(), Cell::new(4, 9));
        assert_eq!(snake.direction(), Direction::Right);
        assert!(!snake.is_growing());
    }

    #[test]
    #[should_panic(expected = "snake body cannot be empty")]
    fn test_empty_body_panics() {
        Snake::new(Vec::new(), Direction::Right);
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = starting_snake();
        snake.advance();

        assert_eq!(
            cells(&snake),
            vec![Cell::new(7, 9), Cell::new(6, 9), Cell::new(5, 9)]
        );
    }

    #[test]
    fn test_movement_keeps_length_in_every_direction() {
        for direction in [Direction::Up, Direction::Down, Direction::Right] {
            let mut snake = starting_snake();
            let old_head = snake.head();
            let old_tail = snake.tail();

            snake.set_direction(direction);
            snake.advance();

            assert_eq!(snake.len(), 3);
            assert_eq!(snake.head(), old_head + direction.delta());
            assert!(!snake.contains(old_tail));
        }
    }

    #[test]
    fn test_growth_keeps_tail() {
        let mut snake = starting_snake();
        snake.grow();
        assert!(snake.is_growing());

        snake.advance();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Cell::new(4, 9));
        assert!(!snake.is_growing());

        // Growth is consumed by a single move
        snake.advance();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Cell::new(5, 9));
    }

    #[test]
    fn test_reverse_turn_refused() {
        let mut snake = starting_snake();

        assert!(!snake.set_direction(Direction::Left));
        assert_eq!(snake.direction(), Direction::Right);

        assert!(snake.set_direction(Direction::Up));
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn test_double_turn_between_moves_cannot_reverse() {
        let mut snake = starting_snake();

        // Up is fine, but Left would still reverse the move just made
        assert!(snake.set_direction(Direction::Up));
        assert!(!snake.set_direction(Direction::Left));
        assert_eq!(snake.direction(), Direction::Up);

        snake.advance();
        assert!(snake.set_direction(Direction::Left));
        snake.advance();
        assert!(!snake.bites_itself());
    }

    #[test]
    fn test_reset() {
        let mut snake = starting_snake();
        snake.set_direction(Direction::Down);
        snake.grow();
        snake.advance();
        snake.advance();

        snake.reset();
        assert_eq!(cells(&snake), cells(&starting_snake()));
        assert_eq!(snake.direction(), Direction::Right);
        assert!(!snake.is_growing());
        assert!(!snake.set_direction(Direction::Left));
    }

    #[test]
    fn test_collision_detection() {
        let snake = starting_snake();
        assert!(snake.contains(Cell::new(6, 9))); // head
        assert!(snake.contains(Cell::new(4, 9))); // tail
        assert!(!snake.contains(Cell::new(10, 10))); // empty
        assert!(!snake.bites_itself());
    }

    #[test]
    fn test_bites_itself() {
        let snake = Snake::new(
            vec![
                Cell::new(5, 5),
                Cell::new(5, 6),
                Cell::new(6, 6),
                Cell::new(6, 5),
                Cell::new(5, 5),
            ],
            Direction::Up,
        );
        assert!(snake.bites_itself());
    }

    #[test]
    fn test_turning_into_own_body() {
        // Head (5,5) going right, body curls below and to the left
        let mut snake = Snake::new(
            vec![
                Cell::new(5, 5),
                Cell::new(4, 5),
                Cell::new(4, 6),
                Cell::new(5, 6),
                Cell::new(6, 6),
            ],
            Direction::Right,
        );

        assert!(snake.set_direction(Direction::Down));
        snake.advance();
        assert!(snake.bites_itself());
    }
}
