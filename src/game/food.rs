use log::{trace, warn};
use rand::{Rng, seq::IteratorRandom};

use super::cell::Cell;
use super::error::GameError;
use super::geometry::GridGeometry;
use super::snake::Snake;

/// Rejected samples per grid cell before placement switches to scanning
/// the free cells
const SAMPLES_PER_CELL: usize = 4;

/// The single piece of food on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Cell,
}

impl Food {
    /// Place the first food on a free cell
    pub fn spawn<R: Rng>(
        occupied: &Snake,
        geometry: &GridGeometry,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let mut food = Self {
            position: Cell::new(0, 0),
        };
        food.relocate(occupied, geometry, rng)?;
        Ok(food)
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Move to a uniformly random on-grid cell not covered by `occupied`
    ///
    /// Sampling is retried a bounded number of times; past that the free
    /// cells are enumerated and one is chosen, which is still uniform and
    /// fails with [`GameError::NoFreeCell`] when the snake fills the grid.
    pub fn relocate<R: Rng>(
        &mut self,
        occupied: &Snake,
        geometry: &GridGeometry,
        rng: &mut R,
    ) -> Result<(), GameError> {
        let max_samples = geometry.area() * SAMPLES_PER_CELL;

        for _ in 0..max_samples {
            let candidate = Cell::new(
                rng.gen_range(0..geometry.cell_count),
                rng.gen_range(0..geometry.cell_count),
            );
            if !occupied.contains(candidate) {
                trace!("Food placed at {:?}", candidate);
                self.position = candidate;
                return Ok(());
            }
        }

        warn!(
            "No free cell after {} samples, scanning {} cells",
            max_samples,
            geometry.area()
        );
        self.position = geometry
            .cells()
            .filter(|cell| !occupied.contains(*cell))
            .choose(rng)
            .ok_or(GameError::NoFreeCell)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn place_at(&mut self, position: Cell) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cell::Direction;
    use rand::{SeedableRng, rngs::StdRng};

    fn starting_snake() -> Snake {
        Snake::new(
            vec![Cell::new(6, 9), Cell::new(5, 9), Cell::new(4, 9)],
            Direction::Right,
        )
    }

    #[test]
    fn test_spawn_avoids_snake() {
        let snake = starting_snake();
        let geometry = GridGeometry::default();

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let food = Food::spawn(&snake, &geometry, &mut rng).unwrap();
            assert!(geometry.contains(food.position()));
            assert!(!snake.contains(food.position()));
        }
    }

    #[test]
    fn test_relocate_avoids_snake() {
        let snake = starting_snake();
        let geometry = GridGeometry::new(10, 1, 1, 0);
        let mut rng = StdRng::seed_from_u64(7);
        let mut food = Food::spawn(&snake, &geometry, &mut rng).unwrap();

        for _ in 0..500 {
            food.relocate(&snake, &geometry, &mut rng).unwrap();
            assert!(geometry.contains(food.position()));
            assert!(!snake.contains(food.position()));
        }
    }

    #[test]
    fn test_relocate_reaches_every_free_cell() {
        let snake = starting_snake();
        let geometry = GridGeometry::new(10, 1, 1, 0);
        let mut rng = StdRng::seed_from_u64(11);
        let mut food = Food::spawn(&snake, &geometry, &mut rng).unwrap();

        let mut seen = std::collections::HashSet::new();
        for _ in 0..5_000 {
            food.relocate(&snake, &geometry, &mut rng).unwrap();
            seen.insert(food.position());
        }

        assert_eq!(seen.len(), geometry.area() - snake.len());
    }

    #[test]
    fn test_single_free_cell() {
        // Snake covers every cell of a 2x2 grid except (1,1)
        let snake = Snake::new(
            vec![Cell::new(0, 1), Cell::new(0, 0), Cell::new(1, 0)],
            Direction::Down,
        );
        let geometry = GridGeometry::new(2, 1, 1, 0);
        let mut rng = StdRng::seed_from_u64(3);

        let food = Food::spawn(&snake, &geometry, &mut rng).unwrap();
        assert_eq!(food.position(), Cell::new(1, 1));
    }

    #[test]
    fn test_full_grid_fails() {
        let snake = Snake::new(
            vec![
                Cell::new(1, 1),
                Cell::new(0, 1),
                Cell::new(0, 0),
                Cell::new(1, 0),
            ],
            Direction::Down,
        );
        let geometry = GridGeometry::new(2, 1, 1, 0);
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(
            Food::spawn(&snake, &geometry, &mut rng),
            Err(GameError::NoFreeCell)
        );
    }
}
