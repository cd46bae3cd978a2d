use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use super::cell::{Cell, Direction};
use super::geometry::GridGeometry;

/// Shortest body a game may start with
pub const MIN_SNAKE_LENGTH: usize = 3;
/// Largest grid side accepted by validation
pub const MAX_CELL_COUNT: i32 = 200;
/// Widest or tallest a single cell may be drawn
pub const MAX_CELL_EXTENT: u16 = 8;
/// Largest gap between the board edge and the first cell
pub const MAX_MARGIN: u16 = 16;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid size and display mapping
    pub geometry: GridGeometry,
    /// Starting body, head first
    pub initial_body: Vec<Cell>,
    /// Starting direction of movement
    pub initial_direction: Direction,
    /// Wall-clock time between simulation ticks
    pub tick_interval_ms: u64,
    /// Render rate of the driver
    pub frames_per_second: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            geometry: GridGeometry::default(),
            initial_body: vec![Cell::new(6, 9), Cell::new(5, 9), Cell::new(4, 9)],
            initial_direction: Direction::Right,
            tick_interval_ms: 200,
            frames_per_second: 60,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(cell_count: i32) -> Self {
        Self {
            geometry: GridGeometry {
                cell_count,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Read a configuration from a JSON file; missing fields take defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config in {:?}", path))?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frames_per_second.max(1)
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration can start a game, `Err(String)` with an
    /// error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        let geometry = &self.geometry;

        if !(2..=MAX_CELL_COUNT).contains(&geometry.cell_count) {
            return Err(format!(
                "cell_count must be in [2, {}], got {}",
                MAX_CELL_COUNT, geometry.cell_count
            ));
        }

        if !(1..=MAX_CELL_EXTENT).contains(&geometry.cell_width)
            || !(1..=MAX_CELL_EXTENT).contains(&geometry.cell_height)
        {
            return Err(format!(
                "cell size must be in [1, {}], got {}x{}",
                MAX_CELL_EXTENT, geometry.cell_width, geometry.cell_height
            ));
        }

        if geometry.margin > MAX_MARGIN {
            return Err(format!(
                "margin must be at most {}, got {}",
                MAX_MARGIN, geometry.margin
            ));
        }

        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be at least 1".to_string());
        }

        if self.frames_per_second == 0 {
            return Err("frames_per_second must be at least 1".to_string());
        }

        let body = &self.initial_body;
        if body.len() < MIN_SNAKE_LENGTH {
            return Err(format!(
                "initial_body needs at least {} cells, got {}",
                MIN_SNAKE_LENGTH,
                body.len()
            ));
        }

        if body.len() >= geometry.area() {
            return Err(format!(
                "initial_body of {} cells leaves no room for food on a {} cell grid",
                body.len(),
                geometry.area()
            ));
        }

        if let Some(cell) = body.iter().find(|cell| !geometry.contains(**cell)) {
            return Err(format!("initial_body cell {:?} is off the grid", cell));
        }

        let distinct: HashSet<&Cell> = body.iter().collect();
        if distinct.len() != body.len() {
            return Err("initial_body cells must be distinct".to_string());
        }

        if let Some(pair) = body.windows(2).find(|pair| !pair[0].is_adjacent(pair[1])) {
            return Err(format!(
                "initial_body cells {:?} and {:?} are not adjacent",
                pair[0], pair[1]
            ));
        }

        if body[0].step(self.initial_direction) == body[1] {
            return Err(format!(
                "initial_direction {:?} points back into the body",
                self.initial_direction
            ));
        }

        Ok(())
    }
}
