//! # Generation Module
//!
//! Procedural content for the engine: a simple grid-based topology provider
//! and rejection-sampled placement of keys, lamps and NPCs.
//!
//! The topology provider only has to produce a valid
//! [`Topology`](crate::game::Topology); the engine never depends on how the
//! layout was produced.

pub mod dungeon;
pub mod encounters;
pub mod items;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::{LanternError, LanternResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// The world is split into a `grid_rows` x `grid_cols` grid of cells with
/// one room per cell; neighbouring rooms are joined by straight corridors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// World height in rows
    pub world_rows: i32,
    /// World width in columns
    pub world_cols: i32,
    /// Number of room cells vertically
    pub grid_rows: i32,
    /// Number of room cells horizontally
    pub grid_cols: i32,
    /// Minimum room height; widths are twice the height range
    pub min_room_size: i32,
    /// Maximum room height
    pub max_room_size: i32,
    /// Probability that a door cell is a plain opening (0.0 to 1.0)
    pub opening_chance: f64,
    /// Probability that a real door is locked (0.0 to 1.0)
    pub locked_chance: f64,
}

impl GenerationConfig {
    /// Creates a default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use lantern::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert!(config.min_room_size >= 4);
    /// assert!(config.max_room_size >= config.min_room_size);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            world_rows: 75,
            world_cols: 200,
            grid_rows: 3,
            grid_cols: 4,
            min_room_size: 6,
            max_room_size: 16,
            opening_chance: 0.3,
            locked_chance: 0.25,
        }
    }

    /// Creates a configuration for testing with a small world.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            world_rows: 40,
            world_cols: 90,
            grid_rows: 2,
            grid_cols: 3,
            min_room_size: 4,
            max_room_size: 8,
            opening_chance: 0.3,
            locked_chance: 0.5,
        }
    }

    /// Height and width of one grid cell.
    pub fn cell_size(&self) -> (i32, i32) {
        (
            self.world_rows / self.grid_rows.max(1),
            self.world_cols / self.grid_cols.max(1),
        )
    }

    /// Checks that every cell can hold its room with a gap for corridors.
    pub fn validate(&self) -> LanternResult<()> {
        if self.grid_rows < 1 || self.grid_cols < 1 {
            return Err(LanternError::InvalidConfiguration(
                "grid must have at least one cell".to_string(),
            ));
        }
        if self.min_room_size < 4 || self.max_room_size < self.min_room_size {
            return Err(LanternError::InvalidConfiguration(format!(
                "room size range {}..={} is invalid",
                self.min_room_size, self.max_room_size
            )));
        }
        let (cell_h, cell_w) = self.cell_size();
        if cell_h < self.min_room_size + 3 || cell_w < self.min_room_size * 2 + 3 {
            return Err(LanternError::InvalidConfiguration(format!(
                "grid cells of {}x{} are too small for rooms of size {}",
                cell_h, cell_w, self.min_room_size
            )));
        }
        for (name, p) in [("opening_chance", self.opening_chance), ("locked_chance", self.locked_chance)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(LanternError::InvalidConfiguration(format!(
                    "{} must lie in [0, 1], got {}",
                    name, p
                )));
            }
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
///
/// Generators are deterministic for a given configuration and RNG state.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> LanternResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> LanternResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_presets() {
        assert!(GenerationConfig::new(1).validate().is_ok());
        assert!(GenerationConfig::for_testing(1).validate().is_ok());
        assert_eq!(GenerationConfig::default().seed, 42);
    }

    #[test]
    fn test_rejects_cramped_grid() {
        let config = GenerationConfig {
            grid_rows: 20,
            ..GenerationConfig::for_testing(1)
        };
        assert!(matches!(config.validate(), Err(LanternError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_rejects_bad_probability() {
        let config = GenerationConfig {
            locked_chance: 1.5,
            ..GenerationConfig::new(1)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_utils_rng_creation() {
        use rand::Rng;
        let config = GenerationConfig::for_testing(99);
        let a: u64 = utils::create_rng(&config).gen();
        let b: u64 = utils::create_rng(&config).gen();
        assert_eq!(a, b);
    }
}
