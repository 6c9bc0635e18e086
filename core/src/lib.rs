#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use grid::*;
pub use host::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod grid;
mod host;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square grid.
    pub size: Coord,
    /// Percent chance, in `[0, 100]`, that any single tile holds a bomb.
    pub bomb_chance: f64,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, bomb_chance: f64) -> Self {
        Self { size, bomb_chance }
    }

    pub fn new(size: Coord, bomb_chance: f64) -> Self {
        let clamped_size = size.max(1);
        if clamped_size != size {
            log::warn!("Grid size must be positive, using {clamped_size} instead of {size}");
        }

        let clamped_chance = if bomb_chance.is_nan() {
            0.0
        } else {
            bomb_chance.clamp(0.0, 100.0)
        };
        if clamped_chance != bomb_chance {
            log::warn!("Bomb chance {bomb_chance} is out of range, using {clamped_chance}");
        }

        Self::new_unchecked(clamped_size, clamped_chance)
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size, self.size)
    }

    /// Per-tile bomb probability in `[0, 1]`.
    pub fn bomb_probability(&self) -> f64 {
        if self.bomb_chance.is_nan() {
            return 0.0;
        }
        (self.bomb_chance / 100.0).clamp(0.0, 1.0)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(10, 15.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_out_of_range_values() {
        assert_eq!(GameConfig::new(0, 150.0), GameConfig::new_unchecked(1, 100.0));
        assert_eq!(GameConfig::new(4, -3.0), GameConfig::new_unchecked(4, 0.0));
        assert_eq!(GameConfig::new(4, f64::NAN).bomb_chance, 0.0);
    }

    #[test]
    fn bomb_probability_is_a_fraction() {
        assert_eq!(GameConfig::new(3, 25.0).bomb_probability(), 0.25);
        assert_eq!(GameConfig::new_unchecked(3, 400.0).bomb_probability(), 1.0);
    }

    #[test]
    fn total_tiles_is_side_squared() {
        assert_eq!(GameConfig::new(12, 10.0).total_tiles(), 144);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = GameConfig::new(16, 12.5);
        let json = serde_json::to_string(&config).unwrap();

        assert_eq!(json, r#"{"size":16,"bomb_chance":12.5}"#);
        assert_eq!(serde_json::from_str::<GameConfig>(&json).unwrap(), config);
    }
}
