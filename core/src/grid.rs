use core::ops::{Index, IndexMut};
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Square board of tiles, one [`Tile`] per coordinate pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    tiles: Array2<Tile>,
    bomb_count: CellCount,
}

/// Unchecked wire form of a [`Grid`].
#[derive(Deserialize)]
struct GridRepr {
    tiles: Array2<Tile>,
    bomb_count: CellCount,
}

impl TryFrom<GridRepr> for Grid {
    type Error = GameError;

    fn try_from(repr: GridRepr) -> Result<Self> {
        let (size_x, size_y) = repr.tiles.dim();
        if size_x != size_y || size_x == 0 || Coord::try_from(size_x).is_err() {
            return Err(GameError::InvalidBoardShape);
        }

        for ((x, y), tile) in repr.tiles.indexed_iter() {
            // bombs are never discovered, and a discovered tile carries no flag
            let misplaced = tile.coords() != (x as Coord, y as Coord);
            let impossible = tile.is_discovered() && (tile.is_bomb() || tile.is_flagged());
            if misplaced || impossible {
                return Err(GameError::InvalidBoardShape);
            }
        }

        let grid = Self::from_tiles(repr.tiles);
        if grid.bomb_count != repr.bomb_count {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(grid)
    }
}

impl Grid {
    /// Samples a fresh board, each tile independently a bomb with the configured chance.
    pub fn generate<R: Rng>(config: GameConfig, rng: &mut R) -> Self {
        let probability = config.bomb_probability();
        let mut bombs: Array2<bool> = Array2::default((config.size, config.size).to_nd_index());
        for x in 0..config.size {
            for y in 0..config.size {
                bombs[(x, y).to_nd_index()] = rng.random_bool(probability);
            }
        }

        let tiles = Self::tiles_from_mask(&bombs);
        let grid = Self::from_tiles(tiles);
        log::debug!(
            "Generated {0}x{0} grid with {1} bombs ({2}% chance)",
            config.size,
            grid.bomb_count,
            config.bomb_chance
        );
        grid
    }

    /// Builds a fixed layout with bombs exactly at `bomb_coords`.
    pub fn from_bomb_coords(size: Coord, bomb_coords: &[Coord2]) -> Result<Self> {
        let size = size.max(1);
        let mut bombs: Array2<bool> = Array2::default((size, size).to_nd_index());

        for &(x, y) in bomb_coords {
            if x >= size || y >= size {
                return Err(GameError::InvalidCoords { x, y });
            }
            bombs[(x, y).to_nd_index()] = true;
        }

        Ok(Self::from_tiles(Self::tiles_from_mask(&bombs)))
    }

    fn tiles_from_mask(bombs: &Array2<bool>) -> Array2<Tile> {
        Array2::from_shape_fn(bombs.dim(), |(x, y)| {
            Tile::new((x as Coord, y as Coord), bombs[(x, y)])
        })
    }

    fn from_tiles(tiles: Array2<Tile>) -> Self {
        let bomb_count = tiles
            .iter()
            .filter(|tile| tile.is_bomb())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self { tiles, bomb_count }
    }

    pub fn size(&self) -> Coord {
        self.tiles.dim().0.try_into().unwrap_or(Coord::MAX)
    }

    pub fn total_tiles(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn bomb_count(&self) -> CellCount {
        self.bomb_count
    }

    pub fn safe_tile_count(&self) -> CellCount {
        self.total_tiles().saturating_sub(self.bomb_count)
    }

    /// Safe tiles not yet discovered.
    pub fn covered_safe_count(&self) -> CellCount {
        let covered = self
            .iter()
            .filter(|tile| !tile.is_bomb() && !tile.is_discovered())
            .count();
        covered.try_into().unwrap_or(CellCount::MAX)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords {
                x: coords.0,
                y: coords.1,
            })
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<&Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    /// All tiles, x-major then y-minor.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, (self.size(), self.size()))
    }

    /// The up to eight in-bounds tiles around `coords`.
    pub fn neighbors(&self, coords: Coord2) -> SmallVec<[&Tile; 8]> {
        self.iter_neighbors(coords).map(|pos| &self[pos]).collect()
    }

    pub fn nearby_bomb_count(&self, coords: Coord2) -> u8 {
        // at most eight neighbours
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_bomb())
            .count() as u8
    }

    /// Undiscovered safe tiles without bomb neighbours, in scan order.
    pub fn safe_zero_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.iter().filter(|tile| {
            !tile.is_discovered() && !tile.is_bomb() && self.nearby_bomb_count(tile.coords()) == 0
        })
    }
}

impl Index<Coord2> for Grid {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.tiles[coords.to_nd_index()]
    }
}
