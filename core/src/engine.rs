use alloc::vec;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Playing
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Lost,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// The tile a hint picked and what revealing it did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hint {
    pub coords: Coord2,
    pub outcome: RevealOutcome,
}

/// Game engine: owns the grid and reports every visible change to its [`GameHost`].
///
/// Actions on a finished game are silently ignored until [`Minesweeper::reset`].
#[derive(Clone, Debug)]
pub struct Minesweeper<H, R = SmallRng> {
    config: GameConfig,
    grid: Grid,
    remaining_tiles: CellCount,
    state: GameState,
    host: H,
    rng: R,
}

impl<H: GameHost> Minesweeper<H> {
    /// Engine with a reproducible board sequence for `seed`.
    pub fn with_seed(config: GameConfig, seed: u64, host: H) -> Self {
        Self::new(config, host, SmallRng::seed_from_u64(seed))
    }
}

impl<H: GameHost, R: Rng> Minesweeper<H, R> {
    pub fn new(config: GameConfig, host: H, mut rng: R) -> Self {
        let grid = Grid::generate(config, &mut rng);
        Self::with_grid(config, grid, host, rng)
    }

    /// Plays a fixed layout. Later resets sample boards with the same size and bomb density.
    pub fn from_grid(grid: Grid, host: H, rng: R) -> Self {
        let bomb_chance = f64::from(grid.bomb_count()) * 100.0 / f64::from(grid.total_tiles());
        let config = GameConfig::new(grid.size(), bomb_chance);
        Self::with_grid(config, grid, host, rng)
    }

    fn with_grid(config: GameConfig, grid: Grid, host: H, rng: R) -> Self {
        Self {
            config,
            remaining_tiles: grid.covered_safe_count(),
            grid,
            state: GameState::Playing,
            host,
            rng,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord {
        self.grid.size()
    }

    pub fn bomb_chance(&self) -> f64 {
        self.config.bomb_chance
    }

    pub fn bomb_count(&self) -> CellCount {
        self.grid.bomb_count()
    }

    /// Safe tiles still covered.
    pub fn remaining_tiles(&self) -> CellCount {
        self.remaining_tiles
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tile(&self, coords: Coord2) -> Result<&Tile> {
        self.grid.get(coords)
    }

    pub fn nearby_bomb_count(&self, coords: Coord2) -> Result<u8> {
        let coords = self.grid.validate_coords(coords)?;
        Ok(self.grid.nearby_bomb_count(coords))
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Whether [`Minesweeper::hint`] currently has a tile to offer.
    pub fn can_hint(&self) -> bool {
        !self.state.is_finished() && self.grid.safe_zero_tiles().next().is_some()
    }

    /// Starts a new round on a freshly sampled board and redraws every tile as covered.
    pub fn reset(&mut self) {
        self.grid = Grid::generate(self.config, &mut self.rng);
        self.remaining_tiles = self.grid.safe_tile_count();
        self.state = GameState::Playing;
        log::debug!("New round, {} safe tiles", self.remaining_tiles);

        for tile in self.grid.iter() {
            let coords = tile.coords();
            self.host.on_tile_changed(
                coords,
                self.grid.nearby_bomb_count(coords),
                TileVisual::Default,
            );
        }
    }

    /// Reveals the tile at `coords`, flooding outward from tiles without bomb neighbours.
    pub fn trigger(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if self.state.is_finished() || !self.grid[coords].is_revealable() {
            return Ok(RevealOutcome::NoChange);
        }

        if self.grid[coords].is_bomb() {
            self.lose(coords);
            return Ok(RevealOutcome::Lost);
        }

        self.grid[coords].discover();
        let nearby_bombs = self.grid.nearby_bomb_count(coords);
        self.remaining_tiles -= 1;

        // the triggered tile is drawn last, once it is known whether the round was won
        if self.remaining_tiles == 0 || (nearby_bombs == 0 && self.uncover_adjacent_zeros(coords))
        {
            self.win(coords, nearby_bombs);
            Ok(RevealOutcome::Won)
        } else {
            self.host
                .on_tile_changed(coords, nearby_bombs, TileVisual::Uncovered);
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Depth-first reveal around `origin`. Returns `true` once no safe tile is left covered.
    fn uncover_adjacent_zeros(&mut self, origin: Coord2) -> bool {
        let mut stack = vec![self.grid.iter_neighbors(origin)];

        while let Some(frame) = stack.last_mut() {
            let Some(coords) = frame.next() else {
                stack.pop();
                continue;
            };

            if !self.grid[coords].is_revealable() {
                continue;
            }

            let nearby_bombs = self.grid.nearby_bomb_count(coords);
            self.grid[coords].discover();
            self.host
                .on_tile_changed(coords, nearby_bombs, TileVisual::Uncovered);
            self.remaining_tiles -= 1;
            log::trace!("Flood uncovered {coords:?} ({nearby_bombs})");

            if self.remaining_tiles == 0 {
                return true;
            }
            if nearby_bombs == 0 {
                stack.push(self.grid.iter_neighbors(coords));
            }
        }

        false
    }

    /// Toggles the flag on a covered tile.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if self.state.is_finished() || self.grid[coords].is_discovered() {
            return Ok(MarkOutcome::NoChange);
        }

        let flagged = !self.grid[coords].is_flagged();
        self.grid[coords].set_flagged(flagged);

        let nearby_bombs = self.grid.nearby_bomb_count(coords);
        Ok(if flagged {
            self.host
                .on_tile_changed(coords, nearby_bombs, TileVisual::Flagged);
            MarkOutcome::Flagged
        } else {
            self.host
                .on_tile_changed(coords, nearby_bombs, TileVisual::Default);
            MarkOutcome::Unflagged
        })
    }

    /// Reveals a random covered safe tile without bomb neighbours, clearing its flag if needed.
    ///
    /// Returns `Ok(None)` when the round is already over and [`GameError::NoSafeTile`] when no
    /// such tile is left.
    pub fn hint(&mut self) -> Result<Option<Hint>> {
        if self.state.is_finished() {
            return Ok(None);
        }

        let candidates: Vec<Coord2> = self.grid.safe_zero_tiles().map(Tile::coords).collect();
        let &coords = candidates
            .choose(&mut self.rng)
            .ok_or(GameError::NoSafeTile)?;
        log::debug!(
            "Hint picked {coords:?} out of {} candidates",
            candidates.len()
        );

        self.grid[coords].set_flagged(false);
        let outcome = self.trigger(coords)?;
        Ok(Some(Hint { coords, outcome }))
    }

    fn lose(&mut self, coords: Coord2) {
        self.state = GameState::Lost;
        log::debug!("Bomb at {coords:?} triggered, round lost");

        self.host.on_tile_changed(
            coords,
            self.grid.nearby_bomb_count(coords),
            TileVisual::Lose,
        );
        for tile in self
            .grid
            .iter()
            .filter(|tile| tile.is_bomb() && tile.coords() != coords)
        {
            let bomb = tile.coords();
            self.host
                .on_tile_changed(bomb, self.grid.nearby_bomb_count(bomb), TileVisual::Bomb);
        }
        self.host.on_lose();
    }

    fn win(&mut self, coords: Coord2, nearby_bombs: u8) {
        self.state = GameState::Won;
        log::debug!("Last safe tile uncovered from {coords:?}, round won");

        self.host
            .on_tile_changed(coords, nearby_bombs, TileVisual::Win);
        for tile in self.grid.iter().filter(|tile| tile.is_bomb()) {
            let bomb = tile.coords();
            self.host
                .on_tile_changed(bomb, self.grid.nearby_bomb_count(bomb), TileVisual::Flagged);
        }
        self.host.on_win();
    }
}
