use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Presentation side of the engine.
///
/// Notifications arrive synchronously, once per affected tile, in the order the tiles change. The
/// terminal hooks fire after every tile notification for that transition has been delivered.
pub trait GameHost {
    fn on_tile_changed(&mut self, coords: Coord2, nearby_bombs: u8, visual: TileVisual);

    fn on_win(&mut self) {}

    fn on_lose(&mut self) {}
}

impl<H: GameHost + ?Sized> GameHost for &mut H {
    fn on_tile_changed(&mut self, coords: Coord2, nearby_bombs: u8, visual: TileVisual) {
        (**self).on_tile_changed(coords, nearby_bombs, visual)
    }

    fn on_win(&mut self) {
        (**self).on_win()
    }

    fn on_lose(&mut self) {
        (**self).on_lose()
    }
}

/// Host that ignores every notification.
impl GameHost for () {
    fn on_tile_changed(&mut self, _coords: Coord2, _nearby_bombs: u8, _visual: TileVisual) {}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileEvent {
    pub coords: Coord2,
    pub nearby_bombs: u8,
    pub visual: TileVisual,
}

/// Host that records everything it is told, e.g. to replay a round into a renderer later.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<TileEvent>,
    pub wins: u32,
    pub losses: u32,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the recorded tile events, leaving the log empty.
    pub fn take(&mut self) -> Vec<TileEvent> {
        core::mem::take(&mut self.events)
    }

    pub fn with_visual(&self, visual: TileVisual) -> impl Iterator<Item = &TileEvent> {
        self.events.iter().filter(move |event| event.visual == visual)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl GameHost for EventLog {
    fn on_tile_changed(&mut self, coords: Coord2, nearby_bombs: u8, visual: TileVisual) {
        self.events.push(TileEvent {
            coords,
            nearby_bombs,
            visual,
        });
    }

    fn on_win(&mut self) {
        self.wins += 1;
    }

    fn on_lose(&mut self) {
        self.losses += 1;
    }
}
