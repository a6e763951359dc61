use serde::{Deserialize, Serialize};

use crate::TileId;

/// One card on the board. A matched tile always stays revealed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    symbol: String,
    revealed: bool,
    matched: bool,
}

impl Tile {
    pub(crate) fn new(id: TileId, symbol: String) -> Self {
        Self {
            id,
            symbol,
            revealed: false,
            matched: false,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// Face shown to the player, `None` while the tile is face down.
    pub fn face(&self) -> Option<&str> {
        self.revealed.then_some(self.symbol.as_str())
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn hide(&mut self) {
        if !self.matched {
            self.revealed = false;
        }
    }

    pub(crate) fn mark_matched(&mut self) {
        self.revealed = true;
        self.matched = true;
    }
}
