use core::ops::Index;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use clock::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use score::*;
pub use stopwatch::*;
pub use theme::*;
pub use tile::*;
pub use types::*;

mod clock;
mod engine;
mod error;
mod generator;
mod score;
mod stopwatch;
mod theme;
mod tile;
mod types;

/// Difficulty and theme of one game; also the key of its best score.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardConfig {
    pub grid: GridSize,
    pub theme: Theme,
}

impl BoardConfig {
    pub const fn new(grid: GridSize, theme: Theme) -> Self {
        Self { grid, theme }
    }

    pub const fn pair_count(&self) -> usize {
        self.grid.pair_count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    grid: GridSize,
    tiles: Vec<Tile>,
}

#[derive(Deserialize)]
struct BoardRepr {
    grid: GridSize,
    tiles: Vec<Tile>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    /// Same layout checks as [`Board::from_symbols`], plus sequential ids and matched tiles that
    /// come in revealed pairs.
    fn try_from(BoardRepr { grid, tiles }: BoardRepr) -> Result<Self> {
        Board::from_symbols(grid, tiles.iter().map(|tile| tile.symbol().to_string()))?;

        let ids_in_order = tiles.iter().enumerate().all(|(index, tile)| tile.id() == index);
        let matches_paired = tiles.iter().filter(|tile| tile.is_matched()).all(|tile| {
            tile.is_revealed()
                && tiles
                    .iter()
                    .filter(|other| other.symbol() == tile.symbol() && other.is_matched())
                    .count()
                    == 2
        });
        if !ids_in_order || !matches_paired {
            return Err(GameError::InvalidLayout);
        }

        Ok(Self { grid, tiles })
    }
}

impl Board {
    /// Lays out `symbols` in the given order. Every symbol must appear exactly twice and the
    /// layout must fill the grid.
    pub fn from_symbols<I, S>(grid: GridSize, symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        if symbols.len() != grid.tile_count() {
            return Err(GameError::InvalidLayout);
        }

        let mut occurrences: BTreeMap<&str, usize> = BTreeMap::new();
        for symbol in &symbols {
            *occurrences.entry(symbol.as_str()).or_default() += 1;
        }
        if occurrences.values().any(|&count| count != 2) {
            return Err(GameError::InvalidLayout);
        }

        let tiles = symbols
            .into_iter()
            .enumerate()
            .map(|(id, symbol)| Tile::new(id, symbol))
            .collect();
        Ok(Self { grid, tiles })
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Result<&Tile> {
        self.tiles.get(id).ok_or(GameError::InvalidTileId(id))
    }

    pub fn validate_id(&self, id: TileId) -> Result<TileId> {
        if id < self.tiles.len() {
            Ok(id)
        } else {
            Err(GameError::InvalidTileId(id))
        }
    }

    pub fn matched_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_matched()).count()
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> &mut Tile {
        &mut self.tiles[id]
    }
}

impl Index<TileId> for Board {
    type Output = Tile;

    fn index(&self, id: TileId) -> &Self::Output {
        &self.tiles[id]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Input was dropped: the engine is busy, finished, or the tile is not selectable.
    Ignored,
    Revealed,
    /// Second tile is up; hand the ticket to [`MatchEngine::resolve`] once the faces were shown.
    AwaitingResolution(ResolveTicket),
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    pub const fn ticket(self) -> Option<ResolveTicket> {
        match self {
            Self::AwaitingResolution(ticket) => Some(ticket),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The ticket belongs to a replaced session or nothing was pending.
    Stale,
    Mismatch,
    Matched,
    Completed,
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Stale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_accepts_pairs_in_any_order() {
        let board = Board::from_symbols(
            GridSize::Four,
            ["a", "b", "c", "d", "e", "f", "g", "h", "h", "g", "f", "e", "d", "c", "b", "a"],
        )
        .unwrap();

        assert_eq!(board.len(), 16);
        assert_eq!(board[15].symbol(), "a");
        assert_eq!(board[15].id(), 15);
        assert!(board.tiles().iter().all(|tile| !tile.is_revealed()));
    }

    #[test]
    fn layout_rejects_triples_and_short_boards() {
        let triple = ["a", "a", "a", "b", "c", "c", "d", "d", "e", "e", "f", "f", "g", "g", "h", "h"];
        assert_eq!(
            Board::from_symbols(GridSize::Four, triple),
            Err(GameError::InvalidLayout)
        );
        assert_eq!(
            Board::from_symbols(GridSize::Four, ["a", "a"]),
            Err(GameError::InvalidLayout)
        );
    }

    #[test]
    fn deserialized_boards_are_checked() {
        let board = Board::from_symbols(
            GridSize::Four,
            ["a", "a", "b", "b", "c", "c", "d", "d", "e", "e", "f", "f", "g", "g", "h", "h"],
        )
        .unwrap();
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(serde_json::from_value::<Board>(json.clone()).unwrap(), board);

        let mut wrong_grid = json.clone();
        wrong_grid["grid"] = 6.into();
        assert!(serde_json::from_value::<Board>(wrong_grid).is_err());

        let mut lone_match = json.clone();
        lone_match["tiles"][0]["matched"] = true.into();
        lone_match["tiles"][0]["revealed"] = true.into();
        assert!(serde_json::from_value::<Board>(lone_match).is_err());

        let mut swapped_id = json;
        swapped_id["tiles"][0]["id"] = 3.into();
        assert!(serde_json::from_value::<Board>(swapped_id).is_err());
    }

    #[test]
    fn out_of_range_ids_are_invalid_arguments() {
        let board = Board::from_symbols(
            GridSize::Four,
            ["a", "a", "b", "b", "c", "c", "d", "d", "e", "e", "f", "f", "g", "g", "h", "h"],
        )
        .unwrap();

        assert_eq!(board.validate_id(15), Ok(15));
        assert_eq!(board.validate_id(16), Err(GameError::InvalidTileId(16)));
        assert!(board.tile(99).is_err());
    }
}
