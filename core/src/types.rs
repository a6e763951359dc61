use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Ordinal position of a tile on the board, `0..tile_count`.
pub type TileId = usize;

/// Count type used for moves and matched pairs.
pub type Count = u32;

/// Supported board sides. Only even sides exist since the board must split into pairs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GridSize {
    Four,
    Six,
    Eight,
}

impl GridSize {
    pub const ALL: [Self; 3] = [Self::Four, Self::Six, Self::Eight];

    pub const fn side(self) -> u8 {
        use GridSize::*;
        match self {
            Four => 4,
            Six => 6,
            Eight => 8,
        }
    }

    pub const fn tile_count(self) -> usize {
        let side = self.side() as usize;
        side * side
    }

    pub const fn pair_count(self) -> usize {
        self.tile_count() / 2
    }

    pub const fn label(self) -> &'static str {
        use GridSize::*;
        match self {
            Four => "Easy",
            Six => "Medium",
            Eight => "Hard",
        }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::Four
    }
}

impl TryFrom<u8> for GridSize {
    type Error = GameError;

    fn try_from(side: u8) -> Result<Self> {
        match side {
            4 => Ok(Self::Four),
            6 => Ok(Self::Six),
            8 => Ok(Self::Eight),
            other => Err(GameError::UnsupportedGridSize(other)),
        }
    }
}

impl From<GridSize> for u8 {
    fn from(size: GridSize) -> Self {
        size.side()
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.side();
        write!(f, "{side}x{side}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_split_into_pairs() {
        for size in GridSize::ALL {
            assert_eq!(size.tile_count() % 2, 0);
            assert_eq!(size.pair_count() * 2, size.tile_count());
        }
        assert_eq!(GridSize::Eight.pair_count(), 32);
    }

    #[test]
    fn odd_or_unknown_sides_are_rejected() {
        assert_eq!(GridSize::try_from(6), Ok(GridSize::Six));
        assert_eq!(GridSize::try_from(5), Err(GameError::UnsupportedGridSize(5)));
        assert!(GridSize::try_from(10).unwrap_err().is_configuration());
    }

    #[test]
    fn display_matches_storage_format() {
        assert_eq!(GridSize::Six.to_string(), "6x6");
        assert_eq!(serde_json::to_string(&GridSize::Eight).unwrap(), "8");
        assert!(serde_json::from_str::<GridSize>("3").is_err());
    }
}
