use thiserror::Error;

use crate::TileId;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Unsupported grid size {0}, expected 4, 6 or 8")]
    UnsupportedGridSize(u8),
    #[error("Symbol pool has {available} symbols but the board needs {required}")]
    InsufficientSymbols { required: usize, available: usize },
    #[error("Unknown theme")]
    UnknownTheme,
    #[error("Invalid tile id {0}")]
    InvalidTileId(TileId),
    #[error("Board layout must hold every symbol exactly twice")]
    InvalidLayout,
}

impl GameError {
    /// Errors caused by an impossible grid size/theme combination rather than a bad call.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedGridSize(_) | Self::InsufficientSymbols { .. } | Self::UnknownTheme
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Could not write {key}: {reason}")]
    WriteFailed { key: String, reason: String },
    #[error("Could not encode score record: {0}")]
    Encode(String),
    #[error("Player name must not be empty")]
    EmptyPlayerName,
}
