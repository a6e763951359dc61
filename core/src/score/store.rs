use std::collections::BTreeMap;

use super::*;

/// Key under which the player's display name is kept.
pub const PLAYER_NAME_KEY: &str = "playerName";

pub fn score_key(grid: GridSize, theme: Theme) -> String {
    format!("best_score_{}_{}", grid, theme.key())
}

/// String key-value backend, e.g. the browser's local storage.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str) -> core::result::Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> core::result::Result<(), StoreError> {
        (**self).set_item(key, value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> core::result::Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub theme: Theme,
    pub grid: GridSize,
    pub record: Option<ScoreRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedEntry {
    /// 1-based position on the leaderboard.
    pub rank: usize,
    pub theme: Theme,
    pub grid: GridSize,
    pub record: ScoreRecord,
}

/// Only gateway to persisted scores and the player name.
#[derive(Clone, Debug, Default)]
pub struct ScoreStore<S> {
    backend: S,
}

impl<S: KeyValueStore> ScoreStore<S> {
    pub const fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    pub fn get(&self, grid: GridSize, theme: Theme) -> Option<ScoreRecord> {
        let key = score_key(grid, theme);
        let raw = self.backend.get_item(&key)?;
        let record = ScoreRecord::parse(&raw);
        if record.is_none() {
            log::warn!("ignoring malformed score under {}", key);
        }
        record
    }

    pub fn set(
        &mut self,
        grid: GridSize,
        theme: Theme,
        record: &ScoreRecord,
    ) -> core::result::Result<(), StoreError> {
        let value = record.to_json()?;
        self.backend.set_item(&score_key(grid, theme), &value)
    }

    /// Every theme/size combination in theme-major order, `None` where nothing was recorded.
    pub fn list_all(&self, themes: &[Theme], sizes: &[GridSize]) -> Vec<LeaderboardEntry> {
        themes
            .iter()
            .flat_map(|&theme| {
                sizes.iter().map(move |&grid| LeaderboardEntry {
                    theme,
                    grid,
                    record: self.get(grid, theme),
                })
            })
            .collect()
    }

    pub fn player_name(&self) -> Option<String> {
        let name = self.backend.get_item(PLAYER_NAME_KEY)?;
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    /// Stores the trimmed name and returns it.
    pub fn set_player_name(&mut self, name: &str) -> core::result::Result<String, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyPlayerName);
        }
        self.backend.set_item(PLAYER_NAME_KEY, name)?;
        log::debug!("player name set to {:?}", name);
        Ok(name.to_string())
    }
}

/// Recorded entries ordered by fewest moves, earlier scores first on ties.
pub fn ranked(entries: impl IntoIterator<Item = LeaderboardEntry>) -> Vec<RankedEntry> {
    let mut present: Vec<_> = entries
        .into_iter()
        .filter_map(|entry| Some((entry.theme, entry.grid, entry.record?)))
        .collect();
    present.sort_by_key(|(_, _, record)| (record.moves, record.timestamp));

    present
        .into_iter()
        .enumerate()
        .map(|(index, (theme, grid, record))| RankedEntry {
            rank: index + 1,
            theme,
            grid,
            record,
        })
        .collect()
}
