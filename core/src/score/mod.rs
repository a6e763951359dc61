use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::*;
pub use recorder::*;
pub use store::*;

mod recorder;
mod store;

/// Date shown for scores saved before dates were recorded.
pub const UNKNOWN_DATE: &str = "Unknown";

/// Player name used when none was entered.
pub const ANONYMOUS: &str = "Anonymous";

/// Best score for one grid size and theme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub moves: Count,
    pub date: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub player_name: String,
}

fn unknown_date() -> String {
    UNKNOWN_DATE.to_string()
}

fn anonymous() -> String {
    ANONYMOUS.to_string()
}

/// Non-negative integer that fits a move count.
fn as_count(value: &Value) -> Option<Count> {
    value.as_u64().and_then(|moves| Count::try_from(moves).ok())
}

impl ScoreRecord {
    pub fn new(moves: Count, at: DateTime<Utc>, player_name: impl Into<String>) -> Self {
        Self {
            moves,
            date: at.date_naive().to_string(),
            timestamp: at.timestamp_millis(),
            player_name: player_name.into(),
        }
    }

    /// Record synthesized from a bare move count.
    pub fn legacy(moves: Count) -> Self {
        Self {
            moves,
            date: unknown_date(),
            timestamp: 0,
            player_name: anonymous(),
        }
    }

    /// Reads either the structured JSON form or a bare integer. Anything else is `None`.
    ///
    /// An object only needs a usable `moves`; missing, null or mistyped metadata falls back to
    /// the legacy defaults instead of discarding the record.
    pub fn parse(raw: &str) -> Option<Self> {
        let value = match serde_json::from_str::<Value>(raw.trim()) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("unreadable score value {:?}: {}", raw, err);
                return None;
            }
        };

        match value {
            Value::Number(_) => as_count(&value).map(Self::legacy),
            Value::Object(fields) => {
                let moves = fields.get("moves").and_then(as_count)?;
                let date = fields
                    .get("date")
                    .and_then(Value::as_str)
                    .map_or_else(unknown_date, str::to_string);
                let timestamp = fields
                    .get("timestamp")
                    .and_then(|value| value.as_i64().or_else(|| value.as_f64().map(|t| t as i64)))
                    .unwrap_or(0);
                let player_name = fields
                    .get("playerName")
                    .and_then(Value::as_str)
                    .map_or_else(anonymous, str::to_string);
                Some(Self {
                    moves,
                    date,
                    timestamp,
                    player_name,
                })
            }
            other => {
                log::debug!("score value is neither a record nor a count: {}", other);
                None
            }
        }
    }

    pub fn to_json(&self) -> core::result::Result<String, StoreError> {
        serde_json::to_string(self).map_err(|err| StoreError::Encode(err.to_string()))
    }

    /// Whether `moves` strictly beats this record.
    pub fn is_beaten_by(&self, moves: Count) -> bool {
        moves < self.moves
    }
}
