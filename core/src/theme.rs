use core::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

use crate::*;

const ANIMALS: &[&str] = &[
    "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮", "🐷", "🐸", "🐵", "🐔",
    "🐧", "🐦", "🐤", "🦆", "🦅", "🦉", "🐺", "🐗", "🐴", "🦄", "🐝", "🐛", "🦋", "🐌", "🐞", "🐢",
];

const EMOJIS: &[&str] = &[
    "😀", "😂", "😍", "🤔", "😎", "🤩", "😴", "🤮", "🤯", "😱", "😡", "😢", "😻", "🎉", "🎈", "🎁",
    "😇", "🥳", "😜", "🤗", "🤠", "🥶", "🥵", "😬", "🙃", "😏", "🤓", "🧐", "😤", "🤡", "👻", "🤖",
];

const FLAGS: &[&str] = &[
    "🇺🇸", "🇬🇧", "🇯🇵", "🇫🇷", "🇩🇪", "🇮🇳", "🇧🇷", "🇦🇺", "🇨🇦", "🇲🇽", "🇮🇹", "🇪🇸", "🇰🇷", "🇳🇱", "🇸🇪", "🇨🇭",
    "🇦🇷", "🇦🇹", "🇧🇪", "🇨🇳", "🇩🇰", "🇫🇮", "🇬🇷", "🇮🇪", "🇳🇴", "🇳🇿", "🇵🇱", "🇵🇹", "🇿🇦", "🇹🇷", "🇺🇦", "🇪🇬",
];

/// Built-in symbol sets. Pool order is curated: boards always use a prefix of it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Animals,
    Emojis,
    Flags,
}

impl Theme {
    pub const ALL: [Self; 3] = [Self::Animals, Self::Emojis, Self::Flags];

    /// Name used in storage keys.
    pub const fn key(self) -> &'static str {
        use Theme::*;
        match self {
            Animals => "animals",
            Emojis => "emojis",
            Flags => "flags",
        }
    }

    pub const fn label(self) -> &'static str {
        use Theme::*;
        match self {
            Animals => "Animals",
            Emojis => "Emojis",
            Flags => "Flags",
        }
    }

    pub const fn symbols(self) -> &'static [&'static str] {
        use Theme::*;
        match self {
            Animals => ANIMALS,
            Emojis => EMOJIS,
            Flags => FLAGS,
        }
    }

    pub fn icon(self) -> &'static str {
        self.symbols()[0]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Animals
    }
}

impl FromStr for Theme {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.key() == s)
            .ok_or(GameError::UnknownTheme)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
