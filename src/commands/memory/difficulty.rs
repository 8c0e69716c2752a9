use super::error::ConfigurationError;
use log::warn;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 2] = [Difficulty::Easy, Difficulty::Hard];

    pub const fn total_cards(self) -> usize {
        match self {
            Difficulty::Easy => 12,
            Difficulty::Hard => 24,
        }
    }

    pub const fn total_pairs(self) -> usize {
        self.total_cards() / 2
    }

    /// Number of grid columns the board is laid out in.
    pub const fn columns(self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Hard => 6,
        }
    }

    /// Key used for this difficulty in the best-score ledger.
    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        }
    }

    /// Parses `label`, falling back to [`Difficulty::Easy`] when it is not recognized.
    pub fn from_label_or_default(label: &str) -> Self {
        label.parse().unwrap_or_else(|err: ConfigurationError| {
            let fallback = Self::default();
            warn!("{err}; falling back to {fallback}");
            fallback
        })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.label() == needle)
            .ok_or_else(|| ConfigurationError::UnknownDifficulty(value.trim().to_string()))
    }
}
