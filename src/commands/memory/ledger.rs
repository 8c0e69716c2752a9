use super::difficulty::Difficulty;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Settings key the ledger is persisted under.
pub const STORAGE_KEY: &str = "memoryBestScores";

/// Fewest moves ever needed to clear a board, per difficulty label.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestScoreLedger {
    scores: BTreeMap<String, u32>,
}

impl BestScoreLedger {
    /// Loads a persisted ledger. Missing or unreadable payloads give an empty one.
    pub fn from_json(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        serde_json::from_str(raw).unwrap_or_else(|err| {
            warn!("Ignoring unreadable best-score ledger ({err}); starting empty");
            Self::default()
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn read(&self, difficulty: Difficulty) -> Option<u32> {
        self.scores.get(difficulty.label()).copied()
    }

    /// Stores `moves` when it beats the current best (or there is none).
    pub fn record(&mut self, difficulty: Difficulty, moves: u32) -> bool {
        match self.read(difficulty) {
            Some(best) if best <= moves => false,
            _ => {
                self.scores.insert(difficulty.label().to_string(), moves);
                true
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn higher_score_does_not_replace_best() {
        let mut ledger = BestScoreLedger::default();
        assert!(ledger.record(Difficulty::Easy, 10));
        assert!(!ledger.record(Difficulty::Easy, 14));
        assert_eq!(ledger.read(Difficulty::Easy), Some(10));
    }

    #[test]
    fn lower_score_replaces_best() {
        let mut ledger = BestScoreLedger::default();
        ledger.record(Difficulty::Easy, 10);
        assert!(ledger.record(Difficulty::Easy, 8));
        assert_eq!(ledger.read(Difficulty::Easy), Some(8));
    }

    #[test]
    fn equal_score_is_not_a_new_best() {
        let mut ledger = BestScoreLedger::default();
        ledger.record(Difficulty::Hard, 20);
        assert!(!ledger.record(Difficulty::Hard, 20));
    }

    #[test]
    fn difficulties_are_tracked_separately() {
        let mut ledger = BestScoreLedger::default();
        ledger.record(Difficulty::Easy, 9);
        assert_eq!(ledger.read(Difficulty::Hard), None);
        assert!(ledger.record(Difficulty::Hard, 30));
        assert_eq!(ledger.read(Difficulty::Easy), Some(9));
        assert_eq!(ledger.read(Difficulty::Hard), Some(30));
    }

    #[test]
    fn json_layout_is_a_flat_map() {
        let mut ledger = BestScoreLedger::default();
        ledger.record(Difficulty::Easy, 11);
        ledger.record(Difficulty::Hard, 27);
        let json = ledger.to_json().unwrap();
        assert_eq!(json, r#"{"easy":11,"hard":27}"#);
        assert_eq!(BestScoreLedger::from_json(Some(&json)), ledger);
    }

    #[test]
    fn corrupt_or_missing_payload_is_an_empty_ledger() {
        for raw in [None, Some(""), Some("not json"), Some("[1,2]"), Some(r#"{"easy":-3}"#)] {
            assert!(BestScoreLedger::from_json(raw).is_empty(), "{raw:?}");
        }
    }
}
