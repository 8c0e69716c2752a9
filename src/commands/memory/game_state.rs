use super::difficulty::Difficulty;
use super::tile::{Tile, Visibility};
use rand::{Rng, seq::SliceRandom};

/// Faces handed out in order: a board with `n` pairs uses the first `n`.
pub const PALETTE: [&str; 12] = [
    "🚀", "🧠", "💻", "🎨", "⚡", "🌈", "🍕", "🐱", "🔥", "💎", "🎮", "🎸",
];
pub const TURN_SIZE: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Idle,
    Active,
    /// Two mismatched tiles are face up, waiting to be turned back.
    Resolving,
    Won,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IgnoreReason {
    NotActive,
    OutOfRange,
    TurnInProgress,
    AlreadyRevealed,
    AlreadyMatched,
}

pub struct MemoryGameState {
    pub difficulty: Difficulty,
    pub tiles: Vec<Tile>,
    pub pending: Vec<usize>,
    pub moves: u32,
    pub matches: usize,
    pub phase: Phase,
}

impl MemoryGameState {
    pub fn new<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        Self {
            difficulty,
            tiles: generate_tiles(difficulty, rng),
            pending: Vec::with_capacity(TURN_SIZE),
            moves: 0,
            matches: 0,
            phase: Phase::Idle,
        }
    }

    pub fn total_pairs(&self) -> usize {
        self.tiles.len() / 2
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Active | Phase::Resolving)
    }

    pub fn check_selectable(&self, index: usize) -> Result<(), IgnoreReason> {
        if !self.is_running() {
            return Err(IgnoreReason::NotActive);
        }

        let tile = self.tiles.get(index).ok_or(IgnoreReason::OutOfRange)?;

        if self.phase == Phase::Resolving || self.pending.len() >= TURN_SIZE {
            return Err(IgnoreReason::TurnInProgress);
        }

        match tile.visibility {
            Visibility::Hidden => Ok(()),
            Visibility::Revealed => Err(IgnoreReason::AlreadyRevealed),
            Visibility::Matched => Err(IgnoreReason::AlreadyMatched),
        }
    }

    /// Turns `index` face up and resolves the turn once two tiles are up.
    ///
    /// Callers must check [`MemoryGameState::check_selectable`] first.
    pub fn select(&mut self, index: usize) -> SelectionResult {
        self.tiles[index].visibility = Visibility::Revealed;
        self.pending.push(index);

        let [first, second] = match self.pending.as_slice() {
            &[first, second] => [first, second],
            _ => return SelectionResult::FirstReveal,
        };

        self.moves += 1;

        if self.tiles[first].face == self.tiles[second].face {
            self.tiles[first].visibility = Visibility::Matched;
            self.tiles[second].visibility = Visibility::Matched;
            self.pending.clear();
            self.matches += 1;
            SelectionResult::Matched {
                pair: [first, second],
                finished: self.matches == self.total_pairs(),
            }
        } else {
            SelectionResult::Mismatch {
                pair: [first, second],
            }
        }
    }

    /// Turns a mismatched pair back over and empties the turn buffer.
    pub fn conceal(&mut self, pair: [usize; 2]) {
        for index in pair {
            if let Some(tile) = self.tiles.get_mut(index)
                && tile.visibility == Visibility::Revealed
            {
                tile.visibility = Visibility::Hidden;
            }
        }
        self.pending.clear();
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SelectionResult {
    FirstReveal,
    Matched { pair: [usize; 2], finished: bool },
    Mismatch { pair: [usize; 2] },
}

pub fn generate_tiles<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Vec<Tile> {
    let mut tiles: Vec<Tile> = PALETTE
        .into_iter()
        .take(difficulty.total_pairs())
        .flat_map(|face| [Tile::new(face), Tile::new(face)])
        .collect();

    tiles.shuffle(rng);
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashMap;

    fn positions_of(state: &MemoryGameState, face: &str) -> Vec<usize> {
        state
            .tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.face == face)
            .map(|(index, _)| index)
            .collect()
    }

    fn running_state(seed: u64) -> MemoryGameState {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = MemoryGameState::new(Difficulty::Easy, &mut rng);
        state.phase = Phase::Active;
        state
    }

    #[test]
    fn every_face_appears_exactly_twice() {
        let mut rng = StdRng::seed_from_u64(7);
        for difficulty in Difficulty::ALL {
            let tiles = generate_tiles(difficulty, &mut rng);
            assert_eq!(tiles.len(), difficulty.total_cards());

            let mut counts: HashMap<&str, usize> = HashMap::new();
            for tile in &tiles {
                *counts.entry(tile.face).or_default() += 1;
                assert_eq!(tile.visibility, Visibility::Hidden);
            }

            assert_eq!(counts.len(), difficulty.total_pairs());
            assert!(counts.values().all(|&count| count == 2));
            for face in &PALETTE[..difficulty.total_pairs()] {
                assert_eq!(counts.get(face), Some(&2));
            }
        }
    }

    #[test]
    fn shuffle_spreads_faces_uniformly_over_positions() {
        const TRIALS: usize = 6_000;
        let difficulty = Difficulty::Easy;
        let cards = difficulty.total_cards();
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts = vec![HashMap::<&str, usize>::new(); cards];

        for _ in 0..TRIALS {
            for (position, tile) in generate_tiles(difficulty, &mut rng).iter().enumerate() {
                *counts[position].entry(tile.face).or_default() += 1;
            }
        }

        // Each face holds 2 of `cards` slots, so it lands on a given slot with p = 2 / cards.
        let expected = (TRIALS * 2 / cards) as f64;
        for per_position in &counts {
            assert_eq!(per_position.len(), difficulty.total_pairs());
            for &count in per_position.values() {
                let deviation = (count as f64 - expected).abs() / expected;
                assert!(deviation < 0.15, "count {count} too far from {expected}");
            }
        }
    }

    #[test]
    fn matching_pair_is_resolved_immediately() {
        let mut state = running_state(1);
        let pair = positions_of(&state, PALETTE[0]);

        assert_eq!(state.select(pair[0]), SelectionResult::FirstReveal);
        assert_eq!(
            state.select(pair[1]),
            SelectionResult::Matched {
                pair: [pair[0], pair[1]],
                finished: false
            }
        );
        assert_eq!(state.moves, 1);
        assert_eq!(state.matches, 1);
        assert!(state.pending.is_empty());
        assert_eq!(state.tiles[pair[0]].visibility, Visibility::Matched);
        assert_eq!(state.tiles[pair[1]].visibility, Visibility::Matched);
    }

    #[test]
    fn mismatch_keeps_tiles_up_until_concealed() {
        let mut state = running_state(2);
        let first = positions_of(&state, PALETTE[0])[0];
        let second = positions_of(&state, PALETTE[1])[0];

        state.select(first);
        assert_eq!(
            state.select(second),
            SelectionResult::Mismatch {
                pair: [first, second]
            }
        );
        assert_eq!(state.pending.len(), TURN_SIZE);
        assert_eq!(state.tiles[first].visibility, Visibility::Revealed);

        state.conceal([first, second]);
        assert!(state.pending.is_empty());
        assert_eq!(state.tiles[first].visibility, Visibility::Hidden);
        assert_eq!(state.tiles[second].visibility, Visibility::Hidden);
        assert_eq!(state.moves, 1);
        assert_eq!(state.matches, 0);
    }

    #[test]
    fn selectable_checks() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = MemoryGameState::new(Difficulty::Easy, &mut rng);
        assert_eq!(state.check_selectable(0), Err(IgnoreReason::NotActive));

        state.phase = Phase::Active;
        assert_eq!(state.check_selectable(12), Err(IgnoreReason::OutOfRange));
        assert_eq!(state.check_selectable(0), Ok(()));

        state.select(0);
        assert_eq!(state.check_selectable(0), Err(IgnoreReason::AlreadyRevealed));

        let partner = positions_of(&state, state.tiles[0].face)[1];
        state.select(partner);
        assert_eq!(state.check_selectable(0), Err(IgnoreReason::AlreadyMatched));

        state.phase = Phase::Resolving;
        assert_eq!(state.check_selectable(1), Err(IgnoreReason::TurnInProgress));

        state.phase = Phase::Won;
        assert_eq!(state.check_selectable(1), Err(IgnoreReason::NotActive));
    }
}
