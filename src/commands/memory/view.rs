use super::difficulty::Difficulty;
use super::tile::Tile;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Counters {
    pub moves: u32,
    pub matches: usize,
    pub total_pairs: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WinSummary {
    pub difficulty: Difficulty,
    pub moves: u32,
    pub elapsed: Duration,
    pub previous_best: Option<u32>,
    pub new_best: bool,
}

/// Everything the engine needs from whatever draws the game.
pub trait View {
    /// A fresh board replaced the previous one.
    fn render_board(&mut self, columns: usize, tiles: &[Tile]);
    fn render_tile(&mut self, index: usize, tile: &Tile);
    fn render_counters(&mut self, counters: Counters);
    fn render_time(&mut self, elapsed: Duration);
    fn render_win(&mut self, summary: &WinSummary);
}
