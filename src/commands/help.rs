use crate::commands::memory::{BestScoreLedger, Difficulty};
use crate::constants::icon;
use crate::functions::format::pretty_message;

pub struct CommandInfo {
    pub usage: &'static str,
    pub description: &'static str,
}

impl CommandInfo {
    const fn new(usage: &'static str, description: &'static str) -> Self {
        Self { usage, description }
    }
}

pub const COMMANDS: [CommandInfo; 9] = [
    CommandInfo::new("start", "start the clock on the dealt board"),
    CommandInfo::new("restart", "deal a new board and start right away"),
    CommandInfo::new("difficulty <easy|hard>", "deal a board of another size"),
    CommandInfo::new("flip <n> | <n>", "turn tile n face up"),
    CommandInfo::new("board", "show the board again"),
    CommandInfo::new("status", "moves, pairs, time and best score"),
    CommandInfo::new("best", "best scores per difficulty"),
    CommandInfo::new("help", "this list"),
    CommandInfo::new("quit", "leave the game"),
];

pub fn help_lines() -> Vec<String> {
    let width = COMMANDS
        .iter()
        .map(|info| info.usage.len())
        .max()
        .unwrap_or_default();

    let mut lines = vec![pretty_message(icon::GEAR, "Commands")];
    lines.extend(
        COMMANDS
            .iter()
            .map(|info| format!("  {:<width$}  {}", info.usage, info.description)),
    );
    lines.push(format!(
        "  memoria v{} (rust {}+)",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_RUST_VERSION")
    ));
    lines
}

pub fn best_lines(ledger: &BestScoreLedger) -> Vec<String> {
    if ledger.is_empty() {
        return vec![pretty_message(
            icon::TROPHY,
            "No best scores yet. Clear a board to set one!",
        )];
    }

    Difficulty::ALL
        .into_iter()
        .map(|difficulty| match ledger.read(difficulty) {
            Some(moves) => pretty_message(icon::TROPHY, format!("{difficulty}: {moves} moves")),
            None => pretty_message(icon::TROPHY, format!("{difficulty}: no record yet")),
        })
        .collect()
}
