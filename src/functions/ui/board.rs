use crate::commands::memory::{
    Counters, Phase, Snapshot, Tile, View, Visibility, WinSummary,
};
use crate::constants::icon;
use crate::functions::format::{count, format_elapsed, pretty_message};
use std::fmt::Display;
use std::io::{self, Write};
use std::time::Duration;

/// Mirrors the engine's board and prints it to a terminal on demand.
///
/// Clock updates are only stored: they arrive ten times a second and would
/// bury the player's input. Everything else marks the board for the next
/// [`TerminalView::flush`].
pub struct TerminalView<W: Write> {
    out: W,
    columns: usize,
    tiles: Vec<Tile>,
    counters: Counters,
    elapsed: Duration,
    win: Option<WinSummary>,
    dirty: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            columns: 1,
            tiles: Vec::new(),
            counters: Counters::default(),
            elapsed: Duration::ZERO,
            win: None,
            dirty: false,
        }
    }

    pub fn message(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.out, "{line}")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        if self.dirty {
            self.dirty = false;
            for line in self.board_lines() {
                writeln!(self.out, "{line}")?;
            }
            writeln!(self.out, "{}", self.counters_line())?;

            if let Some(summary) = self.win.take() {
                writeln!(self.out, "{}", win_line(&summary))?;
            }
        }

        self.out.flush()
    }

    pub fn board_lines(&self) -> Vec<String> {
        grid_lines(
            self.columns,
            self.tiles
                .iter()
                .map(|tile| (tile.visibility, tile.visible_face())),
        )
    }

    fn counters_line(&self) -> String {
        pretty_message(
            icon::TIMER,
            format!(
                "{} • {}/{} pairs • {}",
                count(u64::from(self.counters.moves), "move"),
                self.counters.matches,
                self.counters.total_pairs,
                format_elapsed(self.elapsed)
            ),
        )
    }
}

impl<W: Write> View for TerminalView<W> {
    fn render_board(&mut self, columns: usize, tiles: &[Tile]) {
        self.columns = columns.max(1);
        self.tiles = tiles.to_vec();
        self.win = None;
        self.dirty = true;
    }

    fn render_tile(&mut self, index: usize, tile: &Tile) {
        if let Some(slot) = self.tiles.get_mut(index) {
            *slot = *tile;
            self.dirty = true;
        }
    }

    fn render_counters(&mut self, counters: Counters) {
        self.counters = counters;
        self.dirty = true;
    }

    fn render_time(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    fn render_win(&mut self, summary: &WinSummary) {
        self.win = Some(*summary);
        self.dirty = true;
    }
}

fn cell(visibility: Visibility, face: Option<&str>) -> String {
    match (visibility, face) {
        (Visibility::Revealed, Some(face)) => format!("[{face}]"),
        (Visibility::Matched, Some(face)) => format!("({face})"),
        _ => format!(" {} ", icon::HIDDEN),
    }
}

/// Lays tiles out in numbered rows, counting from 1.
pub fn grid_lines<'a>(
    columns: usize,
    tiles: impl IntoIterator<Item = (Visibility, Option<&'a str>)>,
) -> Vec<String> {
    let cells: Vec<String> = tiles
        .into_iter()
        .enumerate()
        .map(|(index, (visibility, face))| {
            format!("{:>3} {}", index + 1, cell(visibility, face))
        })
        .collect();

    cells.chunks(columns.max(1)).map(|row| row.join(" ")).collect()
}

fn win_line(summary: &WinSummary) -> String {
    let mut line = format!(
        "You cleared the {} board in {} and {}!",
        summary.difficulty,
        count(u64::from(summary.moves), "move"),
        format_elapsed(summary.elapsed)
    );

    if summary.new_best {
        match summary.previous_best {
            Some(previous) => line.push_str(&format!(" New best, down from {previous}.")),
            None => line.push_str(" First record for this difficulty."),
        }
    } else if let Some(previous) = summary.previous_best {
        line.push_str(&format!(" Best is still {previous}."));
    }

    pretty_message(icon::TROPHY, line)
}

/// One-line summary of a session for the `status` command.
pub fn status_line(snapshot: &Snapshot) -> String {
    let phase = match snapshot.phase {
        Phase::Idle => "not started",
        Phase::Active => "running",
        Phase::Resolving => "turning tiles back",
        Phase::Won => "won",
    };
    let best = snapshot
        .best
        .map(|moves| count(u64::from(moves), "move"))
        .unwrap_or_else(|| "none".to_string());

    pretty_message(
        icon::HASTAG,
        format!(
            "{} ({phase}) • {} • {}/{} pairs • {} • best: {best}",
            snapshot.difficulty,
            count(u64::from(snapshot.moves), "move"),
            snapshot.matches,
            snapshot.total_pairs,
            format_elapsed(snapshot.elapsed)
        ),
    )
}

/// Board and status as the engine reports them, for the `board` command.
pub fn snapshot_lines(snapshot: &Snapshot) -> Vec<String> {
    let mut lines = grid_lines(
        snapshot.columns,
        snapshot.tiles.iter().map(|tile| (tile.visibility, tile.face)),
    );
    lines.push(status_line(snapshot));
    lines
}
