use super::clock::Clock;
use super::difficulty::Difficulty;
use super::game_state::{IgnoreReason, MemoryGameState, Phase, SelectionResult};
use super::ledger::BestScoreLedger;
use super::scheduler::{Scheduler, Task, TimerHandle};
use super::tile::{Tile, Visibility};
use super::view::{Counters, View, WinSummary};
use log::{debug, info, trace};
use rand::{SeedableRng, rngs::StdRng};
use std::time::Duration;
use tokio::time::Instant;

const MISMATCH_DELAY: Duration = Duration::from_millis(1_000);
const TICK_INTERVAL: Duration = Duration::from_millis(100);
/// A tick rescheduled at `now` would be due again within the same `fire_due`.
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    /// How long a mismatched pair stays face up.
    pub mismatch_delay: Duration,
    /// How often the clock is republished while a session runs.
    pub tick_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mismatch_delay: MISMATCH_DELAY,
            tick_interval: TICK_INTERVAL,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RevealOutcome {
    Ignored(IgnoreReason),
    FirstReveal,
    Matched { win: Option<WinSummary> },
    Mismatch { pair: [usize; 2] },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TileSnapshot {
    pub visibility: Visibility,
    pub face: Option<&'static str>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    pub difficulty: Difficulty,
    pub phase: Phase,
    pub columns: usize,
    pub tiles: Vec<TileSnapshot>,
    pub moves: u32,
    pub matches: usize,
    pub total_pairs: usize,
    pub elapsed: Duration,
    pub best: Option<u32>,
}

/// Owns one memory game session at a time plus the best-score ledger.
///
/// Every mutation goes through the methods below and runs to completion on the
/// caller's thread. Deferred work (turning a mismatched pair back over, clock
/// updates) sits in an internal queue the host drains with
/// [`MemoryEngine::fire_due`]; starting a new session drops whatever the old
/// one left queued.
pub struct MemoryEngine<V: View> {
    view: V,
    config: EngineConfig,
    rng: StdRng,
    state: MemoryGameState,
    clock: Clock,
    scheduler: Scheduler,
    revert_timer: Option<TimerHandle>,
    tick_timer: Option<TimerHandle>,
    ledger: BestScoreLedger,
}

impl<V: View> MemoryEngine<V> {
    pub fn new(view: V, ledger: BestScoreLedger, config: EngineConfig) -> Self {
        Self::with_rng(view, ledger, config, StdRng::from_os_rng())
    }

    pub fn with_rng(
        view: V,
        ledger: BestScoreLedger,
        config: EngineConfig,
        mut rng: StdRng,
    ) -> Self {
        let config = EngineConfig {
            tick_interval: config.tick_interval.max(MIN_TICK_INTERVAL),
            ..config
        };
        let state = MemoryGameState::new(Difficulty::default(), &mut rng);
        Self {
            view,
            config,
            rng,
            state,
            clock: Clock::default(),
            scheduler: Scheduler::default(),
            revert_timer: None,
            tick_timer: None,
            ledger,
        }
    }

    /// Deals a new board and leaves the session idle until [`MemoryEngine::start`].
    pub fn initialize(&mut self, difficulty: Difficulty) -> &[Tile] {
        let cancelled = self.scheduler.cancel_all();
        self.revert_timer = None;
        self.tick_timer = None;
        self.state = MemoryGameState::new(difficulty, &mut self.rng);
        self.clock.reset();
        debug!("Dealt a {difficulty} board ({cancelled} stale timers dropped)");

        self.view.render_board(difficulty.columns(), &self.state.tiles);
        self.view.render_counters(self.counters());
        self.view.render_time(Duration::ZERO);
        &self.state.tiles
    }

    /// Starts the clock. Returns `false` unless the session was idle.
    pub fn start(&mut self) -> bool {
        if self.state.phase != Phase::Idle {
            return false;
        }

        let now = Instant::now();
        self.state.phase = Phase::Active;
        self.clock.start(now);
        let deadline = now + self.config.tick_interval;
        self.tick_timer = Some(self.scheduler.schedule(deadline, Task::Tick));
        debug!("Started a {} session", self.state.difficulty);
        true
    }

    pub fn restart(&mut self) {
        self.initialize(self.state.difficulty);
        self.start();
    }

    pub fn reveal_tile(&mut self, index: usize) -> RevealOutcome {
        if let Err(reason) = self.state.check_selectable(index) {
            trace!("Ignoring reveal of tile {index}: {reason:?}");
            return RevealOutcome::Ignored(reason);
        }

        match self.state.select(index) {
            SelectionResult::FirstReveal => {
                self.render_tiles(&[index]);
                RevealOutcome::FirstReveal
            }
            SelectionResult::Matched { pair, finished } => {
                self.render_tiles(&pair);
                self.view.render_counters(self.counters());
                let win = finished.then(|| self.finish());
                RevealOutcome::Matched { win }
            }
            SelectionResult::Mismatch { pair } => {
                self.render_tiles(&[index]);
                self.view.render_counters(self.counters());
                self.state.phase = Phase::Resolving;
                let deadline = Instant::now() + self.config.mismatch_delay;
                self.revert_timer = Some(
                    self.scheduler
                        .schedule(deadline, Task::Revert { pair }),
                );
                RevealOutcome::Mismatch { pair }
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            difficulty: self.state.difficulty,
            phase: self.state.phase,
            columns: self.state.difficulty.columns(),
            tiles: self
                .state
                .tiles
                .iter()
                .map(|tile| TileSnapshot {
                    visibility: tile.visibility,
                    face: tile.visible_face(),
                })
                .collect(),
            moves: self.state.moves,
            matches: self.state.matches,
            total_pairs: self.state.total_pairs(),
            elapsed: self.clock.elapsed(Instant::now()),
            best: self.ledger.read(self.state.difficulty),
        }
    }

    /// When the host should call [`MemoryEngine::fire_due`] next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Runs every deferred task whose deadline has passed. Returns how many ran.
    pub fn fire_due(&mut self) -> usize {
        let now = Instant::now();
        let mut fired = 0;

        while let Some((handle, deadline, task)) = self.scheduler.pop_due(now) {
            fired += 1;
            match task {
                Task::Revert { pair } => self.revert(handle, pair),
                Task::Tick => self.tick(handle, deadline, now),
            }
        }

        fired
    }

    pub fn ledger(&self) -> &BestScoreLedger {
        &self.ledger
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state.difficulty
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn counters(&self) -> Counters {
        Counters {
            moves: self.state.moves,
            matches: self.state.matches,
            total_pairs: self.state.total_pairs(),
        }
    }

    fn render_tiles(&mut self, indices: &[usize]) {
        for &index in indices {
            self.view.render_tile(index, &self.state.tiles[index]);
        }
    }

    fn finish(&mut self) -> WinSummary {
        let now = Instant::now();
        self.state.phase = Phase::Won;
        self.clock.stop(now);
        if let Some(handle) = self.tick_timer.take() {
            self.scheduler.cancel(handle);
        }

        let difficulty = self.state.difficulty;
        let moves = self.state.moves;
        let previous_best = self.ledger.read(difficulty);
        let new_best = self.ledger.record(difficulty, moves);
        let summary = WinSummary {
            difficulty,
            moves,
            elapsed: self.clock.elapsed(now),
            previous_best,
            new_best,
        };

        info!(
            "Cleared a {difficulty} board in {moves} moves ({:.1}s){}",
            summary.elapsed.as_secs_f64(),
            if new_best { ", new best" } else { "" }
        );
        self.view.render_time(summary.elapsed);
        self.view.render_win(&summary);
        summary
    }

    fn revert(&mut self, handle: TimerHandle, pair: [usize; 2]) {
        if self.revert_timer != Some(handle) {
            return;
        }

        self.revert_timer = None;
        self.state.conceal(pair);
        self.render_tiles(&pair);
        if self.state.phase == Phase::Resolving {
            self.state.phase = Phase::Active;
        }
    }

    fn tick(&mut self, handle: TimerHandle, deadline: Instant, now: Instant) {
        if self.tick_timer != Some(handle) {
            return;
        }

        if !self.clock.is_running() {
            self.tick_timer = None;
            return;
        }

        self.view.render_time(self.clock.elapsed(now));

        // Skip samples missed while the host was busy instead of bursting them.
        let mut next = deadline + self.config.tick_interval;
        if next <= now {
            next = now + self.config.tick_interval;
        }
        self.tick_timer = Some(self.scheduler.schedule(next, Task::Tick));
    }
}
