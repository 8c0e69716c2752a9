use crate::{
    Data, Error,
    commands::{Command, help},
    constants::icon,
    database,
    functions::{
        format::pretty_message,
        ui::board::{TerminalView, snapshot_lines, status_line},
    },
};
use log::{info, warn};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{Instant, sleep_until};

mod clock;
mod difficulty;
mod engine;
mod error;
mod game_state;
mod ledger;
mod scheduler;
mod tile;
mod view;

pub use difficulty::Difficulty;
pub use engine::{EngineConfig, MemoryEngine, RevealOutcome, Snapshot, TileSnapshot};
pub use error::ConfigurationError;
pub use game_state::{IgnoreReason, Phase};
pub use ledger::{BestScoreLedger, STORAGE_KEY};
pub use tile::{Tile, Visibility};
pub use view::{Counters, View, WinSummary};

/// Plays memory games over a line-based protocol until the input ends or the
/// player quits.
pub async fn run_game<R, W>(data: &Data, input: R, output: W) -> Result<(), Error>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let ledger = load_ledger(data).await?;
    let view = TerminalView::new(output);
    let mut engine = MemoryEngine::new(view, ledger, data.config.engine);
    engine.initialize(data.config.difficulty);
    play(data, &mut engine, input).await
}

async fn play<R, W>(
    data: &Data,
    engine: &mut MemoryEngine<TerminalView<W>>,
    mut input: R,
) -> Result<(), Error>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    engine.view_mut().message(pretty_message(
        icon::BELL,
        "Type `start` and flip two tiles at a time to find the pairs!",
    ))?;
    engine.view_mut().flush()?;

    // Kept across iterations: a read interrupted by a timer leaves its bytes here.
    let mut buffer = Vec::new();
    loop {
        let deadline = engine.next_deadline();
        tokio::select! {
            read = input.read_until(b'\n', &mut buffer) => {
                if read? == 0 && buffer.is_empty() {
                    break;
                }

                let line = String::from_utf8_lossy(&buffer).into_owned();
                buffer.clear();

                if line.trim().is_empty() {
                    continue;
                }

                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(err) => {
                        engine.view_mut().message(pretty_message(
                            icon::ERROR,
                            format!("{err}. Type `help` for the command list."),
                        ))?;
                        continue;
                    }
                };

                if command == Command::Quit {
                    break;
                }

                handle_command(data, engine, command).await?;
                engine.view_mut().flush()?;
            }
            _ = wait_for(deadline) => {
                engine.fire_due();
                engine.view_mut().flush()?;
            }
        }
    }

    engine
        .view_mut()
        .message(pretty_message(icon::BELL, "See you next time!"))?;
    Ok(())
}

async fn handle_command<W: Write>(
    data: &Data,
    engine: &mut MemoryEngine<TerminalView<W>>,
    command: Command,
) -> Result<(), Error> {
    match command {
        Command::Start => {
            if engine.start() {
                engine
                    .view_mut()
                    .message(pretty_message(icon::TIMER, "Clock is running. Good luck!"))?;
            } else {
                let reply = match engine.phase() {
                    Phase::Won => "You already cleared this board. Use `restart` for a new one.",
                    _ => "This board was already started. Use `restart` for a new one.",
                };
                engine
                    .view_mut()
                    .message(pretty_message(icon::ERROR, reply))?;
            }
        }
        Command::Restart => {
            engine.restart();
            let difficulty = engine.difficulty();
            engine.view_mut().message(pretty_message(
                icon::TIMER,
                format!("New {difficulty} board dealt, clock is running."),
            ))?;
        }
        Command::Difficulty(label) => {
            let difficulty = match label.parse::<Difficulty>() {
                Ok(difficulty) => difficulty,
                Err(err) => {
                    let fallback = Difficulty::default();
                    warn!("{err}; falling back to {fallback}");
                    engine.view_mut().message(pretty_message(
                        icon::ERROR,
                        format!("{err}, using {fallback}."),
                    ))?;
                    fallback
                }
            };
            engine.initialize(difficulty);
            engine.view_mut().message(pretty_message(
                icon::GEAR,
                format!("New {difficulty} board dealt. Type `start` when ready."),
            ))?;
        }
        Command::Reveal(index) => match engine.reveal_tile(index) {
            RevealOutcome::Ignored(reason) => {
                engine
                    .view_mut()
                    .message(pretty_message(icon::ERROR, ignore_message(reason)))?;
            }
            RevealOutcome::FirstReveal => {}
            RevealOutcome::Matched { win } => {
                engine
                    .view_mut()
                    .message(pretty_message(icon::CHECK, "You found a pair!"))?;
                if let Some(summary) = win
                    && summary.new_best
                {
                    save_ledger(data, engine.ledger()).await;
                }
            }
            RevealOutcome::Mismatch { .. } => {
                engine
                    .view_mut()
                    .message(pretty_message(icon::ERROR, "Not a pair, hold on..."))?;
            }
        },
        Command::Board => {
            for line in snapshot_lines(&engine.snapshot()) {
                engine.view_mut().message(line)?;
            }
        }
        Command::Status => {
            let line = status_line(&engine.snapshot());
            engine.view_mut().message(line)?;
        }
        Command::Best => {
            let lines = help::best_lines(engine.ledger());
            for line in lines {
                engine.view_mut().message(line)?;
            }
        }
        Command::Help => {
            for line in help::help_lines() {
                engine.view_mut().message(line)?;
            }
        }
        Command::Quit => {}
    }

    Ok(())
}

fn ignore_message(reason: IgnoreReason) -> &'static str {
    match reason {
        IgnoreReason::NotActive => "The game is not running. Type `start` or `restart`.",
        IgnoreReason::OutOfRange => "There is no tile with that number.",
        IgnoreReason::TurnInProgress => "Hold on while the tiles are turned back.",
        IgnoreReason::AlreadyRevealed => "That tile is already face up.",
        IgnoreReason::AlreadyMatched => "That tile was already matched. Pick another one.",
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

async fn load_ledger(data: &Data) -> Result<BestScoreLedger, Error> {
    let stored = database::find_setting(&data.database, STORAGE_KEY).await?;
    Ok(BestScoreLedger::from_json(
        stored.as_ref().map(|setting| setting.value.as_str()),
    ))
}

async fn save_ledger(data: &Data, ledger: &BestScoreLedger) {
    let payload = match ledger.to_json() {
        Ok(payload) => payload,
        Err(err) => {
            warn!("Could not serialize best scores: {err}");
            return;
        }
    };

    match database::upsert_setting(&data.database, STORAGE_KEY, &payload).await {
        Ok(setting) => info!("Saved {} at {}", setting.key, setting.updated_at),
        Err(err) => warn!("Could not save best scores: {err}"),
    }
}
