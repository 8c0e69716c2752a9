use crate::commands::memory::{self, Difficulty, EngineConfig};
use crate::{database, env};
use sqlx::SqlitePool;
use tokio::io::BufReader;

pub struct Data {
    pub database: SqlitePool,
    pub config: GameConfig,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub engine: EngineConfig,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Reads the game settings from the environment, keeping defaults for anything unset.
pub fn load_config() -> Result<GameConfig, Error> {
    let mut config = GameConfig::default();

    if let Some(label) = env::difficulty()? {
        config.difficulty = Difficulty::from_label_or_default(&label);
    }
    if let Some(delay) = env::mismatch_delay()? {
        config.engine.mismatch_delay = delay;
    }
    if let Some(interval) = env::tick_interval()? {
        config.engine.tick_interval = interval;
    }

    Ok(config)
}

/// Connects the storage layer and bundles it with the game settings.
pub async fn build_data(config: GameConfig) -> Result<Data, Error> {
    let database_url = env::database_url()?
        .unwrap_or_else(|| env::DEFAULT_DATABASE_URL.to_string());
    let database = database::connect(&database_url)
        .await
        .map_err(|err| -> Error { Box::new(err) })?;

    log::debug!("Connected to {database_url}");

    Ok(Data { database, config })
}

/// Plays on stdin/stdout until the player leaves.
pub async fn run_client(data: Data) -> Result<(), Error> {
    let input = BufReader::new(tokio::io::stdin());
    memory::run_game(&data, input, std::io::stdout()).await?;
    data.database.close().await;
    Ok(())
}
