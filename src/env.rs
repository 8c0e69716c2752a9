use crate::commands::memory::ConfigurationError;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://memoria.db";

type EnvError = Box<dyn std::error::Error + Send + Sync>;
type EnvResult<T> = Result<T, EnvError>;

/// Gets the database URL from environment
pub fn database_url() -> EnvResult<Option<String>> {
    optional_var("DATABASE_URL")
}

/// Difficulty label for the first board (`easy` or `hard`)
pub fn difficulty() -> EnvResult<Option<String>> {
    optional_var("MEMORIA_DIFFICULTY")
}

/// How long a mismatched pair stays face up, in milliseconds
pub fn mismatch_delay() -> EnvResult<Option<Duration>> {
    duration_var("MEMORIA_MISMATCH_DELAY_MS", true)
}

/// How often the clock is refreshed, in milliseconds
pub fn tick_interval() -> EnvResult<Option<Duration>> {
    duration_var("MEMORIA_TICK_MS", false)
}

fn optional_var(key: &str) -> EnvResult<Option<String>> {
    match dotenvy::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(e) => Err(Box::new(e) as EnvError),
    }
}

fn duration_var(key: &'static str, allow_zero: bool) -> EnvResult<Option<Duration>> {
    optional_var(key)?
        .map(|raw| parse_millis(key, &raw, allow_zero).map_err(|err| Box::new(err) as EnvError))
        .transpose()
}

fn parse_millis(
    key: &'static str,
    raw: &str,
    allow_zero: bool,
) -> Result<Duration, ConfigurationError> {
    let invalid = |reason| ConfigurationError::InvalidValue {
        key,
        value: raw.to_string(),
        reason,
    };

    let millis: u64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("expected a whole number of milliseconds"))?;

    if millis == 0 && !allow_zero {
        return Err(invalid("must be greater than zero"));
    }

    Ok(Duration::from_millis(millis))
}
