pub mod config;
pub mod consume;
pub mod log;
pub mod snapshot;

use chrono::{Local, NaiveDate};
use wellspring_core::storage::{Config, SqliteAdapter};
use wellspring_core::{FixedClock, ProgressionEngine, SystemClock};

/// Open the engine over the on-disk store, optionally pinned to a date.
pub fn open_engine(
    as_of: Option<NaiveDate>,
) -> Result<ProgressionEngine, Box<dyn std::error::Error>> {
    let adapter = Box::new(SqliteAdapter::open()?);
    let config = Config::load()?;
    let engine = match as_of {
        Some(date) => ProgressionEngine::new(adapter, Box::new(FixedClock::new(date)), config),
        None => ProgressionEngine::new(adapter, Box::new(SystemClock), config),
    };
    Ok(engine)
}

/// The calendar date commands default to when no `--date` is given.
pub fn effective_today(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Local::now().date_naive())
}
