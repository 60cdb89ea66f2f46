use chrono::NaiveDate;
use clap::Subcommand;
use wellspring_core::{MetricId, MetricPayload, MoodLevel};

#[derive(Subcommand)]
pub enum LogAction {
    /// Record cups of water
    Hydration {
        #[arg(long)]
        cups: u32,
        /// Calendar date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Record hours slept, with optional quality 1-5
    Sleep {
        #[arg(long)]
        hours: f64,
        #[arg(long)]
        quality: Option<u8>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Record body weight in kilograms
    Weight {
        #[arg(long)]
        kg: f64,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Record mood (awful|bad|okay|good|great)
    Mood {
        mood: MoodLevel,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Record journal word count
    Journal {
        #[arg(long)]
        words: u32,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Record whether the day's exercise was completed
    Exercise {
        #[arg(long)]
        completed: bool,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: LogAction, as_of: Option<NaiveDate>) -> Result<(), Box<dyn std::error::Error>> {
    let fallback = super::effective_today(as_of);
    let (metric, date, payload) = match action {
        LogAction::Hydration { cups, date } => (
            MetricId::Hydration,
            date.unwrap_or(fallback),
            MetricPayload::Hydration { cups },
        ),
        LogAction::Sleep {
            hours,
            quality,
            date,
        } => (
            MetricId::Sleep,
            date.unwrap_or(fallback),
            MetricPayload::Sleep { hours, quality },
        ),
        LogAction::Weight { kg, date } => (
            MetricId::Weight,
            date.unwrap_or(fallback),
            MetricPayload::Weight { kg },
        ),
        LogAction::Mood { mood, date } => (
            MetricId::Mood,
            date.unwrap_or(fallback),
            MetricPayload::Mood { mood },
        ),
        LogAction::Journal { words, date } => (
            MetricId::Journal,
            date.unwrap_or(fallback),
            MetricPayload::Journal { word_count: words },
        ),
        LogAction::Exercise { completed, date } => (
            MetricId::Exercise,
            date.unwrap_or(fallback),
            MetricPayload::Exercise { completed },
        ),
    };

    let engine = super::open_engine(as_of)?;
    let snapshot = engine.write(metric, date, payload)?;
    let streak = snapshot.streak(metric);
    println!(
        "Logged {metric} for {date}. Streak: {} (best {})",
        streak.current, streak.max
    );
    Ok(())
}
