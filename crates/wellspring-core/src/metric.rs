//! Tracked metrics and their per-day payloads.
//!
//! Each metric has a tagged payload variant with an explicit validation
//! predicate enforced at write time. Payload shapes are the persistence
//! schema: unknown fields are ignored on read and missing optional fields
//! default rather than error, so older blobs remain readable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier for a tracked metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    Hydration,
    Sleep,
    Weight,
    Mood,
    Journal,
    Exercise,
}

impl MetricId {
    /// All tracked metrics, in snapshot order.
    pub const ALL: [MetricId; 6] = [
        MetricId::Hydration,
        MetricId::Sleep,
        MetricId::Weight,
        MetricId::Mood,
        MetricId::Journal,
        MetricId::Exercise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricId::Hydration => "hydration",
            MetricId::Sleep => "sleep",
            MetricId::Weight => "weight",
            MetricId::Mood => "mood",
            MetricId::Journal => "journal",
            MetricId::Exercise => "exercise",
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MetricId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hydration" => Ok(MetricId::Hydration),
            "sleep" => Ok(MetricId::Sleep),
            "weight" => Ok(MetricId::Weight),
            "mood" => Ok(MetricId::Mood),
            "journal" => Ok(MetricId::Journal),
            "exercise" => Ok(MetricId::Exercise),
            _ => Err(format!("Unknown metric: {}", s)),
        }
    }
}

/// Five-level mood scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLevel {
    Awful,
    Bad,
    Okay,
    Good,
    Great,
}

impl FromStr for MoodLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "awful" => Ok(MoodLevel::Awful),
            "bad" => Ok(MoodLevel::Bad),
            "okay" => Ok(MoodLevel::Okay),
            "good" => Ok(MoodLevel::Good),
            "great" => Ok(MoodLevel::Great),
            _ => Err(format!("Unknown mood: {}", s)),
        }
    }
}

/// Metric-specific value for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MetricPayload {
    Hydration {
        cups: u32,
    },
    Sleep {
        hours: f64,
        /// Subjective quality 1-5; older entries may not carry one.
        #[serde(default)]
        quality: Option<u8>,
    },
    Weight {
        kg: f64,
    },
    Mood {
        mood: MoodLevel,
    },
    Journal {
        word_count: u32,
    },
    Exercise {
        completed: bool,
    },
}

impl MetricPayload {
    /// The metric this payload belongs to.
    pub fn metric(&self) -> MetricId {
        match self {
            MetricPayload::Hydration { .. } => MetricId::Hydration,
            MetricPayload::Sleep { .. } => MetricId::Sleep,
            MetricPayload::Weight { .. } => MetricId::Weight,
            MetricPayload::Mood { .. } => MetricId::Mood,
            MetricPayload::Journal { .. } => MetricId::Journal,
            MetricPayload::Exercise { .. } => MetricId::Exercise,
        }
    }

    /// Check the payload against its metric-specific domain bounds.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            MetricPayload::Hydration { cups } => {
                if *cups > 50 {
                    return Err(ValidationError::InvalidValue {
                        field: "cups",
                        message: format!("{} exceeds the daily maximum of 50", cups),
                    });
                }
            }
            MetricPayload::Sleep { hours, quality } => {
                if !hours.is_finite() || *hours < 0.0 || *hours > 24.0 {
                    return Err(ValidationError::InvalidValue {
                        field: "hours",
                        message: format!("{} is outside 0-24", hours),
                    });
                }
                if let Some(q) = quality {
                    if !(1..=5).contains(q) {
                        return Err(ValidationError::InvalidValue {
                            field: "quality",
                            message: format!("{} is outside 1-5", q),
                        });
                    }
                }
            }
            MetricPayload::Weight { kg } => {
                if !kg.is_finite() || *kg <= 0.0 || *kg >= 500.0 {
                    return Err(ValidationError::InvalidValue {
                        field: "kg",
                        message: format!("{} is outside the accepted range", kg),
                    });
                }
            }
            MetricPayload::Journal { word_count } => {
                if *word_count > 100_000 {
                    return Err(ValidationError::InvalidValue {
                        field: "word_count",
                        message: format!("{} exceeds the maximum of 100000", word_count),
                    });
                }
            }
            MetricPayload::Mood { .. } | MetricPayload::Exercise { .. } => {}
        }
        Ok(())
    }

    /// Whether this entry counts as a completed session for unlock counters.
    pub fn counts_as_completed_session(&self) -> bool {
        matches!(self, MetricPayload::Exercise { completed: true })
    }
}
