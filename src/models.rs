// ABOUTME: Lenient typed views over WHOOP cycle, recovery, sleep, and workout JSON records
// ABOUTME: Every leaf is optional; absent, null, or mistyped values decode to None
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! WHOOP records are partially populated: scores appear only once WHOOP has
//! processed the underlying data, and any individual metric may be `null`.
//! These types decode a record without ever failing. A field that is absent,
//! `null`, or of an unexpected type becomes `None` and is simply omitted by
//! the formatters, never rendered as zero.
//!
//! Numeric leaves are kept as [`serde_json::Number`] so integers and floats
//! render exactly as the API sent them (`60` stays `60`, `12.5` stays `12.5`).

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Decode `T`, mapping any mismatch to `None` instead of an error
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Processing state of a record's score
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreState {
    /// Score is available
    Scored,
    /// WHOOP has not finished processing
    PendingScore,
    /// WHOOP could not score the record
    Unscorable,
    /// Any value this server does not know about
    #[serde(other)]
    Unknown,
}

/// A WHOOP record kind that can be decoded from raw JSON
pub trait Record: DeserializeOwned + Default {
    /// Decode a record; anything that is not an object yields an empty record
    fn from_json(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }
}

/// Score lines are only rendered for records in the scored state
fn scored<'a, S>(state: Option<&ScoreState>, score: Option<&'a S>) -> Option<&'a S> {
    match state {
        Some(ScoreState::Scored) => score,
        _ => None,
    }
}

/// Physiological cycle (one day of strain, bounded by sleeps)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cycle {
    /// Cycle start (ISO-8601)
    #[serde(default, deserialize_with = "lenient")]
    pub start: Option<String>,
    /// Cycle end; absent or null while the cycle is ongoing
    #[serde(default, deserialize_with = "lenient")]
    pub end: Option<String>,
    /// Score processing state
    #[serde(default, deserialize_with = "lenient")]
    pub score_state: Option<ScoreState>,
    /// Cycle score
    #[serde(default, deserialize_with = "lenient")]
    pub score: Option<CycleScore>,
}

/// Cycle metrics
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CycleScore {
    /// Day strain (0-21)
    #[serde(default, deserialize_with = "lenient")]
    pub strain: Option<Number>,
    /// Energy expenditure in kilojoules
    #[serde(default, deserialize_with = "lenient")]
    pub kilojoule: Option<Number>,
    /// Average heart rate in bpm
    #[serde(default, deserialize_with = "lenient")]
    pub average_heart_rate: Option<Number>,
    /// Maximum heart rate in bpm
    #[serde(default, deserialize_with = "lenient")]
    pub max_heart_rate: Option<Number>,
}

impl Record for Cycle {}

impl Cycle {
    /// Score, if the cycle has been scored
    #[must_use]
    pub fn scored(&self) -> Option<&CycleScore> {
        scored(self.score_state.as_ref(), self.score.as_ref())
    }
}

/// Morning recovery assessment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Recovery {
    /// When WHOOP created the recovery
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<String>,
    /// Score processing state
    #[serde(default, deserialize_with = "lenient")]
    pub score_state: Option<ScoreState>,
    /// Recovery score
    #[serde(default, deserialize_with = "lenient")]
    pub score: Option<RecoveryScore>,
}

/// Recovery metrics
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecoveryScore {
    /// Recovery percentage (0-100)
    #[serde(default, deserialize_with = "lenient")]
    pub recovery_score: Option<Number>,
    /// Resting heart rate in bpm
    #[serde(default, deserialize_with = "lenient")]
    pub resting_heart_rate: Option<Number>,
    /// Heart rate variability (RMSSD) in milliseconds
    #[serde(default, deserialize_with = "lenient")]
    pub hrv_rmssd_milli: Option<Number>,
    /// Blood oxygen percentage
    #[serde(default, deserialize_with = "lenient")]
    pub spo2_percentage: Option<Number>,
    /// Skin temperature in Celsius
    #[serde(default, deserialize_with = "lenient")]
    pub skin_temp_celsius: Option<Number>,
}

impl Record for Recovery {}

impl Recovery {
    /// Score, if the recovery has been scored
    #[must_use]
    pub fn scored(&self) -> Option<&RecoveryScore> {
        scored(self.score_state.as_ref(), self.score.as_ref())
    }
}

/// Sleep or nap activity
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sleep {
    /// Sleep start (ISO-8601)
    #[serde(default, deserialize_with = "lenient")]
    pub start: Option<String>,
    /// Sleep end (ISO-8601)
    #[serde(default, deserialize_with = "lenient")]
    pub end: Option<String>,
    /// Whether this was a nap
    #[serde(default, deserialize_with = "lenient")]
    pub nap: Option<bool>,
    /// Score processing state
    #[serde(default, deserialize_with = "lenient")]
    pub score_state: Option<ScoreState>,
    /// Sleep score
    #[serde(default, deserialize_with = "lenient")]
    pub score: Option<SleepScore>,
}

/// Sleep metrics
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SleepScore {
    /// Sleep performance percentage
    #[serde(default, deserialize_with = "lenient")]
    pub sleep_performance_percentage: Option<Number>,
    /// Sleep efficiency percentage
    #[serde(default, deserialize_with = "lenient")]
    pub sleep_efficiency_percentage: Option<Number>,
    /// Breaths per minute
    #[serde(default, deserialize_with = "lenient")]
    pub respiratory_rate: Option<Number>,
    /// Time spent in each sleep stage
    #[serde(default, deserialize_with = "lenient")]
    pub stage_summary: Option<StageSummary>,
}

/// Sleep stage durations in milliseconds
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StageSummary {
    /// Total time in bed
    #[serde(default, deserialize_with = "lenient")]
    pub total_in_bed_time_milli: Option<Number>,
    /// Time awake
    #[serde(default, deserialize_with = "lenient")]
    pub total_awake_time_milli: Option<Number>,
    /// Light sleep
    #[serde(default, deserialize_with = "lenient")]
    pub total_light_sleep_time_milli: Option<Number>,
    /// Slow-wave (deep) sleep
    #[serde(default, deserialize_with = "lenient")]
    pub total_slow_wave_sleep_time_milli: Option<Number>,
    /// REM sleep
    #[serde(default, deserialize_with = "lenient")]
    pub total_rem_sleep_time_milli: Option<Number>,
}

impl Record for Sleep {}

impl Sleep {
    /// Score, if the sleep has been scored
    #[must_use]
    pub fn scored(&self) -> Option<&SleepScore> {
        scored(self.score_state.as_ref(), self.score.as_ref())
    }

    /// Whether the record is a nap; missing means a regular sleep
    #[must_use]
    pub fn is_nap(&self) -> bool {
        self.nap.unwrap_or(false)
    }
}

/// Sport identifier as sent by the API, either a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SportId {
    /// Numeric id such as `44`
    Number(Number),
    /// Textual id such as `"44"`
    Text(String),
}

impl fmt::Display for SportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Workout activity
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Workout {
    /// Sport display name
    #[serde(default, deserialize_with = "lenient")]
    pub sport_name: Option<String>,
    /// Sport identifier, used when no name is present
    #[serde(default, deserialize_with = "lenient")]
    pub sport_id: Option<SportId>,
    /// Workout start (ISO-8601)
    #[serde(default, deserialize_with = "lenient")]
    pub start: Option<String>,
    /// Score processing state
    #[serde(default, deserialize_with = "lenient")]
    pub score_state: Option<ScoreState>,
    /// Workout score
    #[serde(default, deserialize_with = "lenient")]
    pub score: Option<WorkoutScore>,
}

/// Workout metrics
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutScore {
    /// Workout strain (0-21)
    #[serde(default, deserialize_with = "lenient")]
    pub strain: Option<Number>,
    /// Average heart rate in bpm
    #[serde(default, deserialize_with = "lenient")]
    pub average_heart_rate: Option<Number>,
    /// Maximum heart rate in bpm
    #[serde(default, deserialize_with = "lenient")]
    pub max_heart_rate: Option<Number>,
    /// Energy expenditure in kilojoules
    #[serde(default, deserialize_with = "lenient")]
    pub kilojoule: Option<Number>,
    /// Distance in meters
    #[serde(default, deserialize_with = "lenient")]
    pub distance_meter: Option<Number>,
    /// Altitude gained in meters
    #[serde(default, deserialize_with = "lenient")]
    pub altitude_gain_meter: Option<Number>,
    /// Net altitude change in meters
    #[serde(default, deserialize_with = "lenient")]
    pub altitude_change_meter: Option<Number>,
}

impl Record for Workout {}

impl Workout {
    /// Score, if the workout has been scored
    #[must_use]
    pub fn scored(&self) -> Option<&WorkoutScore> {
        scored(self.score_state.as_ref(), self.score.as_ref())
    }
}

/// Shape of an API response body, determined by structural probing.
///
/// List endpoints return `{ "records": [...], "next_token": ... }`; single
/// resource endpoints return the record itself. Nothing tags the two apart
/// except the presence of a `records` key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseEnvelope<'a> {
    /// Paginated list
    List {
        /// Raw records; empty when `records` is null or not an array
        records: &'a [Value],
        /// A `next_token` key is present (even if null)
        has_more: bool,
    },
    /// Bare record
    Single(&'a Value),
}

impl<'a> ResponseEnvelope<'a> {
    /// Classify a response body
    #[must_use]
    pub fn classify(data: &'a Value) -> Self {
        let Some(object) = data.as_object() else {
            return Self::Single(data);
        };

        match object.get("records") {
            Some(records) => Self::List {
                records: records.as_array().map_or(&[], Vec::as_slice),
                has_more: object.contains_key("next_token"),
            },
            None => Self::Single(data),
        }
    }
}
