// ABOUTME: Human-readable text rendering for WHOOP cycle, recovery, sleep, and workout records
// ABOUTME: Pure functions over raw JSON with a dispatcher for list and single-record envelopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Record Formatting
//!
//! Each record kind renders as a header line followed by indented metric
//! lines. Metric lines appear only for scored records, and each one only when
//! its value is present. Output strings are a compatibility surface: label
//! text, units, field order, and numeric precision are fixed.
//!
//! ```text
//! Workout: Running
//!   Time: 2024-01-01T07:00:00.000Z
//!   Strain: 12.5
//!   Distance: 1.50 km
//! ```

use std::fmt::Display;

use serde::Serialize;
use serde_json::{Number, Value};

use crate::constants::formatting;
use crate::errors::AppResult;
use crate::models::{Cycle, Record, Recovery, ResponseEnvelope, Sleep, Workout};

const MILLIS_PER_MINUTE: f64 = 60_000.0;
const METERS_PER_KILOMETER: f64 = 1_000.0;

/// Ordered output lines for one record
struct RecordLines(Vec<String>);

impl RecordLines {
    fn header(line: String) -> Self {
        Self(vec![line])
    }

    fn push(&mut self, line: String) {
        self.0.push(line);
    }

    /// `  {label}: {value}{unit}` when the value is present
    fn metric(&mut self, label: &str, value: Option<impl Display>, unit: &str) {
        if let Some(value) = value {
            self.0.push(format!("  {label}: {value}{unit}"));
        }
    }

    fn finish(self) -> String {
        self.0.join("\n")
    }
}

/// Value as sent by the API
fn raw(value: Option<&Number>) -> Option<String> {
    value.map(ToString::to_string)
}

/// `value / divisor` with a fixed number of decimals
fn scaled(value: Option<&Number>, divisor: f64, decimals: usize) -> Option<String> {
    value
        .and_then(Number::as_f64)
        .map(|v| format!("{:.decimals$}", v / divisor))
}

fn minutes(millis: Option<&Number>) -> Option<String> {
    scaled(millis, MILLIS_PER_MINUTE, 0)
}

/// Format a workout record
#[must_use]
pub fn format_workout(workout: &Workout) -> String {
    let sport = workout.sport_name.clone().unwrap_or_else(|| {
        let id = workout
            .sport_id
            .as_ref()
            .map_or_else(|| "Unknown".to_owned(), ToString::to_string);
        format!("Sport ID {id}")
    });

    let mut lines = RecordLines::header(format!("Workout: {sport}"));
    if let Some(start) = workout.start.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("  Time: {start}"));
    }

    if let Some(score) = workout.scored() {
        lines.metric("Strain", raw(score.strain.as_ref()), "");
        lines.metric("Avg Heart Rate", raw(score.average_heart_rate.as_ref()), " bpm");
        lines.metric("Max Heart Rate", raw(score.max_heart_rate.as_ref()), " bpm");
        lines.metric("Energy", raw(score.kilojoule.as_ref()), " kJ");
        lines.metric(
            "Distance",
            scaled(score.distance_meter.as_ref(), METERS_PER_KILOMETER, 2),
            " km",
        );
        lines.metric("Altitude Gain", raw(score.altitude_gain_meter.as_ref()), " m");
        lines.metric(
            "Altitude Change",
            raw(score.altitude_change_meter.as_ref()),
            " m",
        );
    }

    lines.finish()
}

/// Format a sleep or nap record
#[must_use]
pub fn format_sleep(sleep: &Sleep) -> String {
    let label = if sleep.is_nap() { "Nap" } else { "Sleep" };
    let mut lines = RecordLines::header(format!(
        "{label}: {} to {}",
        sleep.start.as_deref().unwrap_or_default(),
        sleep.end.as_deref().unwrap_or_default()
    ));

    if let Some(score) = sleep.scored() {
        lines.metric(
            "Performance",
            raw(score.sleep_performance_percentage.as_ref()),
            "%",
        );
        lines.metric(
            "Efficiency",
            raw(score.sleep_efficiency_percentage.as_ref()),
            "%",
        );
        lines.metric(
            "Respiratory Rate",
            raw(score.respiratory_rate.as_ref()),
            " breaths/min",
        );

        if let Some(stages) = &score.stage_summary {
            lines.metric(
                "Total Time in Bed",
                minutes(stages.total_in_bed_time_milli.as_ref()),
                " minutes",
            );
            lines.metric(
                "Awake Time",
                minutes(stages.total_awake_time_milli.as_ref()),
                " minutes",
            );
            lines.metric(
                "Light Sleep",
                minutes(stages.total_light_sleep_time_milli.as_ref()),
                " minutes",
            );
            lines.metric(
                "Deep Sleep",
                minutes(stages.total_slow_wave_sleep_time_milli.as_ref()),
                " minutes",
            );
            lines.metric(
                "REM Sleep",
                minutes(stages.total_rem_sleep_time_milli.as_ref()),
                " minutes",
            );
        }
    }

    lines.finish()
}

/// Format a recovery record
#[must_use]
pub fn format_recovery(recovery: &Recovery) -> String {
    let mut lines = RecordLines::header(format!(
        "Recovery: {}",
        recovery.created_at.as_deref().unwrap_or_default()
    ));

    if let Some(score) = recovery.scored() {
        lines.metric("Recovery Score", raw(score.recovery_score.as_ref()), "%");
        lines.metric(
            "Resting Heart Rate",
            raw(score.resting_heart_rate.as_ref()),
            " bpm",
        );
        lines.metric("HRV", scaled(score.hrv_rmssd_milli.as_ref(), 1.0, 1), " ms");
        lines.metric("SpO2", raw(score.spo2_percentage.as_ref()), "%");
        lines.metric(
            "Skin Temperature",
            scaled(score.skin_temp_celsius.as_ref(), 1.0, 1),
            "°C",
        );
    }

    lines.finish()
}

/// Format a physiological cycle record
#[must_use]
pub fn format_cycle(cycle: &Cycle) -> String {
    let mut lines = RecordLines::header(format!(
        "Cycle: {} to {}",
        cycle.start.as_deref().unwrap_or_default(),
        cycle
            .end
            .as_deref()
            .unwrap_or(formatting::CYCLE_IN_PROGRESS)
    ));

    if let Some(score) = cycle.scored() {
        lines.metric("Strain", raw(score.strain.as_ref()), "");
        lines.metric("Energy", raw(score.kilojoule.as_ref()), " kJ");
        lines.metric("Avg Heart Rate", raw(score.average_heart_rate.as_ref()), " bpm");
        lines.metric("Max Heart Rate", raw(score.max_heart_rate.as_ref()), " bpm");
    }

    lines.finish()
}

/// Format an API response body with a per-record formatter.
///
/// A body with a `records` key is a list: empty (or null) renders as
/// `No records found.`, otherwise records are joined by a blank line and a
/// pagination notice is appended when a `next_token` key is present. Any
/// other body is formatted as a single record.
#[must_use]
pub fn format_response<R: Record>(data: &Value, formatter: fn(&R) -> String) -> String {
    match ResponseEnvelope::classify(data) {
        ResponseEnvelope::List { records: [], .. } => formatting::NO_RECORDS.to_owned(),
        ResponseEnvelope::List { records, has_more } => {
            let mut output = records
                .iter()
                .map(|record| formatter(&R::from_json(record)))
                .collect::<Vec<_>>()
                .join(formatting::RECORD_SEPARATOR);

            if has_more {
                output.push_str(formatting::RECORD_SEPARATOR);
                output.push_str(formatting::MORE_RECORDS_NOTICE);
            }
            output
        }
        ResponseEnvelope::Single(record) => formatter(&R::from_json(record)),
    }
}

/// Pretty-printed JSON, used for profile and body measurement output
///
/// # Errors
///
/// Returns a serialization error if `data` cannot be rendered as JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(data)?)
}
