// ABOUTME: Integration tests for WHOOP record formatters and the envelope dispatcher
// ABOUTME: Pins exact output text, units, precision, and handling of partial records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serde_json::json;
use whoop_mcp_server::formatters::{
    format_cycle, format_json, format_recovery, format_response, format_sleep, format_workout,
};
use whoop_mcp_server::models::{Cycle, Record, Recovery, Sleep, Workout};

#[test]
fn test_scored_workout_renders_every_metric() {
    let workout = Workout::from_json(&json!({
        "sport_name": "Running",
        "sport_id": 0,
        "start": "2024-01-01T07:00:00.000Z",
        "score_state": "SCORED",
        "score": {
            "strain": 12.5,
            "average_heart_rate": 150,
            "max_heart_rate": 182,
            "kilojoule": 2100.4,
            "distance_meter": 1500,
            "altitude_gain_meter": 42,
            "altitude_change_meter": -3
        }
    }));

    assert_eq!(
        format_workout(&workout),
        "Workout: Running\n\
         \x20 Time: 2024-01-01T07:00:00.000Z\n\
         \x20 Strain: 12.5\n\
         \x20 Avg Heart Rate: 150 bpm\n\
         \x20 Max Heart Rate: 182 bpm\n\
         \x20 Energy: 2100.4 kJ\n\
         \x20 Distance: 1.50 km\n\
         \x20 Altitude Gain: 42 m\n\
         \x20 Altitude Change: -3 m"
    );
}

#[test]
fn test_workout_without_sport_name_falls_back_to_sport_id() {
    let with_id = Workout::from_json(&json!({ "sport_id": 44, "score_state": "PENDING_SCORE" }));
    assert_eq!(format_workout(&with_id), "Workout: Sport ID 44");

    let without_id = Workout::from_json(&json!({}));
    assert_eq!(format_workout(&without_id), "Workout: Sport ID Unknown");
}

#[test]
fn test_workout_accepts_textual_sport_id() {
    let workout = Workout::from_json(&json!({ "sport_id": "52" }));
    assert_eq!(format_workout(&workout), "Workout: Sport ID 52");

    let unusable = Workout::from_json(&json!({ "sport_id": [52], "start": "2024-01-01" }));
    assert!(unusable.sport_id.is_none());
    assert_eq!(unusable.start.as_deref(), Some("2024-01-01"));
}

#[test]
fn test_workout_omits_missing_metrics() {
    let workout = Workout::from_json(&json!({
        "sport_name": "Cycling",
        "score_state": "SCORED",
        "score": { "strain": 8.1, "distance_meter": null }
    }));

    assert_eq!(format_workout(&workout), "Workout: Cycling\n  Strain: 8.1");
}

#[test]
fn test_sleep_converts_stage_durations_to_minutes() {
    let sleep = Sleep::from_json(&json!({
        "start": "2024-01-01T22:00:00.000Z",
        "end": "2024-01-02T06:00:00.000Z",
        "nap": false,
        "score_state": "SCORED",
        "score": {
            "sleep_performance_percentage": 92,
            "sleep_efficiency_percentage": 88.5,
            "respiratory_rate": 14.6,
            "stage_summary": {
                "total_in_bed_time_milli": 28_800_000,
                "total_awake_time_milli": 1_800_000,
                "total_light_sleep_time_milli": 12_600_000,
                "total_slow_wave_sleep_time_milli": 2_700_000,
                "total_rem_sleep_time_milli": 5_400_000
            }
        }
    }));

    assert_eq!(
        format_sleep(&sleep),
        "Sleep: 2024-01-01T22:00:00.000Z to 2024-01-02T06:00:00.000Z\n\
         \x20 Performance: 92%\n\
         \x20 Efficiency: 88.5%\n\
         \x20 Respiratory Rate: 14.6 breaths/min\n\
         \x20 Total Time in Bed: 480 minutes\n\
         \x20 Awake Time: 30 minutes\n\
         \x20 Light Sleep: 210 minutes\n\
         \x20 Deep Sleep: 45 minutes\n\
         \x20 REM Sleep: 90 minutes"
    );
}

#[test]
fn test_nap_is_labelled_and_unscored_sleep_has_header_only() {
    let nap = Sleep::from_json(&json!({
        "start": "2024-01-01T13:00:00.000Z",
        "end": "2024-01-01T13:30:00.000Z",
        "nap": true,
        "score_state": "PENDING_SCORE",
        "score": { "sleep_performance_percentage": 50 }
    }));

    assert_eq!(
        format_sleep(&nap),
        "Nap: 2024-01-01T13:00:00.000Z to 2024-01-01T13:30:00.000Z"
    );
}

#[test]
fn test_recovery_rounds_hrv_and_skin_temperature() {
    let recovery = Recovery::from_json(&json!({
        "created_at": "2024-01-02T07:00:00.000Z",
        "score_state": "SCORED",
        "score": {
            "recovery_score": 67,
            "resting_heart_rate": 52,
            "hrv_rmssd_milli": 45.678,
            "spo2_percentage": 96.5,
            "skin_temp_celsius": 33.44
        }
    }));

    assert_eq!(
        format_recovery(&recovery),
        "Recovery: 2024-01-02T07:00:00.000Z\n\
         \x20 Recovery Score: 67%\n\
         \x20 Resting Heart Rate: 52 bpm\n\
         \x20 HRV: 45.7 ms\n\
         \x20 SpO2: 96.5%\n\
         \x20 Skin Temperature: 33.4°C"
    );
}

#[test]
fn test_unscorable_recovery_has_header_only() {
    let recovery = Recovery::from_json(&json!({
        "created_at": "2024-01-02T07:00:00.000Z",
        "score_state": "UNSCORABLE"
    }));

    assert_eq!(
        format_recovery(&recovery),
        "Recovery: 2024-01-02T07:00:00.000Z"
    );
}

#[test]
fn test_cycle_in_progress() {
    let cycle = Cycle::from_json(&json!({
        "start": "2024-01-01T06:00:00.000Z",
        "end": null,
        "score_state": "SCORED",
        "score": {
            "strain": 5.2,
            "kilojoule": 8000,
            "average_heart_rate": 70,
            "max_heart_rate": 140
        }
    }));

    assert_eq!(
        format_cycle(&cycle),
        "Cycle: 2024-01-01T06:00:00.000Z to In Progress\n\
         \x20 Strain: 5.2\n\
         \x20 Energy: 8000 kJ\n\
         \x20 Avg Heart Rate: 70 bpm\n\
         \x20 Max Heart Rate: 140 bpm"
    );
}

#[test]
fn test_list_envelope_joins_records_with_blank_line() {
    let data = json!({
        "records": [
            { "sport_name": "Running" },
            { "sport_name": "Yoga" }
        ]
    });

    assert_eq!(
        format_response(&data, format_workout),
        "Workout: Running\n\nWorkout: Yoga"
    );
}

#[test]
fn test_list_envelope_with_next_token_appends_pagination_notice() {
    let data = json!({
        "records": [{ "created_at": "2024-01-02T07:00:00.000Z" }],
        "next_token": "abc"
    });

    assert_eq!(
        format_response(&data, format_recovery),
        "Recovery: 2024-01-02T07:00:00.000Z\n\n(More records available - use pagination)"
    );
}

#[test]
fn test_empty_list_envelope() {
    let empty = json!({ "records": [], "next_token": "abc" });
    assert_eq!(format_response(&empty, format_cycle), "No records found.");

    let null_records = json!({ "records": null });
    assert_eq!(format_response(&null_records, format_cycle), "No records found.");
}

#[test]
fn test_single_record_body_is_formatted_directly() {
    let data = json!({
        "start": "2024-01-01T06:00:00.000Z",
        "end": "2024-01-02T06:00:00.000Z"
    });

    assert_eq!(
        format_response(&data, format_cycle),
        "Cycle: 2024-01-01T06:00:00.000Z to 2024-01-02T06:00:00.000Z"
    );
}

#[test]
fn test_format_json_is_pretty_printed() {
    let data = json!({ "user_id": 10129 });
    assert_eq!(format_json(&data).unwrap(), "{\n  \"user_id\": 10129\n}");
}
