// ABOUTME: Tests for the three snapshot renderers
// ABOUTME: Golden report/summary output, omission rules, and structured round-trips
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

mod helpers;

use helpers::{date, full_snapshot, sample_cycle, sample_recovery, sample_sleep, sample_workout};
use whoopctl::formatters::{parse_structured, render_report, render_structured, render_summary};
use whoopctl::models::Snapshot;

#[test]
fn report_renders_all_sections_in_fixed_order() {
    let report = render_report(&full_snapshot());
    let expected = "\
📅 2024-06-01

👤 Jane Doe
📏 1.75m | 70.5kg | Max HR: 192
💚 Recovery: 85% | HRV: 65.4ms | RHR: 52bpm
   SpO2: 96.5% | Skin temp: 33.2°C
😴 Sleep: 92% | 7.5h | Efficiency: 95%
   REM: 90min | Deep: 80min
🏋️ Workouts:
   Running: Strain 12.3 | Avg HR: 150 | 500 cal
🔄 Day strain: 14.2 | 2000 cal | Avg HR: 82";
    assert_eq!(report, expected);
}

#[test]
fn report_for_empty_snapshot_is_just_the_date_header() {
    let snapshot = Snapshot::new(date("2024-06-01"));
    assert_eq!(render_report(&snapshot), "📅 2024-06-01");
}

#[test]
fn report_omits_absent_sections_entirely() {
    let snapshot = Snapshot {
        sleep: Some(vec![sample_sleep()]),
        ..Snapshot::new(date("2024-06-01"))
    };
    let report = render_report(&snapshot);
    assert!(report.contains("😴 Sleep:"));
    assert!(!report.contains("Recovery"));
    assert!(!report.contains("Workouts"));
    assert!(!report.contains("Day strain"));
}

#[test]
fn report_spo2_subline_appears_only_when_present() {
    let mut record = sample_recovery();
    record.score.spo2_percentage = None;
    record.score.skin_temp_celsius = None;
    let snapshot = Snapshot {
        recovery: Some(vec![record]),
        ..Snapshot::new(date("2024-06-01"))
    };
    let report = render_report(&snapshot);
    assert!(report.contains("💚 Recovery:"));
    assert!(!report.contains("SpO2"));
    assert!(!report.contains("Skin temp"));
}

#[test]
fn report_lists_every_workout() {
    let mut second = sample_workout();
    second.sport_name = "Cycling".into();
    second.score.strain = 8.0;
    second.score.kilojoule = 4.184;
    let snapshot = Snapshot {
        workout: Some(vec![sample_workout(), second]),
        ..Snapshot::new(date("2024-06-01"))
    };
    let report = render_report(&snapshot);
    assert!(report.contains("   Running: Strain 12.3 | Avg HR: 150 | 500 cal"));
    // 4.184 kJ is exactly one kilocalorie
    assert!(report.contains("   Cycling: Strain 8.0 | Avg HR: 150 | 1 cal"));
}

#[test]
fn summary_includes_parts_in_fixed_order() {
    let summary = render_summary(&full_snapshot());
    assert_eq!(
        summary,
        "2024-06-01 | Recovery: 85% | HRV: 65ms | RHR: 52 | Sleep: 92% | Strain: 14.2 | Workouts: 1"
    );
}

#[test]
fn summary_with_no_data() {
    let snapshot = Snapshot::new(date("2024-06-01"));
    assert_eq!(render_summary(&snapshot), "2024-06-01 | No data");
}

#[test]
fn summary_omits_parts_for_absent_fields() {
    let snapshot = Snapshot {
        sleep: Some(vec![sample_sleep()]),
        recovery: Some(vec![sample_recovery()]),
        ..Snapshot::new(date("2024-06-01"))
    };
    let summary = render_summary(&snapshot);
    assert_eq!(
        summary,
        "2024-06-01 | Recovery: 85% | HRV: 65ms | RHR: 52 | Sleep: 92%"
    );
    assert!(!summary.contains("Strain:"));
    assert!(!summary.contains("Workouts:"));
}

#[test]
fn summary_uses_only_the_most_recent_record() {
    let mut older = sample_cycle();
    older.score.strain = 5.5;
    let snapshot = Snapshot {
        cycle: Some(vec![sample_cycle(), older]),
        ..Snapshot::new(date("2024-06-01"))
    };
    assert_eq!(render_summary(&snapshot), "2024-06-01 | Strain: 14.2");
}

#[test]
fn structured_round_trip_preserves_every_field() {
    for snapshot in [
        full_snapshot(),
        Snapshot::new(date("2024-06-01")),
        Snapshot {
            sleep: Some(vec![sample_sleep()]),
            cycle: Some(vec![sample_cycle()]),
            ..Snapshot::new(date("2024-02-29"))
        },
    ] {
        let text = render_structured(&snapshot).unwrap();
        let parsed = parse_structured(&text).unwrap();
        assert_eq!(parsed, snapshot);
    }
}

#[test]
fn structured_output_is_deterministic_and_ordered() {
    let text = render_structured(&full_snapshot()).unwrap();
    assert_eq!(text, render_structured(&full_snapshot()).unwrap());

    // Declaration order: date, profile, body, recovery, sleep, workout, cycle
    let positions: Vec<usize> = ["\"date\"", "\"profile\"", "\"body\"", "\"recovery\"", "\"sleep\"", "\"workout\"", "\"cycle\""]
        .iter()
        .map(|key| text.find(key).expect("key present"))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

    // Absent fields are omitted, not serialized as null
    let empty = render_structured(&Snapshot::new(date("2024-06-01"))).unwrap();
    assert!(!empty.contains("null"));
    assert!(!empty.contains("\"sleep\""));
}
