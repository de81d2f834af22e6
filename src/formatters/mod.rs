// ABOUTME: Snapshot renderers: structured JSON, multi-line report, one-line summary
// ABOUTME: Pure functions over Snapshot; section order and omission rules are a contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

// Millisecond durations fit f64 exactly for any realistic sleep length
#![allow(clippy::cast_precision_loss)]

use crate::errors::AppResult;
use crate::models::Snapshot;

/// Kilojoules per kilocalorie, for display conversion
const KILOJOULES_PER_KILOCALORIE: f64 = 4.184;

/// Deterministic structural serialization of a snapshot.
///
/// Field order follows the `Snapshot` declaration; the output parses back
/// into an equivalent snapshot via [`parse_structured`].
pub fn render_structured(snapshot: &Snapshot) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Inverse of [`render_structured`]
pub fn parse_structured(text: &str) -> AppResult<Snapshot> {
    Ok(serde_json::from_str(text)?)
}

/// Multi-line human-readable report.
///
/// Section order is fixed: date, profile, body, recovery, sleep, workout,
/// cycle. Absent fields emit no lines at all; a snapshot with no data
/// renders exactly the date header line.
#[must_use]
pub fn render_report(snapshot: &Snapshot) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(profile) = &snapshot.profile {
        lines.push(format!("👤 {} {}", profile.first_name, profile.last_name));
    }

    if let Some(body) = &snapshot.body {
        lines.push(format!(
            "📏 {}m | {}kg | Max HR: {}",
            body.height_meter, body.weight_kilogram, body.max_heart_rate
        ));
    }

    if let Some(record) = snapshot.recovery.as_ref().and_then(|records| records.first()) {
        let score = &record.score;
        lines.push(format!(
            "💚 Recovery: {:.0}% | HRV: {:.1}ms | RHR: {}bpm",
            score.recovery_score, score.hrv_rmssd_milli, score.resting_heart_rate
        ));
        let mut extras = Vec::new();
        if let Some(spo2) = score.spo2_percentage {
            extras.push(format!("SpO2: {spo2}%"));
        }
        if let Some(skin_temp) = score.skin_temp_celsius {
            extras.push(format!("Skin temp: {skin_temp:.1}°C"));
        }
        if !extras.is_empty() {
            lines.push(format!("   {}", extras.join(" | ")));
        }
    }

    if let Some(record) = snapshot.sleep.as_ref().and_then(|records| records.first()) {
        let score = &record.score;
        let stages = &score.stage_summary;
        let hours = stages.total_in_bed_time_milli as f64 / 3_600_000.0;
        lines.push(format!(
            "😴 Sleep: {}% | {hours:.1}h | Efficiency: {:.0}%",
            score.sleep_performance_percentage, score.sleep_efficiency_percentage
        ));
        lines.push(format!(
            "   REM: {:.0}min | Deep: {:.0}min",
            stages.total_rem_sleep_time_milli as f64 / 60_000.0,
            stages.total_slow_wave_sleep_time_milli as f64 / 60_000.0
        ));
    }

    if let Some(workouts) = snapshot.workout.as_deref().filter(|w| !w.is_empty()) {
        lines.push("🏋️ Workouts:".to_owned());
        for workout in workouts {
            let score = &workout.score;
            lines.push(format!(
                "   {}: Strain {:.1} | Avg HR: {} | {:.0} cal",
                workout.sport_name,
                score.strain,
                score.average_heart_rate,
                kilocalories(score.kilojoule)
            ));
        }
    }

    if let Some(record) = snapshot.cycle.as_ref().and_then(|records| records.first()) {
        let score = &record.score;
        lines.push(format!(
            "🔄 Day strain: {:.1} | {:.0} cal | Avg HR: {}",
            score.strain,
            kilocalories(score.kilojoule),
            score.average_heart_rate
        ));
    }

    let header = format!("📅 {}", snapshot.date);
    if lines.is_empty() {
        return header;
    }
    let mut output = vec![header, String::new()];
    output.extend(lines);
    output.join("\n")
}

/// One-line snapshot summary: `"<date> | part | part | ..."`.
///
/// Parts appear in fixed order (recovery score, HRV, RHR, sleep
/// performance, day strain, workout count) and only when their field is
/// present. Only the most recent record of each collection is summarized.
/// With no applicable parts the line reads `"<date> | No data"`.
#[must_use]
pub fn render_summary(snapshot: &Snapshot) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(record) = snapshot.recovery.as_ref().and_then(|records| records.first()) {
        let score = &record.score;
        parts.push(format!("Recovery: {:.0}%", score.recovery_score));
        parts.push(format!("HRV: {:.0}ms", score.hrv_rmssd_milli));
        parts.push(format!("RHR: {}", score.resting_heart_rate));
    }

    if let Some(record) = snapshot.sleep.as_ref().and_then(|records| records.first()) {
        parts.push(format!(
            "Sleep: {}%",
            record.score.sleep_performance_percentage
        ));
    }

    if let Some(record) = snapshot.cycle.as_ref().and_then(|records| records.first()) {
        parts.push(format!("Strain: {:.1}", record.score.strain));
    }

    if let Some(workouts) = snapshot.workout.as_deref().filter(|w| !w.is_empty()) {
        parts.push(format!("Workouts: {}", workouts.len()));
    }

    if parts.is_empty() {
        format!("{} | No data", snapshot.date)
    } else {
        format!("{} | {}", snapshot.date, parts.join(" | "))
    }
}

/// Convert kilojoules to kilocalories for display; energy is never shown
/// in kilojoules.
fn kilocalories(kilojoule: f64) -> f64 {
    kilojoule / KILOJOULES_PER_KILOCALORIE
}
