// ABOUTME: Domain models for WHOOP health data and the merged daily snapshot
// ABOUTME: Mirrors the WHOOP developer API response shapes (scores, milli durations)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six categories of health data WHOOP exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Sleep,
    Recovery,
    Workout,
    Cycle,
    Profile,
    Body,
}

impl ResourceType {
    /// Every known resource type, in snapshot field order
    pub const ALL: [Self; 6] = [
        Self::Profile,
        Self::Body,
        Self::Recovery,
        Self::Sleep,
        Self::Workout,
        Self::Cycle,
    ];
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sleep => "sleep",
            Self::Recovery => "recovery",
            Self::Workout => "workout",
            Self::Cycle => "cycle",
            Self::Profile => "profile",
            Self::Body => "body",
        };
        f.write_str(name)
    }
}

/// Per-type inclusion flags from the default command (`--sleep`, `--recovery`, ...)
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeSelection {
    pub sleep: bool,
    pub recovery: bool,
    pub workout: bool,
    pub cycle: bool,
    pub profile: bool,
    pub body: bool,
}

impl TypeSelection {
    /// Resource types selected by the flags, in a stable order.
    ///
    /// Returns an empty vec when no flag is set; the aggregator treats an
    /// empty set as "all types".
    #[must_use]
    pub fn to_types(self) -> Vec<ResourceType> {
        let mut types = Vec::new();
        if self.sleep {
            types.push(ResourceType::Sleep);
        }
        if self.recovery {
            types.push(ResourceType::Recovery);
        }
        if self.workout {
            types.push(ResourceType::Workout);
        }
        if self.cycle {
            types.push(ResourceType::Cycle);
        }
        if self.profile {
            types.push(ResourceType::Profile);
        }
        if self.body {
            types.push(ResourceType::Body);
        }
        types
    }
}

/// Pagination options for collection endpoints
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// Page size (records per request)
    pub limit: u32,
    /// Follow `next_token` and concatenate every page
    pub all: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            limit: 25,
            all: false,
        }
    }
}

/// The date window a query covers.
///
/// WHOOP collection endpoints filter on datetime ranges; a single day is
/// the degenerate one-day range. The snapshot is keyed by the start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateQuery {
    /// One calendar day
    Day(NaiveDate),
    /// Inclusive calendar-date range
    Range { start: NaiveDate, end: NaiveDate },
}

impl DateQuery {
    /// The snapshot aggregation key for this query
    #[must_use]
    pub const fn key_date(&self) -> NaiveDate {
        match self {
            Self::Day(date) | Self::Range { start: date, .. } => *date,
        }
    }

    /// Half-open UTC datetime bounds for WHOOP's `start`/`end` filters,
    /// formatted as `YYYY-MM-DDTHH:MM:SS.mmmZ`
    #[must_use]
    pub fn window(&self) -> (String, String) {
        let (start, end) = match self {
            Self::Day(date) => (*date, *date),
            Self::Range { start, end } => (*start, *end),
        };
        let exclusive_end = end.succ_opt().unwrap_or(end);
        (
            format!("{}T00:00:00.000Z", start.format("%Y-%m-%d")),
            format!("{}T00:00:00.000Z", exclusive_end.format("%Y-%m-%d")),
        )
    }
}

/// WHOOP user profile (`user/profile/basic`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// WHOOP user id
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

/// WHOOP body measurements (`user/measurement/body`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurement {
    pub height_meter: f64,
    pub weight_kilogram: f64,
    pub max_heart_rate: i32,
}

/// One record from the `recovery` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryRecord {
    /// Physiological cycle this recovery belongs to
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cycle_id: Option<i64>,
    pub score: RecoveryScore,
}

/// Computed recovery metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryScore {
    /// Readiness percentage (0-100)
    pub recovery_score: f64,
    /// Resting heart rate in bpm
    pub resting_heart_rate: f64,
    /// Heart rate variability (RMSSD) in milliseconds
    pub hrv_rmssd_milli: f64,
    /// Blood oxygen saturation percentage (4.0+ devices only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub spo2_percentage: Option<f64>,
    /// Skin temperature in Celsius (4.0+ devices only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub skin_temp_celsius: Option<f64>,
}

/// One record from the `activity/sleep` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepRecord {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    pub score: SleepScore,
}

/// Computed sleep metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepScore {
    /// Sleep performance percentage (0-100)
    pub sleep_performance_percentage: f64,
    /// Sleep efficiency percentage (0-100)
    pub sleep_efficiency_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub respiratory_rate: Option<f64>,
    pub stage_summary: SleepStageSummary,
}

/// Sleep stage duration breakdown, all durations in integral milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepStageSummary {
    pub total_in_bed_time_milli: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total_awake_time_milli: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total_light_sleep_time_milli: Option<i64>,
    pub total_slow_wave_sleep_time_milli: i64,
    pub total_rem_sleep_time_milli: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub disturbance_count: Option<i32>,
}

/// One record from the `activity/workout` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    pub sport_name: String,
    pub score: WorkoutScore,
}

/// Computed workout metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutScore {
    /// Cardiovascular exertion (0-21 scale)
    pub strain: f64,
    pub average_heart_rate: i32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_heart_rate: Option<i32>,
    /// Energy expenditure in kilojoules (rendered as kilocalories)
    pub kilojoule: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub distance_meter: Option<f64>,
}

/// One record from the `cycle` endpoint (a WHOOP physiological day)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleRecord {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<i64>,
    pub score: CycleScore,
}

/// Computed day-cycle metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleScore {
    /// Day strain (0-21 scale)
    pub strain: f64,
    /// Energy expenditure in kilojoules
    pub kilojoule: f64,
    pub average_heart_rate: i32,
}

/// The merged, dated result of one query.
///
/// A field is `None` when its resource type was not requested or the API
/// returned no records. Populated collection fields are never empty; the
/// aggregator maps empty results to `None`, so renderers branch on
/// presence alone.
///
/// Serialized field order is declaration order, which makes
/// [`crate::formatters::render_structured`] deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Aggregation key (always a valid calendar date by construction)
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub profile: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub body: Option<BodyMeasurement>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recovery: Option<Vec<RecoveryRecord>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sleep: Option<Vec<SleepRecord>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub workout: Option<Vec<WorkoutRecord>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cycle: Option<Vec<CycleRecord>>,
}

impl Snapshot {
    /// An empty snapshot for the given date
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            profile: None,
            body: None,
            recovery: None,
            sleep: None,
            workout: None,
            cycle: None,
        }
    }

    /// True when no resource field is populated
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.profile.is_none()
            && self.body.is_none()
            && self.recovery.is_none()
            && self.sleep.is_none()
            && self.workout.is_none()
            && self.cycle.is_none()
    }
}

/// Parse a `YYYY-MM-DD` string that has already passed validation
pub(crate) fn parse_iso_date(input: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(input.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_selection_preserves_flag_order() {
        let selection = TypeSelection {
            recovery: true,
            body: true,
            ..TypeSelection::default()
        };
        assert_eq!(
            selection.to_types(),
            vec![ResourceType::Recovery, ResourceType::Body]
        );
        assert!(TypeSelection::default().to_types().is_empty());
    }

    #[test]
    fn date_query_window_is_half_open() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let (start, end) = DateQuery::Day(day).window();
        assert_eq!(start, "2024-06-01T00:00:00.000Z");
        assert_eq!(end, "2024-06-02T00:00:00.000Z");

        let range = DateQuery::Range {
            start: day,
            end: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        };
        let (start, end) = range.window();
        assert_eq!(start, "2024-06-01T00:00:00.000Z");
        assert_eq!(end, "2024-06-04T00:00:00.000Z");
        assert_eq!(range.key_date(), day);
    }

    #[test]
    fn snapshot_serializes_absent_fields_as_missing() {
        let snapshot = Snapshot::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let json = serde_json::to_value(&snapshot).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["date"], "2024-06-01");
    }
}
