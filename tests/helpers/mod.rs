// ABOUTME: Shared test helpers: a stub ResourceFetcher and sample record builders
// ABOUTME: The stub records which types were fetched and can fail on demand
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;
use whoopctl::errors::{AppError, AppResult};
use whoopctl::models::{
    BodyMeasurement, CycleRecord, CycleScore, DateQuery, FetchOptions, RecoveryRecord,
    RecoveryScore, ResourceType, SleepRecord, SleepScore, SleepStageSummary, Snapshot,
    UserProfile, WorkoutRecord, WorkoutScore,
};
use whoopctl::providers::ResourceFetcher;

pub fn date(value: &str) -> NaiveDate {
    value.parse().expect("valid test date")
}

pub fn sample_profile() -> UserProfile {
    UserProfile {
        user_id: 42,
        email: Some("jane@example.com".into()),
        first_name: "Jane".into(),
        last_name: "Doe".into(),
    }
}

pub fn sample_body() -> BodyMeasurement {
    BodyMeasurement {
        height_meter: 1.75,
        weight_kilogram: 70.5,
        max_heart_rate: 192,
    }
}

pub fn sample_recovery() -> RecoveryRecord {
    RecoveryRecord {
        cycle_id: Some(1001),
        score: RecoveryScore {
            recovery_score: 85.0,
            resting_heart_rate: 52.0,
            hrv_rmssd_milli: 65.4,
            spo2_percentage: Some(96.5),
            skin_temp_celsius: Some(33.2),
        },
    }
}

pub fn sample_sleep() -> SleepRecord {
    SleepRecord {
        id: Some("sleep-1".into()),
        score: SleepScore {
            sleep_performance_percentage: 92.0,
            sleep_efficiency_percentage: 94.6,
            respiratory_rate: Some(15.2),
            stage_summary: SleepStageSummary {
                total_in_bed_time_milli: 27_000_000,
                total_awake_time_milli: Some(1_200_000),
                total_light_sleep_time_milli: Some(15_600_000),
                total_slow_wave_sleep_time_milli: 4_800_000,
                total_rem_sleep_time_milli: 5_400_000,
                disturbance_count: Some(7),
            },
        },
    }
}

pub fn sample_workout() -> WorkoutRecord {
    WorkoutRecord {
        id: Some("workout-1".into()),
        sport_name: "Running".into(),
        score: WorkoutScore {
            strain: 12.3,
            average_heart_rate: 150,
            max_heart_rate: Some(178),
            kilojoule: 2092.0,
            distance_meter: Some(8000.0),
        },
    }
}

pub fn sample_cycle() -> CycleRecord {
    CycleRecord {
        id: Some(1001),
        score: CycleScore {
            strain: 14.2,
            kilojoule: 8368.0,
            average_heart_rate: 82,
        },
    }
}

/// A snapshot with every field populated
pub fn full_snapshot() -> Snapshot {
    Snapshot {
        date: date("2024-06-01"),
        profile: Some(sample_profile()),
        body: Some(sample_body()),
        recovery: Some(vec![sample_recovery()]),
        sleep: Some(vec![sample_sleep()]),
        workout: Some(vec![sample_workout()]),
        cycle: Some(vec![sample_cycle()]),
    }
}

/// In-memory ResourceFetcher for aggregator tests.
///
/// Serves canned records, notes every fetched type, and fails the fetch
/// of `fail_on` when set.
#[derive(Default)]
pub struct StubFetcher {
    pub profile: Option<UserProfile>,
    pub body: Option<BodyMeasurement>,
    pub recovery: Vec<RecoveryRecord>,
    pub sleep: Vec<SleepRecord>,
    pub workout: Vec<WorkoutRecord>,
    pub cycle: Vec<CycleRecord>,
    pub fail_on: Option<ResourceType>,
    pub calls: Mutex<Vec<ResourceType>>,
}

impl StubFetcher {
    /// Stub with every resource populated from the sample builders
    pub fn with_full_data() -> Self {
        Self {
            profile: Some(sample_profile()),
            body: Some(sample_body()),
            recovery: vec![sample_recovery()],
            sleep: vec![sample_sleep()],
            workout: vec![sample_workout()],
            cycle: vec![sample_cycle()],
            ..Self::default()
        }
    }

    pub fn fetched_types(&self) -> Vec<ResourceType> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn visit(&self, resource: ResourceType) -> AppResult<()> {
        self.calls.lock().expect("calls lock").push(resource);
        if self.fail_on == Some(resource) {
            return Err(AppError::Api {
                status: 500,
                message: format!("stub failure for {resource}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceFetcher for StubFetcher {
    async fn fetch_profile(&self) -> AppResult<Option<UserProfile>> {
        self.visit(ResourceType::Profile)?;
        Ok(self.profile.clone())
    }

    async fn fetch_body(&self) -> AppResult<Option<BodyMeasurement>> {
        self.visit(ResourceType::Body)?;
        Ok(self.body.clone())
    }

    async fn fetch_recovery(
        &self,
        _query: &DateQuery,
        _options: FetchOptions,
    ) -> AppResult<Vec<RecoveryRecord>> {
        self.visit(ResourceType::Recovery)?;
        Ok(self.recovery.clone())
    }

    async fn fetch_sleep(
        &self,
        _query: &DateQuery,
        _options: FetchOptions,
    ) -> AppResult<Vec<SleepRecord>> {
        self.visit(ResourceType::Sleep)?;
        Ok(self.sleep.clone())
    }

    async fn fetch_workouts(
        &self,
        _query: &DateQuery,
        _options: FetchOptions,
    ) -> AppResult<Vec<WorkoutRecord>> {
        self.visit(ResourceType::Workout)?;
        Ok(self.workout.clone())
    }

    async fn fetch_cycles(
        &self,
        _query: &DateQuery,
        _options: FetchOptions,
    ) -> AppResult<Vec<CycleRecord>> {
        self.visit(ResourceType::Cycle)?;
        Ok(self.cycle.clone())
    }
}
