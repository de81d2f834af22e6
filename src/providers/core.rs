// ABOUTME: The ResourceFetcher trait: the contract between aggregation and transport
// ABOUTME: Also holds the provider endpoint configuration shared with the OAuth flow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::errors::AppResult;
use crate::models::{
    BodyMeasurement, CycleRecord, DateQuery, FetchOptions, RecoveryRecord, SleepRecord,
    UserProfile, WorkoutRecord,
};
use async_trait::async_trait;

/// Endpoint configuration for a provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider name for logging and error messages
    pub name: String,
    /// OAuth authorization endpoint
    pub auth_url: String,
    /// OAuth token endpoint
    pub token_url: String,
    /// Base URL for data endpoints
    pub api_base_url: String,
    /// Default OAuth scopes requested at login
    pub default_scopes: Vec<String>,
}

/// The fetch boundary consumed by the aggregator.
///
/// Each method fetches one resource type independently; collection
/// methods honor `options.limit` as the page size and, when
/// `options.all` is set, transparently return the concatenated
/// multi-page result. Transport and auth failures propagate unmodified.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch the user profile (date-less endpoint); `None` when the
    /// provider has no record
    async fn fetch_profile(&self) -> AppResult<Option<UserProfile>>;

    /// Fetch body measurements (date-less endpoint); `None` when the
    /// provider has no record
    async fn fetch_body(&self) -> AppResult<Option<BodyMeasurement>>;

    /// Fetch recovery records in the query window, most recent first
    async fn fetch_recovery(
        &self,
        query: &DateQuery,
        options: FetchOptions,
    ) -> AppResult<Vec<RecoveryRecord>>;

    /// Fetch sleep records in the query window, most recent first
    async fn fetch_sleep(
        &self,
        query: &DateQuery,
        options: FetchOptions,
    ) -> AppResult<Vec<SleepRecord>>;

    /// Fetch workout records in the query window, most recent first
    async fn fetch_workouts(
        &self,
        query: &DateQuery,
        options: FetchOptions,
    ) -> AppResult<Vec<WorkoutRecord>>;

    /// Fetch physiological cycle records in the query window, most recent first
    async fn fetch_cycles(
        &self,
        query: &DateQuery,
        options: FetchOptions,
    ) -> AppResult<Vec<CycleRecord>>;
}
