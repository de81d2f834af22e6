// ABOUTME: WHOOP developer API client implementing the ResourceFetcher seam
// ABOUTME: Handles bearer auth, automatic token refresh, and nextToken pagination
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::core::{ProviderConfig, ResourceFetcher};
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{
    BodyMeasurement, CycleRecord, DateQuery, FetchOptions, RecoveryRecord, SleepRecord,
    UserProfile, WorkoutRecord,
};
use crate::oauth::{OAuth2Token, TokenResponse, TokenStore};
use crate::utils::http_client::shared_client;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt::Write;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};

/// WHOOP caps collection page sizes at 25 records
const MAX_PAGE_SIZE: u32 = 25;

/// WHOOP pagination wrapper for collection responses
#[derive(Debug, Deserialize)]
struct PaginatedResponse<T> {
    /// Records in this page
    records: Vec<T>,
    /// Token for the next page (`None` when exhausted)
    next_token: Option<String>,
}

/// Authenticated client for the WHOOP developer API
pub struct WhoopClient {
    config: ProviderConfig,
    app: AppConfig,
    store: TokenStore,
    token: RwLock<Option<OAuth2Token>>,
    client: Client,
}

impl WhoopClient {
    /// WHOOP endpoint configuration and default scopes
    #[must_use]
    pub fn provider_config() -> ProviderConfig {
        ProviderConfig {
            name: "whoop".to_owned(),
            auth_url: "https://api.prod.whoop.com/oauth/oauth2/auth".to_owned(),
            token_url: "https://api.prod.whoop.com/oauth/oauth2/token".to_owned(),
            api_base_url: "https://api.prod.whoop.com/developer/v1".to_owned(),
            default_scopes: [
                "read:profile",
                "read:body_measurement",
                "read:recovery",
                "read:sleep",
                "read:workout",
                "read:cycles",
                "offline",
            ]
            .iter()
            .map(|s| (*s).to_owned())
            .collect(),
        }
    }

    /// Create a client using the default WHOOP endpoints
    #[must_use]
    pub fn new(app: AppConfig, store: TokenStore) -> Self {
        Self::with_config(Self::provider_config(), app, store)
    }

    /// Create a client with custom endpoint configuration
    #[must_use]
    pub fn with_config(config: ProviderConfig, app: AppConfig, store: TokenStore) -> Self {
        Self {
            config,
            app,
            store,
            token: RwLock::new(None),
            client: shared_client().clone(),
        }
    }

    /// Return a valid access token, loading from the store on first use and
    /// refreshing when it expires within 5 minutes.
    async fn access_token(&self) -> AppResult<String> {
        {
            let guard = self.token.read().await;
            if let Some(token) = guard.as_ref() {
                if !token.will_expire_soon() {
                    return Ok(token.access_token.clone());
                }
            }
        }

        // Slow path: load and/or refresh under the write lock so concurrent
        // fetches don't race a rotating refresh token.
        let mut guard = self.token.write().await;
        if guard.is_none() {
            *guard = self.store.load()?;
        }
        let Some(current) = guard.as_ref() else {
            return Err(AppError::auth("not logged in. Run `whoopctl auth login`"));
        };
        if !current.will_expire_soon() {
            return Ok(current.access_token.clone());
        }

        let refreshed = self.refresh_token(current).await?;
        self.store.save(&refreshed)?;
        let access_token = refreshed.access_token.clone();
        *guard = Some(refreshed);
        Ok(access_token)
    }

    /// Exchange the refresh token for a new token set
    async fn refresh_token(&self, current: &OAuth2Token) -> AppResult<OAuth2Token> {
        let refresh_token = current.refresh_token.as_deref().ok_or_else(|| {
            AppError::auth("access token expired and no refresh token is stored. Run `whoopctl auth login`")
        })?;

        info!("Refreshing WHOOP access token");

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.app.client_id.as_str()),
            ("client_secret", self.app.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::auth(format!(
                "token refresh failed with status {status}. Run `whoopctl auth login`"
            )));
        }

        let token_response: TokenResponse = response.json().await?;
        let mut refreshed = OAuth2Token::from_response(token_response);
        // Providers may omit the refresh token on rotation; keep the old one
        if refreshed.refresh_token.is_none() {
            refreshed.refresh_token = current.refresh_token.clone();
        }
        Ok(refreshed)
    }

    /// Make an authenticated GET request against the API base URL
    async fn api_request<T>(&self, endpoint: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        debug!("WHOOP API request: {endpoint}");

        let access_token = self.access_token().await?;
        let url = format!(
            "{}/{}",
            self.config.api_base_url,
            endpoint.trim_start_matches('/')
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {access_token}"))
            .send()
            .await?;

        let status = response.status();
        debug!("WHOOP API response status: {status}");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Self::handle_api_error(status, &text));
        }

        Ok(response.json().await?)
    }

    /// Map non-success API responses to error kinds
    fn handle_api_error(status: reqwest::StatusCode, text: &str) -> AppError {
        error!(
            "WHOOP API request failed - status: {status}, body_length: {} bytes",
            text.len()
        );

        match status.as_u16() {
            401 => AppError::auth("access token expired or invalid. Run `whoopctl auth login`"),
            429 => AppError::RateLimited {
                retry_after_secs: 60,
            },
            code => AppError::Api {
                status: code,
                message: text.to_owned(),
            },
        }
    }

    /// Fetch one page, or every page when `options.all` is set, of a
    /// collection endpoint filtered to the query window.
    async fn fetch_collection<T>(
        &self,
        path: &str,
        query: &DateQuery,
        options: FetchOptions,
    ) -> AppResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let limit = options.limit.clamp(1, MAX_PAGE_SIZE);
        let (start, end) = query.window();

        let mut records = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut endpoint = format!("{path}?limit={limit}&start={start}&end={end}");
            if let Some(token) = &next_token {
                let _ = write!(endpoint, "&nextToken={}", urlencoding::encode(token));
            }

            let page: PaginatedResponse<T> = self.api_request(&endpoint).await?;
            records.extend(page.records);
            next_token = page.next_token;

            if !options.all || next_token.is_none() {
                break;
            }
        }

        Ok(records)
    }
}

#[async_trait]
impl ResourceFetcher for WhoopClient {
    #[instrument(skip(self), fields(provider = "whoop", api_call = "profile"))]
    async fn fetch_profile(&self) -> AppResult<Option<UserProfile>> {
        self.api_request("user/profile/basic").await.map(Some)
    }

    #[instrument(skip(self), fields(provider = "whoop", api_call = "body"))]
    async fn fetch_body(&self) -> AppResult<Option<BodyMeasurement>> {
        self.api_request("user/measurement/body").await.map(Some)
    }

    #[instrument(skip(self, options), fields(provider = "whoop", api_call = "recovery"))]
    async fn fetch_recovery(
        &self,
        query: &DateQuery,
        options: FetchOptions,
    ) -> AppResult<Vec<RecoveryRecord>> {
        self.fetch_collection("recovery", query, options).await
    }

    #[instrument(skip(self, options), fields(provider = "whoop", api_call = "sleep"))]
    async fn fetch_sleep(
        &self,
        query: &DateQuery,
        options: FetchOptions,
    ) -> AppResult<Vec<SleepRecord>> {
        self.fetch_collection("activity/sleep", query, options).await
    }

    #[instrument(skip(self, options), fields(provider = "whoop", api_call = "workout"))]
    async fn fetch_workouts(
        &self,
        query: &DateQuery,
        options: FetchOptions,
    ) -> AppResult<Vec<WorkoutRecord>> {
        self.fetch_collection("activity/workout", query, options).await
    }

    #[instrument(skip(self, options), fields(provider = "whoop", api_call = "cycle"))]
    async fn fetch_cycles(
        &self,
        query: &DateQuery,
        options: FetchOptions,
    ) -> AppResult<Vec<CycleRecord>> {
        self.fetch_collection("cycle", query, options).await
    }
}
