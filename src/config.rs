// ABOUTME: Environment-only configuration for whoopctl
// ABOUTME: Reads OAuth client credentials, redirect port, and token file path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::errors::{AppError, AppResult};
use std::env;
use std::path::PathBuf;

/// Default localhost port for the OAuth callback listener
pub const DEFAULT_REDIRECT_PORT: u16 = 8976;

/// Runtime configuration, loaded from the environment.
///
/// Variables:
/// - `WHOOP_CLIENT_ID` / `WHOOP_CLIENT_SECRET` (required for API access)
/// - `WHOOP_REDIRECT_PORT` (optional, default 8976)
/// - `WHOOPCTL_TOKEN_FILE` (optional, default `~/.whoopctl/tokens.json`)
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OAuth application client id
    pub client_id: String,
    /// OAuth application client secret
    pub client_secret: String,
    /// Port for the one-shot login callback listener
    pub redirect_port: u16,
    /// Where OAuth tokens are persisted
    pub token_path: PathBuf,
}

impl AppConfig {
    /// Load configuration from the environment
    pub fn from_env() -> AppResult<Self> {
        let client_id = require_var("WHOOP_CLIENT_ID")?;
        let client_secret = require_var("WHOOP_CLIENT_SECRET")?;

        let redirect_port = match env::var("WHOOP_REDIRECT_PORT") {
            Ok(raw) => raw.parse().map_err(|_| {
                AppError::config(format!("WHOOP_REDIRECT_PORT is not a valid port: {raw}"))
            })?,
            Err(_) => DEFAULT_REDIRECT_PORT,
        };

        Ok(Self {
            client_id,
            client_secret,
            redirect_port,
            token_path: default_token_path()?,
        })
    }

    /// Redirect URI registered with the WHOOP developer application
    #[must_use]
    pub fn redirect_uri(&self) -> String {
        format!("http://localhost:{}/callback", self.redirect_port)
    }
}

/// Token file location: `WHOOPCTL_TOKEN_FILE` override, else
/// `~/.whoopctl/tokens.json`
pub fn default_token_path() -> AppResult<PathBuf> {
    if let Ok(path) = env::var("WHOOPCTL_TOKEN_FILE") {
        return Ok(PathBuf::from(path));
    }
    dirs::home_dir()
        .map(|home| home.join(".whoopctl").join("tokens.json"))
        .ok_or_else(|| AppError::config("Could not determine home directory for token storage"))
}

fn require_var(name: &str) -> AppResult<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::config(format!("{name} environment variable is not set")))
}
