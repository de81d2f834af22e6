// ABOUTME: auth subcommand: login, logout, and status actions
// ABOUTME: login runs the OAuth flow; logout/status only touch the token store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use whoopctl::config::{default_token_path, AppConfig};
use whoopctl::errors::{AppError, AppResult};
use whoopctl::oauth::{self, TokenStore};
use whoopctl::providers::WhoopClient;

/// Route an `auth <action>` invocation
pub async fn dispatch(action: &str) -> AppResult<()> {
    match action {
        "login" => login().await,
        "logout" => oauth::logout(&TokenStore::at(default_token_path()?)),
        "status" => oauth::status(&TokenStore::at(default_token_path()?)),
        other => Err(AppError::UnknownCommand(format!("auth {other}"))),
    }
}

async fn login() -> AppResult<()> {
    let config = AppConfig::from_env()?;
    let store = TokenStore::at(config.token_path.clone());
    oauth::login(&WhoopClient::provider_config(), &config, &store).await
}
