// ABOUTME: OAuth2 token type, on-disk token store, and the interactive login flow
// ABOUTME: Implements the authorization-code flow with a one-shot localhost callback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::providers::ProviderConfig;
use crate::utils::http_client::shared_client;
use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};
use url::Url;

/// OAuth 2.0 token set with expiration and refresh capabilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuth2Token {
    /// The access token string
    pub access_token: String,
    /// Token type (usually "Bearer")
    pub token_type: String,
    /// Expiration timestamp (UTC)
    pub expires_at: Option<DateTime<Utc>>,
    /// Refresh token for obtaining new access tokens
    pub refresh_token: Option<String>,
    /// Granted OAuth scopes
    pub scope: Option<String>,
}

impl OAuth2Token {
    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at <= Utc::now())
    }

    /// Check if the token will expire within 5 minutes
    #[must_use]
    pub fn will_expire_soon(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at <= Utc::now() + Duration::minutes(5))
    }

    /// Build a token set from a token-endpoint response
    #[must_use]
    pub fn from_response(response: TokenResponse) -> Self {
        let expires_at = response
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs));
        Self {
            access_token: response.access_token,
            token_type: response.token_type.unwrap_or_else(|| "Bearer".to_owned()),
            expires_at,
            refresh_token: response.refresh_token,
            scope: response.scope,
        }
    }
}

/// Wire format of the WHOOP token endpoint
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// Access token string
    pub access_token: String,
    /// Token type, normally "Bearer"
    pub token_type: Option<String>,
    /// Seconds until expiry
    pub expires_in: Option<i64>,
    /// Rotated refresh token
    pub refresh_token: Option<String>,
    /// Granted scopes
    pub scope: Option<String>,
}

/// JSON-file persistence for the OAuth token set
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Token store at an explicit path
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path the store reads and writes
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored token set; `None` when no token has been saved
    pub fn load(&self) -> AppResult<Option<OAuth2Token>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let token = serde_json::from_str(&raw)?;
        Ok(Some(token))
    }

    /// Persist a token set, creating parent directories as needed.
    /// The file is private to the user (0600 on unix).
    pub fn save(&self, token: &OAuth2Token) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(token)?;
        fs::write(&self.path, raw)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        debug!("Saved OAuth token to {}", self.path.display());
        Ok(())
    }

    /// Delete the stored token set; returns whether a token existed
    pub fn clear(&self) -> AppResult<bool> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            return Ok(true);
        }
        Ok(false)
    }
}

/// Run the interactive OAuth2 authorization-code login flow.
///
/// Prints the authorization URL, waits for the provider to redirect the
/// browser to the localhost callback, exchanges the code for tokens, and
/// persists them in `store`.
pub async fn login(
    provider: &ProviderConfig,
    config: &AppConfig,
    store: &TokenStore,
) -> AppResult<()> {
    let state = random_state();
    let redirect_uri = config.redirect_uri();
    let auth_url = authorization_url(provider, config, &redirect_uri, &state);

    println!("Open this URL in your browser to authorize whoopctl:");
    println!();
    println!("  {auth_url}");
    println!();
    println!("Waiting for the callback on {redirect_uri} ...");

    let callback = wait_for_callback(config.redirect_port).await?;

    if callback.state.as_deref() != Some(state.as_str()) {
        return Err(AppError::auth("OAuth state mismatch in callback"));
    }

    info!("Authorization code received, exchanging for tokens");
    let token = exchange_code(provider, config, &redirect_uri, &callback.code).await?;
    store.save(&token)?;

    println!("Login successful. Tokens saved to {}", store.path().display());
    Ok(())
}

/// Delete stored credentials
pub fn logout(store: &TokenStore) -> AppResult<()> {
    if store.clear()? {
        println!("Logged out. Removed {}", store.path().display());
    } else {
        println!("No stored credentials found.");
    }
    Ok(())
}

/// Report authentication status to stdout
pub fn status(store: &TokenStore) -> AppResult<()> {
    match store.load()? {
        None => println!("Not logged in. Run `whoopctl auth login`."),
        Some(token) => {
            if token.is_expired() {
                println!("Logged in, but the access token is expired.");
            } else if token.will_expire_soon() {
                println!("Logged in; the access token expires within 5 minutes.");
            } else {
                println!("Logged in.");
            }
            if let Some(expires_at) = token.expires_at {
                println!("  Expires: {expires_at}");
            }
            if let Some(scope) = &token.scope {
                println!("  Scopes:  {scope}");
            }
            if token.refresh_token.is_some() {
                println!("  Refresh token available (auto-refresh enabled).");
            }
        }
    }
    Ok(())
}

/// Exchange an authorization code at the token endpoint
pub async fn exchange_code(
    provider: &ProviderConfig,
    config: &AppConfig,
    redirect_uri: &str,
    code: &str,
) -> AppResult<OAuth2Token> {
    let params = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("redirect_uri", redirect_uri),
    ];

    let response = shared_client()
        .post(&provider.token_url)
        .form(&params)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::auth(format!(
            "token exchange failed with status {status}: {body}"
        )));
    }

    let token_response: TokenResponse = response.json().await?;
    Ok(OAuth2Token::from_response(token_response))
}

/// Build the provider authorization URL with scopes and a state nonce
fn authorization_url(
    provider: &ProviderConfig,
    config: &AppConfig,
    redirect_uri: &str,
    state: &str,
) -> String {
    let scope = provider.default_scopes.join(" ");
    format!(
        "{}?response_type=code&client_id={}&redirect_uri={}&scope={}&state={}",
        provider.auth_url,
        urlencoding::encode(&config.client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode(&scope),
        urlencoding::encode(state),
    )
}

/// Random state nonce for CSRF protection
fn random_state() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

struct CallbackParams {
    code: String,
    state: Option<String>,
}

/// Accept one OAuth redirect on localhost and extract `code`/`state`.
///
/// Ignores unrelated requests (favicon probes) and keeps listening until
/// a `/callback` request arrives.
async fn wait_for_callback(port: u16) -> AppResult<CallbackParams> {
    let listener = TcpListener::bind(("127.0.0.1", port)).await.map_err(|e| {
        AppError::auth(format!("could not bind callback listener on port {port}: {e}"))
    })?;

    loop {
        let (stream, peer) = listener.accept().await?;
        debug!("Callback connection from {peer}");

        let mut stream = BufReader::new(stream);
        let mut request_line = String::new();
        stream.read_line(&mut request_line).await?;

        // "GET /callback?code=...&state=... HTTP/1.1"
        let Some(target) = request_line.split_whitespace().nth(1) else {
            warn!("Malformed callback request line, ignoring connection");
            continue;
        };

        if !target.starts_with("/callback") {
            respond(stream.get_mut(), 404, "Not Found").await?;
            continue;
        }

        let url = Url::parse(&format!("http://localhost{target}"))
            .map_err(|e| AppError::auth(format!("unparseable callback URL: {e}")))?;

        let mut code = None;
        let mut state = None;
        let mut error = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                _ => {}
            }
        }

        if let Some(error) = error {
            respond(stream.get_mut(), 200, "Authorization failed. You can close this tab.")
                .await?;
            return Err(AppError::auth(format!("provider reported: {error}")));
        }

        let Some(code) = code else {
            respond(stream.get_mut(), 400, "Missing authorization code.").await?;
            return Err(AppError::auth("callback missing authorization code"));
        };

        respond(
            stream.get_mut(),
            200,
            "Authorization complete. You can close this tab and return to the terminal.",
        )
        .await?;
        return Ok(CallbackParams { code, state });
    }
}

async fn respond(
    stream: &mut tokio::net::TcpStream,
    status: u16,
    body: &str,
) -> AppResult<()> {
    let reason = if status == 200 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len(),
    );
    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}
