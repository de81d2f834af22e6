// ABOUTME: Unified error type for the whoopctl library and binary
// ABOUTME: Maps error kinds to process exit codes at the CLI boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use thiserror::Error;

/// Result alias used throughout the crate
pub type AppResult<T> = Result<T, AppError>;

/// All error conditions surfaced by whoopctl
#[derive(Debug, Error)]
pub enum AppError {
    /// User-supplied date failed ISO-8601 validation. Raised before any
    /// network access.
    #[error("Invalid date format: '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),

    /// Unrecognized CLI verb or auth action
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Missing or malformed configuration (environment variables)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication failure: no stored token, expired token that could
    /// not be refreshed, or an OAuth flow error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// WHOOP API rate limit (HTTP 429)
    #[error("WHOOP API rate limit exceeded, retry in {retry_after_secs}s")]
    RateLimited {
        /// Suggested wait before retrying
        retry_after_secs: u64,
    },

    /// Non-success response from the WHOOP API
    #[error("WHOOP API request failed with status {status}: {message}")]
    Api {
        /// HTTP status code returned by the API
        status: u16,
        /// Response body (may be empty)
        message: String,
    },

    /// Transport-level failure (DNS, TLS, timeout, connection reset)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Local I/O failure (token store, callback socket)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code for this error.
    ///
    /// 1 = general error, 2 = authentication, 3 = network/API.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidDate(_)
            | Self::UnknownCommand(_)
            | Self::Config(_)
            | Self::Io(_)
            | Self::Serialization(_) => 1,
            Self::Auth(_) => 2,
            Self::RateLimited { .. } | Self::Api { .. } | Self::Network(_) => 3,
        }
    }

    /// Shorthand for an authentication error with an owned message
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Shorthand for a configuration error with an owned message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
