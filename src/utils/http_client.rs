// ABOUTME: Shared HTTP client with connection pooling and timeout configuration
// ABOUTME: One reqwest client per process, reused across all API and OAuth calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;

static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get or create the shared HTTP client.
///
/// Uses connection pooling and reasonable timeouts; prefer this over
/// constructing new clients per request.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}
