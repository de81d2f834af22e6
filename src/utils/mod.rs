// ABOUTME: Shared utility modules
// ABOUTME: HTTP client pooling lives here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

pub mod http_client;
