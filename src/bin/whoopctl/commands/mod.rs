// ABOUTME: Command implementations for the whoopctl binary
// ABOUTME: auth (login/logout/status) and data (fetch/summary)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

pub mod auth;
pub mod data;
