// ABOUTME: Library entry point for whoopctl
// ABOUTME: WHOOP API client, snapshot aggregation, and rendering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # whoopctl
//!
//! A command-line client for WHOOP health data. The library provides:
//!
//! - **Providers**: the [`providers::ResourceFetcher`] seam and the
//!   [`providers::WhoopClient`] implementation against the WHOOP
//!   developer API
//! - **OAuth2**: authorization-code login, token persistence, and
//!   automatic refresh
//! - **Aggregation**: merging per-type fetches into one dated
//!   [`models::Snapshot`]
//! - **Formatters**: structured JSON, a human-readable report, and a
//!   one-line summary
//!
//! The `whoopctl` binary wires these together behind a clap command
//! surface.

pub mod aggregator;
pub mod config;
pub mod dates;
pub mod errors;
pub mod formatters;
pub mod models;
pub mod oauth;
pub mod providers;
pub mod utils;
