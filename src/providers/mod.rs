// ABOUTME: Provider module: the fetch seam and the WHOOP implementation
// ABOUTME: Traits here let the aggregator and tests run against stub backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

pub mod core;
pub mod whoop;

pub use core::{ProviderConfig, ResourceFetcher};
pub use whoop::WhoopClient;
