// ABOUTME: Data commands: aggregate requested resource types and print the snapshot
// ABOUTME: Structured JSON by default, report with --pretty, one-liner for summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use whoopctl::aggregator::{aggregate, SUMMARY_TYPES};
use whoopctl::config::AppConfig;
use whoopctl::dates::resolve_date;
use whoopctl::errors::AppResult;
use whoopctl::formatters::{render_report, render_structured, render_summary};
use whoopctl::models::{DateQuery, FetchOptions, ResourceType};
use whoopctl::oauth::TokenStore;
use whoopctl::providers::WhoopClient;

fn build_client() -> AppResult<WhoopClient> {
    let config = AppConfig::from_env()?;
    let store = TokenStore::at(config.token_path.clone());
    Ok(WhoopClient::new(config, store))
}

/// Aggregate `types` (empty = all) for the query window and print the
/// snapshot to stdout
pub async fn fetch(
    types: &[ResourceType],
    query: &DateQuery,
    options: FetchOptions,
    pretty: bool,
) -> AppResult<()> {
    let client = build_client()?;
    let snapshot = aggregate(&client, types, query, options).await?;
    let output = if pretty {
        render_report(&snapshot)
    } else {
        render_structured(&snapshot)?
    };
    println!("{output}");
    Ok(())
}

/// Aggregate the summary type set for one day and print the one-liner
pub async fn summary(date: Option<&str>) -> AppResult<()> {
    let query = DateQuery::Day(resolve_date(date)?);
    let client = build_client()?;
    let snapshot = aggregate(&client, &SUMMARY_TYPES, &query, FetchOptions::default()).await?;
    println!("{}", render_summary(&snapshot));
    Ok(())
}
