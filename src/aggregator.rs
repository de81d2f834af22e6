// ABOUTME: Merges per-type fetches into one dated Snapshot
// ABOUTME: Concurrent per-type requests, all-or-nothing failure semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::errors::AppResult;
use crate::models::{DateQuery, FetchOptions, ResourceType, Snapshot};
use crate::providers::ResourceFetcher;
use std::collections::HashSet;
use tracing::debug;

/// The fixed type set the `summary` command aggregates
pub const SUMMARY_TYPES: [ResourceType; 4] = [
    ResourceType::Recovery,
    ResourceType::Sleep,
    ResourceType::Cycle,
    ResourceType::Workout,
];

/// Fetch every requested resource type and merge the results into one
/// [`Snapshot`] keyed by the query's start date.
///
/// An empty `types` slice means "all known types". The per-type fetches
/// run concurrently and are independent; the merge waits for all of them,
/// and the first failure aborts the whole aggregation — no partial
/// snapshot is ever returned. Types whose fetch yields zero records leave
/// their snapshot field absent.
pub async fn aggregate<F: ResourceFetcher>(
    fetcher: &F,
    types: &[ResourceType],
    query: &DateQuery,
    options: FetchOptions,
) -> AppResult<Snapshot> {
    let requested: HashSet<ResourceType> = if types.is_empty() {
        ResourceType::ALL.into_iter().collect()
    } else {
        types.iter().copied().collect()
    };

    debug!("Aggregating {} resource types for {:?}", requested.len(), query);

    let profile = async {
        if requested.contains(&ResourceType::Profile) {
            fetcher.fetch_profile().await
        } else {
            Ok(None)
        }
    };
    let body = async {
        if requested.contains(&ResourceType::Body) {
            fetcher.fetch_body().await
        } else {
            Ok(None)
        }
    };
    let recovery = async {
        if requested.contains(&ResourceType::Recovery) {
            fetcher.fetch_recovery(query, options).await
        } else {
            Ok(Vec::new())
        }
    };
    let sleep = async {
        if requested.contains(&ResourceType::Sleep) {
            fetcher.fetch_sleep(query, options).await
        } else {
            Ok(Vec::new())
        }
    };
    let workout = async {
        if requested.contains(&ResourceType::Workout) {
            fetcher.fetch_workouts(query, options).await
        } else {
            Ok(Vec::new())
        }
    };
    let cycle = async {
        if requested.contains(&ResourceType::Cycle) {
            fetcher.fetch_cycles(query, options).await
        } else {
            Ok(Vec::new())
        }
    };

    let (profile, body, recovery, sleep, workout, cycle) =
        tokio::try_join!(profile, body, recovery, sleep, workout, cycle)?;

    Ok(Snapshot {
        date: query.key_date(),
        profile,
        body,
        recovery: non_empty(recovery),
        sleep: non_empty(sleep),
        workout: non_empty(workout),
        cycle: non_empty(cycle),
    })
}

/// Empty fetch results are represented as absent fields, never as empty
/// sequences, so renderers only ever branch on presence.
fn non_empty<T>(records: Vec<T>) -> Option<Vec<T>> {
    if records.is_empty() {
        None
    } else {
        Some(records)
    }
}
