// ABOUTME: whoopctl binary - command surface for WHOOP health data
// ABOUTME: Parses the CLI, wires the client/aggregator/renderers, maps errors to exit codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
//!
//! Usage:
//! ```bash
//! # Authenticate (requires WHOOP_CLIENT_ID / WHOOP_CLIENT_SECRET)
//! whoopctl auth login
//!
//! # Today's sleep as JSON, or as a readable report
//! whoopctl sleep
//! whoopctl sleep --pretty
//!
//! # A specific day, a range, or every page of workouts
//! whoopctl recovery --date 2024-06-01
//! whoopctl workout --start 2024-06-01 --end 2024-06-07 --all
//!
//! # Combined snapshot (all types unless flags select a subset)
//! whoopctl --pretty
//! whoopctl --sleep --recovery
//!
//! # One-line summary
//! whoopctl summary --date 2024-06-01
//! ```

mod commands;

use clap::{Args, Parser, Subcommand};
use whoopctl::dates::{resolve_date, resolve_query};
use whoopctl::errors::AppResult;
use whoopctl::models::{DateQuery, FetchOptions, ResourceType, TypeSelection};

#[derive(Parser)]
#[command(
    name = "whoopctl",
    about = "CLI for fetching WHOOP health data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Date in ISO format (YYYY-MM-DD)
    #[arg(long, short = 'd')]
    date: Option<String>,

    /// Max results per page
    #[arg(long, short = 'l', default_value_t = 25)]
    limit: u32,

    /// Fetch all pages
    #[arg(long, short = 'a')]
    all: bool,

    /// Human-readable output
    #[arg(long, short = 'p')]
    pretty: bool,

    #[command(flatten)]
    include: IncludeArgs,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// Per-type inclusion flags for the combined default command
#[derive(Args)]
struct IncludeArgs {
    /// Include sleep data
    #[arg(long)]
    sleep: bool,

    /// Include recovery data
    #[arg(long)]
    recovery: bool,

    /// Include workout data
    #[arg(long)]
    workout: bool,

    /// Include cycle data
    #[arg(long)]
    cycle: bool,

    /// Include profile data
    #[arg(long)]
    profile: bool,

    /// Include body measurements
    #[arg(long)]
    body: bool,
}

impl IncludeArgs {
    fn to_selection(&self) -> TypeSelection {
        TypeSelection {
            sleep: self.sleep,
            recovery: self.recovery,
            workout: self.workout,
            cycle: self.cycle,
            profile: self.profile,
            body: self.body,
        }
    }
}

/// Shared flags for the per-type data subcommands
#[derive(Args)]
struct DataArgs {
    /// Date in ISO format (YYYY-MM-DD)
    #[arg(long, short = 'd')]
    date: Option<String>,

    /// Start date for a range query
    #[arg(long, short = 's')]
    start: Option<String>,

    /// End date for a range query
    #[arg(long, short = 'e')]
    end: Option<String>,

    /// Max results per page
    #[arg(long, short = 'l', default_value_t = 25)]
    limit: u32,

    /// Fetch all pages
    #[arg(long, short = 'a')]
    all: bool,

    /// Human-readable output
    #[arg(long, short = 'p')]
    pretty: bool,
}

impl DataArgs {
    /// Validate and resolve the date flags; aborts before any fetch on
    /// invalid input
    fn to_query(&self) -> AppResult<DateQuery> {
        resolve_query(self.date.as_deref(), self.start.as_deref(), self.end.as_deref())
    }

    const fn to_options(&self) -> FetchOptions {
        FetchOptions {
            limit: self.limit,
            all: self.all,
        }
    }
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Manage authentication (login, logout, or status)
    Auth {
        /// login, logout, or status
        action: String,
    },

    /// Get sleep data
    Sleep(DataArgs),

    /// Get recovery data
    Recovery(DataArgs),

    /// Get workout data
    Workout(DataArgs),

    /// Get cycle data
    Cycle(DataArgs),

    /// Get profile data
    Profile(DataArgs),

    /// Get body measurements
    Body(DataArgs),

    /// One-line health snapshot
    Summary {
        /// Date in ISO format (YYYY-MM-DD)
        #[arg(long, short = 'd')]
        date: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    match cli.command {
        Some(Command::Auth { action }) => commands::auth::dispatch(&action).await,
        Some(Command::Sleep(args)) => single_type(ResourceType::Sleep, &args).await,
        Some(Command::Recovery(args)) => single_type(ResourceType::Recovery, &args).await,
        Some(Command::Workout(args)) => single_type(ResourceType::Workout, &args).await,
        Some(Command::Cycle(args)) => single_type(ResourceType::Cycle, &args).await,
        Some(Command::Profile(args)) => single_type(ResourceType::Profile, &args).await,
        Some(Command::Body(args)) => single_type(ResourceType::Body, &args).await,
        Some(Command::Summary { date }) => commands::data::summary(date.as_deref()).await,
        None => {
            let query = DateQuery::Day(resolve_date(cli.date.as_deref())?);
            let options = FetchOptions {
                limit: cli.limit,
                all: cli.all,
            };
            let types = cli.include.to_selection().to_types();
            commands::data::fetch(&types, &query, options, cli.pretty).await
        }
    }
}

async fn single_type(resource: ResourceType, args: &DataArgs) -> AppResult<()> {
    let query = args.to_query()?;
    commands::data::fetch(&[resource], &query, args.to_options(), args.pretty).await
}
