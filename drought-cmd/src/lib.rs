//! Command implementations for the drought dashboard CLI.
//!
//! Each subcommand loads the prediction dataset once, runs one synchronous
//! operation over it and prints the result as JSON on stdout.

use clap::{Args, Subcommand};
use drought_core::period::Period;
use serde::Serialize;
use std::path::PathBuf;

pub mod context;
pub mod map;
pub mod predict;
pub mod selection;

/// Where to find the dataset and configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Path or http(s) URL of the prediction JSON (overrides the config)
    #[arg(short = 'd', long)]
    pub data: Option<String>,

    /// Dashboard config JSON file (defaults to the built-in config)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List states that have prediction data
    States {
        #[command(flatten)]
        data: DataArgs,
    },

    /// List the districts of a state
    Districts {
        #[command(flatten)]
        data: DataArgs,

        #[arg(short = 's', long)]
        state: String,
    },

    /// List the map periods (YYYY-M) within the configured years
    Periods {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Print every selection-control option list
    Options {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Aggregate one state's districts for a period into a category and marker
    Aggregate {
        #[command(flatten)]
        data: DataArgs,

        #[arg(short = 's', long)]
        state: String,

        /// Period as YYYY-M, e.g. 2025-3
        #[arg(short = 'p', long)]
        period: Period,
    },

    /// Build the whole-country map (one marker per state) for a period
    Map {
        #[command(flatten)]
        data: DataArgs,

        /// Period as YYYY-M, e.g. 2025-3
        #[arg(short = 'p', long)]
        period: Period,
    },

    /// Look up a single district prediction for the results panel
    Predict {
        #[command(flatten)]
        data: DataArgs,

        #[arg(short = 's', long)]
        state: String,

        #[arg(short = 'D', long)]
        district: String,

        #[arg(short = 'm', long)]
        month: u32,

        #[arg(short = 'y', long)]
        year: i32,

        /// Seed for placeholder generation
        #[arg(long)]
        seed: Option<u64>,

        /// Never synthesize a placeholder when the dataset has no match
        #[arg(long)]
        no_synthetic: bool,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::States { data } => {
            let ctx = context::Context::load(&data).await?;
            print_json(&selection::states(&ctx))
        }
        Command::Districts { data, state } => {
            let ctx = context::Context::load(&data).await?;
            print_json(&selection::districts(&ctx, &state))
        }
        Command::Periods { data } => {
            let ctx = context::Context::load(&data).await?;
            print_json(&selection::periods(&ctx))
        }
        Command::Options { data } => {
            let ctx = context::Context::load(&data).await?;
            print_json(&selection::options(&ctx))
        }
        Command::Aggregate {
            data,
            state,
            period,
        } => {
            let ctx = context::Context::load(&data).await?;
            print_json(&map::aggregate_state(&ctx, &state, period))
        }
        Command::Map { data, period } => {
            let ctx = context::Context::load(&data).await?;
            print_json(&map::map_overview(&ctx, period))
        }
        Command::Predict {
            data,
            state,
            district,
            month,
            year,
            seed,
            no_synthetic,
        } => {
            let ctx = context::Context::load(&data).await?;
            let request = predict::PredictRequest {
                state,
                district,
                month,
                year,
                seed,
                allow_synthetic: ctx.config.allow_synthetic && !no_synthetic,
            };
            print_json(&predict::predict(&ctx, &request)?)
        }
    }
}
