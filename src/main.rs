//! CarPrice CLI
//!
//! Two subcommands: `train` fits a price model from a CSV of listings and
//! writes the artifact; `serve` loads a persisted artifact and serves
//! predictions over HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use carprice_api::{ApiConfig, ApiServer, CarCatalog};
use carprice_core::{
    audit_listings, cross_validate, load_listings, save_artifact, train_price_model,
    ModelRegistry, ModelSchema, TrainingConfig, MIN_TRAINING_ROWS,
};

/// Registry name the serving process looks up.
const MODEL_NAME: &str = "price-prediction";

#[derive(Parser)]
#[command(name = "carprice", version, about = "Car price model training and serving")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Train a price model from a CSV of listings and persist it
    Train {
        /// Path to the listings CSV
        #[arg(long)]
        data: PathBuf,
        /// Where to write the model artifact
        #[arg(long)]
        out: PathBuf,
        /// Fraction of rows held out for evaluation
        #[arg(long, default_value_t = 0.2)]
        test_fraction: f64,
        /// Number of cross-validation folds
        #[arg(long, default_value_t = 5)]
        folds: usize,
        /// Seed for the shuffled split and fold assignment
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Serve predictions from a persisted model artifact
    Serve {
        /// Path to the model artifact
        #[arg(long)]
        model: PathBuf,
        /// Path to the make/model catalog JSON
        #[arg(long)]
        catalog: PathBuf,
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Train {
            data,
            out,
            test_fraction,
            folds,
            seed,
        } => train(data, out, test_fraction, folds, seed),
        Command::Serve {
            model,
            catalog,
            host,
            port,
        } => serve(model, catalog, host, port).await,
    }
}

fn train(data: PathBuf, out: PathBuf, test_fraction: f64, folds: usize, seed: u64) -> Result<()> {
    let config = TrainingConfig {
        test_fraction,
        folds,
        seed,
        ..Default::default()
    };
    config.validate()?;

    let rows = load_listings(&data)
        .with_context(|| format!("failed to load listings from {}", data.display()))?;

    // The audit warns but never blocks; the counts matter more than a hard
    // stop when iterating on a dataset.
    let audit = audit_listings(&rows);
    if audit.issues() > 0 {
        warn!(
            "{} rows violate listing invariants: {} negative prices, {} negative mileages, {} out-of-range years",
            audit.issues(),
            audit.negative_prices,
            audit.negative_mileages,
            audit.out_of_range_years
        );
    }
    if audit.rows <= MIN_TRAINING_ROWS {
        warn!(
            "dataset has {} rows; fewer than {} is thin for training",
            audit.rows, MIN_TRAINING_ROWS
        );
    }

    let outcome = train_price_model(&rows, &config)?;
    cross_validate(&rows, &config)?;

    save_artifact(&outcome.model, &out)?;
    info!("model {} written to {}", outcome.model.id(), out.display());
    Ok(())
}

async fn serve(model: PathBuf, catalog: PathBuf, host: String, port: u16) -> Result<()> {
    let mut registry = ModelRegistry::new();
    registry
        .load_from_artifact(MODEL_NAME, &model, &ModelSchema::car_listings())
        .with_context(|| format!("failed to load model artifact {}", model.display()))?;

    let catalog = CarCatalog::from_file(&catalog)?;
    let config = ApiConfig {
        host,
        port,
        ..Default::default()
    };

    let server = ApiServer::new(config, Arc::new(registry), Arc::new(catalog), MODEL_NAME);
    server.start().await
}
