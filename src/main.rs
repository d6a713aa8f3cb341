//! # Rig Advisor CLI (`rig`)
//!
//! The `rig` binary is the primary interface for Rig Advisor. It provides
//! commands for recommending builds, refitting the similarity model, and
//! inspecting the catalog.
//!
//! ## Usage
//!
//! ```bash
//! rig --config ./config/rig.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `rig recommend <BUDGET> <USE_CASE>` | Recommend a CPU + GPU pair |
//! | `rig train` | Refit the description model and smoke-test scenarios |
//! | `rig catalog` | Show table counts, price ranges, vocabulary size |
//!
//! ## Examples
//!
//! ```bash
//! # Gaming build under $1500
//! rig recommend 1500 gaming
//!
//! # Steer the pick with free text, machine-readable output
//! rig recommend 2000 development --hint "many VMs" --json
//!
//! # Verify the tables parse and the pipeline works end to end
//! rig train
//! ```

mod catalog;
mod config;
mod logging;
mod models;
mod recommend;
mod stats;
mod tfidf;
mod train;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::Build;

/// Rig Advisor CLI — budget-aware PC part recommendations over a CSV catalog.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. When the file does not exist, catalog tables are read from the
/// default `./data/components/` locations.
#[derive(Parser)]
#[command(
    name = "rig",
    about = "Rig Advisor — budget-aware PC part recommendations over a CSV catalog",
    version,
    long_about = "Rig Advisor loads a CPU and a GPU table, fits a TF-IDF model over canonical \
    part descriptions, and recommends the best CPU + GPU pair for a budget and workload by \
    combining text similarity with a spec fit score."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/rig.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Recommend a CPU + GPU pair for a budget and use case.
    ///
    /// Splits the budget between the classes by use-case weights, keeps the
    /// parts that fit their share, and picks the top-scoring part per class.
    /// A class with nothing affordable is reported as absent.
    Recommend {
        /// Total budget, in the catalog's currency units.
        budget: f64,

        /// Workload label: gaming, productivity, streaming, design,
        /// development. Anything else gets a balanced profile.
        use_case: String,

        /// Free-text preferences folded into the similarity query.
        #[arg(long)]
        hint: Option<String>,

        /// Emit the build as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Refit the description model and smoke-test fixed scenarios.
    ///
    /// Reloads the catalog, fits the TF-IDF model from scratch, and runs a
    /// fixed set of recommendation scenarios end to end.
    Train,

    /// Show catalog row counts, price ranges, and vocabulary size.
    Catalog,
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    let cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        config::Config::minimal()
    };

    match cli.command {
        Commands::Recommend {
            budget,
            use_case,
            hint,
            json,
        } => {
            // The engine treats a non-positive budget as "nothing eligible";
            // at the CLI edge it is an input error instead.
            if !budget.is_finite() || budget <= 0.0 {
                anyhow::bail!("budget must be a positive number, got {}", budget);
            }

            let mut cache = catalog::CatalogCache::new();
            let engine = cache.get_or_load(&cfg.catalog)?;
            let build = engine.recommend(budget, &use_case, hint.as_deref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&build)?);
            } else {
                print_build(&build);
            }
        }
        Commands::Train => train::run_train(&cfg)?,
        Commands::Catalog => stats::run_catalog(&cfg)?,
    }

    Ok(())
}

fn print_build(build: &Build) {
    match &build.cpu {
        Some(cpu) => {
            println!("CPU: {} {} (${})", cpu.brand, cpu.model, cpu.price);
            println!("  cores/threads: {}/{}", cpu.cores, cpu.threads);
            println!("  boost: {}GHz  tdp: {}W", cpu.boost_clock, cpu.tdp);
            print_links(&cpu.amazon_link, &cpu.flipkart_link);
        }
        None => println!("CPU: no suitable part within budget"),
    }

    println!();

    match &build.gpu {
        Some(gpu) => {
            println!("GPU: {} {} (${})", gpu.brand, gpu.model, gpu.price);
            println!("  memory: {}GB {}", gpu.memory, gpu.memory_type);
            println!("  boost: {}MHz  tdp: {}W", gpu.boost_clock, gpu.tdp);
            print_links(&gpu.amazon_link, &gpu.flipkart_link);
        }
        None => println!("GPU: no suitable part within budget"),
    }

    println!();
    println!("Total: ${}", build.total_price);
}

fn print_links(amazon: &str, flipkart: &str) {
    if !amazon.is_empty() {
        println!("  buy: {}", amazon);
    }
    if !flipkart.is_empty() {
        println!("       {}", flipkart);
    }
}
