//! CarCompare - search a vehicle catalog and compare trims side by side
//!
//! The binary is a thin boundary: it resolves configuration, installs
//! logging, loads the catalog once and renders what the core returns.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use carcompare_core::catalog::{CatalogStore, EntityId};
use carcompare_core::config::CatalogConfig;

mod catalog_cli;
mod compare_cli;

/// Core modules that can be traced
#[derive(Debug, Clone, ValueEnum)]
enum TraceModule {
    Store,
    Query,
    Compare,
    All,
}

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "carcompare",
    about = "Search a vehicle catalog and compare trims side by side",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Catalog data file (overrides CARCOMPARE_DATA and config files)
    #[clap(long, global = true)]
    data: Option<PathBuf>,

    /// Configuration file to use instead of carcompare.yml discovery
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Enable tracing (comma-separated: store,query,compare,all)
    #[clap(long, value_delimiter = ',', global = true)]
    trace: Vec<TraceModule>,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Output results as JSON instead of a table
    #[clap(long, global = true)]
    json: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// List all brands
    Brands,

    /// List the models of a brand
    Models {
        /// Brand id
        brand_id: EntityId,
    },

    /// List the generations of a model
    Generations {
        /// Model id
        model_id: EntityId,
    },

    /// List the trims of a generation
    Trims {
        /// Generation id
        generation_id: EntityId,
    },

    /// Show a generation with its brand, model and trims
    Generation {
        /// Generation id
        id: EntityId,
    },

    /// Show a trim with its technical details
    Trim {
        /// Trim id
        id: EntityId,
    },

    /// Search generations by brand, model, years and trim attributes
    Search(catalog_cli::SearchArgs),

    /// Compare up to four trims and highlight the best and worst values
    Compare {
        /// Trim ids (comma-separated, e.g. 1,2,5)
        #[clap(value_delimiter = ',', required = true)]
        ids: Vec<EntityId>,
    },

    /// Show catalog entity counts
    Stats,
}

fn initialize_tracing(log_level: &LogLevel, trace_modules: &[TraceModule]) {
    let mut filter = EnvFilter::new(log_level.to_filter_directive());

    for module in trace_modules {
        let directive = match module {
            TraceModule::Store => "carcompare_core::catalog=trace",
            TraceModule::Query => "carcompare_core::query=trace",
            TraceModule::Compare => "carcompare_core::compare=trace",
            TraceModule::All => "carcompare_core=trace",
        };

        if let Ok(parsed) = directive.parse() {
            filter = filter.add_directive(parsed);
        }
    }

    if !trace_modules.is_empty() {
        // JSON output for structured tracing - MUST go to stderr
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .init();

        tracing::info!(trace_modules = ?trace_modules, "Tracing enabled");
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve configuration and load the catalog it points at
fn load_catalog(cli: &Cli) -> Result<(CatalogConfig, CatalogStore)> {
    let project_dir = std::env::current_dir().context("Failed to determine current directory")?;
    let config = CatalogConfig::discover(cli.config.as_deref(), &project_dir)
        .with_data_path(cli.data.clone());
    debug!(?config, "Resolved configuration");

    let store = CatalogStore::new();
    store.load_from_path(&config.data_path).with_context(|| {
        format!(
            "Failed to load catalog data from {}",
            config.data_path.display()
        )
    })?;

    Ok((config, store))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level, &cli.trace);

    let (config, store) = load_catalog(&cli)?;
    let json = cli.json;

    match cli.command {
        Command::Brands => catalog_cli::list_brands(&store, json),
        Command::Models { brand_id } => catalog_cli::list_models(&store, brand_id, json),
        Command::Generations { model_id } => {
            catalog_cli::list_generations(&store, model_id, json)
        }
        Command::Trims { generation_id } => {
            catalog_cli::list_trims(&store, generation_id, json)
        }
        Command::Generation { id } => catalog_cli::show_generation(&store, id, json),
        Command::Trim { id } => catalog_cli::show_trim(&store, id, json),
        Command::Search(args) => catalog_cli::execute_search(&store, &config, args, json),
        Command::Compare { ids } => compare_cli::execute_compare(&store, &config, &ids, json),
        Command::Stats => catalog_cli::show_stats(&store, json),
    }
}
