//! xel CLI - Command-line interface for the xel element model

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{construct, demo, list, schema};
use config::{CliOverrides, XelConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "xel")]
#[command(about = "Typed element and attribute model", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a schemas directory (repeatable)
    #[arg(long, global = true)]
    schemas: Vec<PathBuf>,

    /// Log filter, e.g. "debug" or "xel_schema=trace"
    #[arg(long, global = true)]
    log: Option<String>,

    /// Project config file
    #[arg(long, global = true, default_value = "xel.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered element types
    List,

    /// Show schema information
    Schema {
        /// Element type name
        name: String,
    },

    /// Construct an element from markup and inspect its attributes
    Construct {
        /// Element expression, e.g. '<button label="Save" count={3} />'
        markup: String,

        /// Set an attribute after construction
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,

        /// Print only these attributes
        #[arg(long = "get", value_name = "NAME")]
        get: Vec<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Construct the built-in demo element and run its behavior
    Demo {
        /// Markup for the demo element
        #[arg(default_value = r#"<my-element b="hi" />"#)]
        markup: String,
    },
}

fn init_logging(filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_new(filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = XelConfig::load(
        Path::new(&cli.config),
        CliOverrides {
            schemas: cli.schemas,
            log: cli.log,
        },
    )?;
    init_logging(&config.log_level);
    tracing::debug!(?config, "configuration resolved");

    match cli.command {
        Commands::List => list::run(&config.schema_paths),
        Commands::Schema { name } => schema::run(&name, &config.schema_paths),
        Commands::Construct {
            markup,
            set,
            get,
            format,
        } => construct::run(construct::ConstructArgs {
            markup,
            set,
            get,
            format,
            schemas: config.schema_paths,
        }),
        Commands::Demo { markup } => demo::run(&markup),
    }
}
