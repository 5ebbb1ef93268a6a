//! Portal CLI Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Command-line client for the data portal backend.
//!
//! # Overview
//!
//! Each dataset page of the portal is a subcommand:
//!
//! - **Health**: report backend availability (`portal ping`)
//! - **IRI**: upload Category-Brand and Items workbooks or trigger processing
//!   (`portal iri category-brand`, `portal iri items`)
//! - **POS / PMR**: trigger ingestion for a start date or a date range
//!   (`portal pos`, `portal pmr`)
//! - **Tables**: create a table schema and populate it from a file
//!   (`portal table create`, `portal table populate`)
//! - **Configuration**: show the effective settings (`portal config show`)
//!
//! The building blocks ([`upload::UploadComponent`], [`forms::FormPage`],
//! [`health::HealthMonitor`]) are usable without the binary.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod forms;
pub mod health;
pub mod progress;
pub mod render;
pub mod upload;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use error::{CliError, Result};
pub use forms::{FormPage, PageForm, PageState};
pub use upload::{UploadComponent, UploadConfig, UploadResult};

use api::ColumnDef;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Portal - upload datasets and trigger processing on the data portal backend
#[derive(Parser, Debug)]
#[command(name = "portal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL (overrides PORTAL_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// TOML config file
    #[arg(long, env = "PORTAL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print only the response payload as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print help as markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether the backend is reachable
    Ping,

    /// IRI uploads
    Iri {
        #[command(subcommand)]
        command: IriCommand,
    },

    /// Trigger POS ingestion
    Pos {
        /// Start date, inclusive (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        since: String,
    },

    /// Trigger PMR ingestion
    Pmr {
        /// Range start, inclusive (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        from: String,

        /// Range end, inclusive (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        to: String,
    },

    /// Create and populate tables
    Table {
        #[command(subcommand)]
        command: TableCommand,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Context fields shared by the IRI pages
#[derive(Args, Debug, Clone)]
pub struct IriArgs {
    /// Data source (e.g. "Big Chain", "Total Market", "Mr Special")
    #[arg(long, default_value = "")]
    pub source: String,

    /// Year (YYYY)
    #[arg(long, default_value = "")]
    pub year: String,

    /// Month name or number (e.g. January or 1)
    #[arg(long, default_value = "")]
    pub month: String,

    /// Workbook(s) to upload (.xlsx); triggers processing when omitted
    #[arg(long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,
}

/// IRI subcommands
#[derive(Subcommand, Debug)]
pub enum IriCommand {
    /// Category-Brand mapping (single workbook)
    CategoryBrand(IriArgs),

    /// Items (one or more workbooks)
    Items(IriArgs),
}

/// Table definition shared by the table subcommands
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Table name
    #[arg(long = "name", default_value = "")]
    pub table: String,

    /// Column as name:type[:nullable|not-null]; repeatable
    #[arg(short = 'c', long = "column", value_name = "COLUMN", value_parser = parse_column)]
    pub columns: Vec<ColumnDef>,

    /// Skip the default id and created_at columns
    #[arg(long)]
    pub no_defaults: bool,
}

/// Table subcommands
#[derive(Subcommand, Debug)]
pub enum TableCommand {
    /// Create a table schema
    Create(TableArgs),

    /// Upload rows (.csv / .xlsx) into a table
    Populate {
        #[command(flatten)]
        table: TableArgs,

        /// File with the rows
        #[arg(long)]
        file: PathBuf,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show all configuration
    Show,
}

fn parse_column(value: &str) -> std::result::Result<ColumnDef, String> {
    value.parse::<ColumnDef>().map_err(|e| e.to_string())
}
