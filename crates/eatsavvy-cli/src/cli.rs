//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// EatSavvy CLI - Browse, search and enrich the restaurant directory.
#[derive(Debug, Parser)]
#[command(name = "eatsavvy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "EATSAVVY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Log request and state transitions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every restaurant in the directory
    List(ListArgs),

    /// Search the directory
    Search(SearchArgs),

    /// Request enrichment for restaurants
    Enrich(EnrichArgs),

    /// Show opening hours in local time
    Hours(HoursArgs),

    /// Check that the directory service is reachable
    Ping,

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the list command.
#[derive(Debug, Default, Parser)]
pub struct ListArgs {
    /// Narrow the list locally by name, phone or address
    #[arg(long)]
    pub filter: Option<String>,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Search query text; a blank query lists everything
    #[arg(num_args = 0.., trailing_var_arg = true)]
    pub query: Vec<String>,
}

/// Arguments for the enrich command.
#[derive(Debug, Parser)]
pub struct EnrichArgs {
    /// Restaurant IDs to enrich
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Arguments for the hours command.
#[derive(Debug, Parser)]
pub struct HoursArgs {
    /// Restaurant ID
    pub id: String,

    /// UTC offset in minutes, overriding the profile and host offset
    #[arg(long, allow_hyphen_values = true)]
    pub offset: Option<i32>,
}

/// Arguments for profile management.
#[derive(Debug, PartialEq, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, PartialEq, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Directory service URL
        #[arg(short, long)]
        url: String,
        /// API key
        #[arg(short = 'k', long)]
        api_key: Option<String>,
        /// Fixed UTC offset in minutes
        #[arg(long, allow_hyphen_values = true)]
        utc_offset: Option<i32>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl SearchArgs {
    /// Query words joined back into one string
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
