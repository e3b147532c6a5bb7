//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use recordspec_schemas::RecordType;
use std::path::PathBuf;

/// Recordspec CLI - conditional validation of vendor and customer records
///
/// Validates business records against schemas whose requirements depend on
/// the record itself, and writes out the bundled reference schemas.
#[derive(Parser, Debug)]
#[command(
    name = "recordspec",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "RECORDSPEC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format, else human)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a record against a schema
    Validate(ValidateArgs),

    /// Print a bundled reference schema
    Schema(SchemaArgs),

    /// Write the bundled schemas and their sample records to disk
    Samples(SamplesArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the record file (JSON or YAML)
    #[arg(value_name = "RECORD")]
    pub record: PathBuf,

    /// Bundled schema name (vendor, customer) or path to a schema file
    #[arg(short, long, value_name = "SCHEMA")]
    pub schema: Option<String>,

    /// Show expected and found values, and echo the record
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for the schema command
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Which bundled schema to print
    #[arg(value_enum, value_name = "RECORD_TYPE")]
    pub record_type: RecordTypeArg,

    /// Write the schema to a file instead of stdout
    #[arg(long = "save-to", value_name = "PATH")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the samples command
#[derive(Parser, Debug)]
pub struct SamplesArgs {
    /// Directory to write `<type>_schema/` folders into
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl OutputFormat {
    /// Parse a format name as written in a config file
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

/// Bundled record types selectable on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RecordTypeArg {
    /// Standard on Vendor Record
    Vendor,
    /// Standard on Customer Records
    Customer,
}

impl From<RecordTypeArg> for RecordType {
    fn from(arg: RecordTypeArg) -> Self {
        match arg {
            RecordTypeArg::Vendor => RecordType::Vendor,
            RecordTypeArg::Customer => RecordType::Customer,
        }
    }
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
