//! Recordspec CLI - validate vendor and customer records from the command line
//!
//! This is the main entry point for the `recordspec` binary. It loads
//! configuration, sets up logging and dispatches to a command handler.
//!
//! Copyright (c) 2025 Recordspec Team
//! Licensed under the Apache-2.0 license

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands, OutputFormat};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    let cli = Cli::parse_args();

    // Configuration comes first: it carries logging and color settings
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", error::format_error(&e, cli.use_color()));
            process::exit(e.exit_code());
        }
    };

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli, &config, use_color) {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", error::format_error(&e, use_color));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: &Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = resolve_output_format(cli.output, config);
    let mut output = OutputWriter::new(format, use_color, cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        output = ?format,
        "Executing command"
    );

    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, config, &mut output),
        Commands::Schema(args) => handlers::handle_schema(args, &mut output),
        Commands::Samples(args) => handlers::handle_samples(args, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// `--output` wins over the configured format; unknown names fall back to human
fn resolve_output_format(requested: Option<OutputFormat>, config: &Config) -> OutputFormat {
    requested
        .or_else(|| OutputFormat::from_name(&config.output.format))
        .unwrap_or(OutputFormat::Human)
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);

    logging_config.merge_with_file(
        verbosity,
        config.logging.level.as_deref(),
        config.logging.format.as_deref(),
    );
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
