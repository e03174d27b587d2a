//! Command-line interface entry point for `NuBoard`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use nu_board::config::Config;
use nu_board::info;
use nu_board::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }
    info!("nuboard {} starting", nu_board::get_version());

    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::New {
            draft,
            name,
            code,
            id,
            force,
        } => commands::draft::run_new(&draft, &name, &code, id.as_deref(), force, &config),
        Command::Show { draft } => commands::draft::run_show(&draft, &config),
        Command::Board { draft, subcommand } => commands::edit::run_board(&draft, subcommand, &config),
        Command::Semester { draft, subcommand } => {
            commands::edit::run_semester(&draft, subcommand, &config)
        }
        Command::Column { draft, subcommand } => {
            commands::edit::run_column(&draft, subcommand, &config)
        }
        Command::Subject { draft, subcommand } => {
            commands::edit::run_subject(&draft, subcommand, &config)
        }
        Command::Prereq { draft, subcommand } => {
            commands::edit::run_prereq(&draft, subcommand, &config)
        }
        Command::Search {
            draft,
            query,
            department,
        } => commands::search::run(&draft, &query, department, &config),
        Command::Export {
            draft,
            shape,
            output,
        } => commands::export::run(&draft, shape, output.as_deref(), &config),
        Command::ImportSummary { input_file } => commands::export::run_import_summary(&input_file),
        Command::Report {
            draft,
            output,
            format,
        } => commands::report::run(&draft, output.as_deref(), &format, &config),
    };

    if let Err(message) = result {
        if !message.is_empty() {
            eprintln!("{message}");
        }
        std::process::exit(1);
    }
}
