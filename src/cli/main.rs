//! Command-line interface entry point for `gradebook`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use gradebook::config::Config;
use gradebook::core::{CourseUpdate, GradebookError, JsonFileStorage, RecordStore};
use gradebook::logger::{self, Level};
use gradebook::{error, info};
use std::io;

fn main() {
    let args = Cli::parse();

    // The stored config is only edited by `config` subcommands; CLI overrides
    // apply to a copy used for this run
    let mut stored = Config::load();
    let defaults = Config::from_defaults();
    let config = stored.with_overrides(&args.to_config_overrides());

    let verbose = init_logging(&args, &config);

    let command = args.command.unwrap_or(Command::Menu);
    if let Command::Config { subcommand } = command {
        commands::config::run(subcommand, &mut stored, &defaults);
        return;
    }

    let data_file = config.data_file_path();
    let mut store = match RecordStore::open(JsonFileStorage::new(&data_file)) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to load {}: {e}", data_file.display());
            eprintln!("✗ Failed to load gradebook {}: {e}", data_file.display());
            std::process::exit(1);
        }
    };
    if verbose {
        println!(
            "✓ Loaded {} course(s) from {}",
            store.len(),
            data_file.display()
        );
    } else {
        info!("Loaded {} course(s) from {}", store.len(), data_file.display());
    }

    let mut stdout = io::stdout().lock();
    let result = match command {
        Command::Menu => {
            let mut stdin = io::stdin().lock();
            commands::menu::run(&mut store, &mut stdin, &mut stdout).map_err(GradebookError::from)
        }
        Command::Add {
            code,
            name,
            credits,
            score,
            semester,
        } => commands::course::add(
            &mut store,
            &mut stdout,
            &code,
            &name,
            credits,
            score,
            &semester,
        ),
        Command::Update {
            code,
            name,
            credits,
            score,
            semester,
        } => {
            let update = CourseUpdate {
                name,
                credits,
                score,
                semester,
            };
            commands::course::update(&mut store, &mut stdout, &code, &update)
        }
        Command::Delete { code } => commands::course::delete(&mut store, &mut stdout, &code),
        Command::List => commands::course::list(&store, &mut stdout).map_err(GradebookError::from),
        Command::Summary => {
            commands::course::summary(&store, &mut stdout).map_err(GradebookError::from)
        }
        Command::Config { .. } => Ok(()),
    };

    if let Err(e) = result {
        if e.is_user_error() {
            info!("Request rejected: {e}");
        } else {
            error!("{e}");
        }
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

/// Apply log level, verbosity and file logging; returns whether verbose output is on
fn init_logging(args: &Cli, config: &Config) -> bool {
    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        logger::enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        logger::enable_verbose();
    }
    logger::set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if logger::init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    verbose
}
