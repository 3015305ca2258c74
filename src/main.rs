// src/main.rs

mod app_logic;
mod core;

use crate::app_logic::{GrocerTracker, RunOutcome};
use crate::core::{
    AppConfig, ConfigManagerOperations, CoreBackupWriter, CoreConfigManager, CoreItemReader,
    path_utils,
};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

const APP_NAME: &str = "GrocerTracker";
const LOG_FILENAME: &str = "grocer_tracker.log";

/*
 * Sends log output to a file in the per-user config directory so the console
 * only carries the menu transcript. Without a usable directory the program
 * simply runs unlogged.
 */
fn init_logging() {
    let Some(log_path) = path_utils::app_local_file_path(APP_NAME, LOG_FILENAME) else {
        return;
    };
    if let Ok(file) = File::create(&log_path) {
        if WriteLogger::init(LevelFilter::Debug, Config::default(), file).is_ok() {
            log::info!("Logging to {log_path:?}");
        }
    }
}

fn load_config(out: &mut impl Write) -> io::Result<AppConfig> {
    match CoreConfigManager::new().load_config(Path::new(".")) {
        Ok(config) => Ok(config),
        Err(e) => {
            log::warn!("main: Settings not loaded, using defaults: {e}");
            writeln!(out, "Warning: {e}. Using default settings.")?;
            Ok(AppConfig::default())
        }
    }
}

fn run() -> io::Result<RunOutcome> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let config = load_config(&mut out)?;

    let tracker = GrocerTracker::new(
        config,
        Box::new(CoreItemReader::new()),
        Box::new(CoreBackupWriter::new()),
    );
    tracker.run(io::stdin().lock(), &mut out)
}

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(RunOutcome::SourceUnavailable) => ExitCode::FAILURE,
        Ok(outcome) => {
            log::info!("main: Finished with {outcome:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("main: Console I/O failed: {e}");
            eprintln!("Console I/O error: {e}");
            ExitCode::FAILURE
        }
    }
}
