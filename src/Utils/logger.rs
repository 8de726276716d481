use chrono::Local;
use log::{LevelFilter, info};
use simplelog::*;
use std::fs::{self, File};
use std::io;
use std::path::Path;

/// "off" | "error" | "warn" | "info" | "debug" | "trace", case-insensitive; anything else is `Info`
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse::<LevelFilter>().unwrap_or(LevelFilter::Info)
}

/// `log_2025-01-31_12-00-00.log`
pub fn timestamped_log_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.log", date_and_time)
}

/// Terminal logger plus, when `log_file` is given, a file logger with the same level.
/// A second call is harmless: the global logger stays as first installed.
pub fn init_logger(log_option: LevelFilter, log_file: Option<&str>) -> io::Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(name) = log_file {
        loggers.push(WriteLogger::new(log_option, Config::default(), File::create(name)?));
    }
    match CombinedLogger::init(loggers) {
        Ok(()) => info!("logger started with level {}", log_option),
        Err(_) => info!("logger already initialised"),
    }
    Ok(())
}

/// removes `*.log` files from `dir`, returns how many were deleted
pub fn delete_old_logs(dir: &Path) -> io::Result<usize> {
    let mut deleted = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "log") {
            fs::remove_file(&path)?;
            deleted += 1;
        }
    }
    Ok(deleted)
}
