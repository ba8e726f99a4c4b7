//! Generic logger utility functions
//!
//! The logger writes to stdout and to the session's log file. A global level
//! applies to every target, and individual targets (for instance
//! `drive_lib::drive_ctrl`) can be given their own level so per-cycle traces
//! from one module don't drown the rest of the log.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use log::{self, info};
use fern;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Logging configuration, usually carried in an executable's parameters.
///
/// Levels are given by name (`"Trace"`, `"Debug"`, `"Info"`, `"Warn"`,
/// `"Error"` or `"Off"`, case insensitive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Level applied to all targets without an override.
    #[serde(default = "default_level")]
    pub level: String,

    /// Per-target overrides, keyed by target prefix.
    #[serde(default)]
    pub targets: BTreeMap<String, String>,
}

/// A `LogConfig` with its level names resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLevels {
    pub min_level: LevelFilter,
    pub targets: Vec<(String, LevelFilter)>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level less than `INFO`, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Unknown log level `{level}` given for `{target}`")]
    UnknownLevel {
        target: String,
        level: String,
    },

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            targets: BTreeMap::new(),
        }
    }
}

impl LogConfig {
    /// Resolve the level names of this config.
    ///
    /// The global level must be at least as verbose as `Info`. Target
    /// overrides may be anything, including `Off`.
    pub fn levels(&self) -> Result<LogLevels, LoggerInitError> {
        let min_level = parse_level("*", &self.level)?;

        if min_level < log::Level::Info {
            return Err(LoggerInitError::InvalidMinLogLevel(min_level))
        }

        let targets = self.targets
            .iter()
            .map(|(t, l)| Ok((t.clone(), parse_level(t, l)?)))
            .collect::<Result<Vec<_>, LoggerInitError>>()?;

        Ok(LogLevels {
            min_level,
            targets
        })
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// # Notes
///
/// - The global level in `config` must be at least as verbose as
///   `log::Level::Info`.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(
    config: &LogConfig,
    session: &session::Session
) -> Result<(), LoggerInitError> {

    let levels = config.levels()?;

    let log_file = fern::log_file(session.log_file_path.clone())
        .map_err(LoggerInitError::LogFileInitError)?;

    // Setup the logger using fern's builder pattern
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {

            // If debug or trace include the target, otherwise don't include it
            if record.level() > log::Level::Info {
                out.finish(format_args!(
                    "[{:10.6} {}] {}: {}",
                    session::get_elapsed_seconds(),
                    level_to_str(record.level()),
                    record.target(),
                    message
                ))
            }
            else {
                out.finish(format_args!(
                    "[{:10.6} {}] {}",
                    session::get_elapsed_seconds(),
                    level_to_str(record.level()),
                    message
                ))
            }

        })
        .level(levels.min_level);

    for (target, level) in levels.targets.iter() {
        dispatch = dispatch.level_for(target.clone(), *level);
    }

    dispatch
        .chain(std::io::stdout())
        .chain(log_file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    info!("    Session epoch: {}", session::get_epoch());
    info!("    Log level: {:?}", levels.min_level);
    for (target, level) in levels.targets.iter() {
        info!("    Log level for {}: {:?}", target, level);
    }
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn default_level() -> String {
    String::from("Trace")
}

fn parse_level(target: &str, level: &str) -> Result<LevelFilter, LoggerInitError> {
    level.parse().map_err(|_| LoggerInitError::UnknownLevel {
        target: target.to_string(),
        level: level.to_string()
    })
}

/// Get the string representation of a log level
fn level_to_str(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "TRC".dimmed().italic(),
        log::Level::Debug => "DBG".dimmed(),
        log::Level::Info  => "INF".normal(),
        log::Level::Warn  => "WRN".yellow(),
        log::Level::Error => "ERR".red().bold()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_levels() {
        let levels = LogConfig::default().levels().unwrap();

        assert_eq!(levels.min_level, LevelFilter::Trace);
        assert!(levels.targets.is_empty());
    }

    #[test]
    fn test_target_levels() {
        let config: LogConfig = crate::params::parse(
            r#"
            level = "debug"

            [targets]
            "drive_lib::drive_ctrl" = "Info"
            "drive_lib::actuation" = "off"
            "#
        ).unwrap();

        let levels = config.levels().unwrap();

        assert_eq!(levels.min_level, LevelFilter::Debug);
        assert_eq!(levels.targets, vec![
            (String::from("drive_lib::actuation"), LevelFilter::Off),
            (String::from("drive_lib::drive_ctrl"), LevelFilter::Info),
        ]);
    }

    #[test]
    fn test_invalid_levels() {
        let quiet = LogConfig {
            level: String::from("Warn"),
            ..Default::default()
        };
        assert!(matches!(
            quiet.levels(),
            Err(LoggerInitError::InvalidMinLogLevel(LevelFilter::Warn))
        ));

        let mut unknown = LogConfig::default();
        unknown.targets.insert(
            String::from("drive_lib::drive_ctrl"),
            String::from("loud")
        );
        match unknown.levels() {
            Err(LoggerInitError::UnknownLevel { target, level }) => {
                assert_eq!(target, "drive_lib::drive_ctrl");
                assert_eq!(level, "loud");
            },
            r => panic!("Expected an unknown level error, found {:?}", r)
        }
    }
}
