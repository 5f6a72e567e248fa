//! Logging setup
//!
//! Records are written to the session's log file and echoed to the terminal. The file receives
//! everything at or above the base level, the terminal only what also passes its own, usually
//! quieter, level. Noisy targets can be tuned on their own: trajectory control traces every
//! tick, so `bci_lib::traj_ctrl` is normally kept at `debug` and only raised to `trace` when a
//! replay has to be inspected tick by tick.
//!
//! Levels come from the `[log]` table of the executable's parameter file:
//!
//! ```toml
//! [log]
//! level = "debug"
//! stdout_level = "info"
//!
//! [log.targets]
//! "bci_lib::traj_ctrl" = "trace"
//! "bci_lib::ctrl_law" = "info"
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use log::{info, Level, Record};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// Internal imports
use crate::session::{self, Session};

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Logging parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogParams {
    /// Base level, everything at or above it reaches the log file.
    pub level: LevelFilter,

    /// Level for the terminal, applied on top of the base and target levels.
    pub stdout_level: LevelFilter,

    /// Levels for individual targets (module paths), replacing the base level for the target
    /// and its submodules.
    pub targets: BTreeMap<String, LevelFilter>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("The base log level must include `INFO` records, found `{0}`")]
    BaseLevelTooQuiet(LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for LogParams {
    fn default() -> Self {
        Self {
            level: LevelFilter::Debug,
            stdout_level: LevelFilter::Info,
            targets: BTreeMap::new()
        }
    }
}

impl LogParams {
    /// The session log must keep the status records, so the base level can't be quieter than
    /// `INFO`. Targets and the terminal may be as quiet as wanted.
    pub fn validate(&self) -> Result<(), LoggerInitError> {
        if self.level < Level::Info {
            return Err(LoggerInitError::BaseLevelTooQuiet(self.level));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution, writing to stdout and the session's log file.
///
/// Must only be called once, the global logger can't be replaced.
pub fn logger_init(params: &LogParams, session: &Session) -> Result<(), LoggerInitError> {
    params.validate()?;

    let log_file = fern::log_file(&session.log_file_path)
        .map_err(LoggerInitError::LogFileInitError)?;

    dispatch(params, std::io::stdout(), log_file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    info!("    Session epoch: {}", session::get_epoch());
    info!("    Levels: {} (file), {} (stdout)", params.level, params.stdout_level);
    for (target, level) in &params.targets {
        info!("    Level for {}: {}", target, level);
    }
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Build the dispatcher routing records to the terminal and file outputs.
fn dispatch<S, F>(params: &LogParams, stdout: S, file: F) -> fern::Dispatch
where
    S: Into<fern::Output>,
    F: Into<fern::Output>
{
    let root = params.targets.iter().fold(
        fern::Dispatch::new()
            .format(format_record)
            .level(params.level),
        |d, (target, level)| d.level_for(target.clone(), *level)
    );

    root
        .chain(fern::Dispatch::new().level(params.stdout_level).chain(stdout))
        .chain(file)
}

/// Stamp a record with the session time and level. Debug and trace records also carry their
/// target, since they are the ones filtered per target.
fn format_record(out: fern::FormatCallback, message: &fmt::Arguments, record: &Record) {
    let time_s = session::get_elapsed_seconds();

    if record.level() > Level::Info {
        out.finish(format_args!(
            "[{:10.6} {}] {}: {}",
            time_s,
            level_tag(record.level()),
            record.target(),
            message
        ))
    }
    else {
        out.finish(format_args!(
            "[{:10.6} {}] {}",
            time_s,
            level_tag(record.level()),
            message
        ))
    }
}

fn level_tag(level: Level) -> ColoredString {
    match level {
        Level::Trace => "TRC".dimmed().italic(),
        Level::Debug => "DBG".dimmed(),
        Level::Info => "INF".normal(),
        Level::Warn => "WRN".yellow(),
        Level::Error => "ERR".red().bold()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::mpsc::{channel, Receiver};

    fn emit(log: &dyn log::Log, target: &str, level: Level) {
        log.log(
            &Record::builder()
                .args(format_args!("{} from {}", level, target))
                .target(target)
                .level(level)
                .build()
        );
    }

    fn drain(rx: &Receiver<String>) -> Vec<String> {
        rx.try_iter().collect()
    }

    #[test]
    fn test_params_from_toml() {
        let params: LogParams = toml::from_str(r#"
            level = "debug"
            stdout_level = "warn"

            [targets]
            "bci_lib::traj_ctrl" = "trace"
        "#).unwrap();

        assert_eq!(params.level, LevelFilter::Debug);
        assert_eq!(params.stdout_level, LevelFilter::Warn);
        assert_eq!(params.targets.get("bci_lib::traj_ctrl"), Some(&LevelFilter::Trace));

        // Missing table gives the defaults
        let params: LogParams = toml::from_str("").unwrap();
        assert_eq!(params, LogParams::default());
    }

    #[test]
    fn test_validate() {
        assert!(LogParams::default().validate().is_ok());

        let mut params = LogParams::default();
        params.stdout_level = LevelFilter::Off;
        assert!(params.validate().is_ok());

        params.level = LevelFilter::Warn;
        assert!(matches!(params.validate(), Err(LoggerInitError::BaseLevelTooQuiet(LevelFilter::Warn))));
    }

    #[test]
    fn test_routing() {
        let mut params = LogParams::default();
        params.targets.insert("bci_lib::traj_ctrl".into(), LevelFilter::Trace);
        params.targets.insert("bci_lib::ctrl_law".into(), LevelFilter::Warn);

        let (stdout_tx, stdout_rx) = channel();
        let (file_tx, file_rx) = channel();
        let (_, log) = dispatch(&params, stdout_tx, file_tx).into_log();

        // Per-tick traces only reach the file, and only for the raised target
        emit(&*log, "bci_lib::traj_ctrl::state", Level::Trace);
        emit(&*log, "bci_lib::feed", Level::Trace);
        assert_eq!(drain(&file_rx).len(), 1);
        assert!(drain(&stdout_rx).is_empty());

        // Lowered target drops its debug output everywhere
        emit(&*log, "bci_lib::ctrl_law::calc_dwell", Level::Debug);
        assert!(drain(&file_rx).is_empty());

        // Base level debug goes to the file but not the terminal
        emit(&*log, "bci_exec", Level::Debug);
        assert_eq!(drain(&file_rx).len(), 1);
        assert!(drain(&stdout_rx).is_empty());

        // Info goes to both
        emit(&*log, "bci_exec", Level::Info);
        let file = drain(&file_rx);
        assert_eq!(file.len(), 1);
        assert!(file[0].contains("INFO from bci_exec"));
        assert_eq!(drain(&stdout_rx).len(), 1);
    }
}
