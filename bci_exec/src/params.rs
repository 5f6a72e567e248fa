//! Executable parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use util::logger::LogParams;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the replay executable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExecParams {
    /// Target period of one cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Minimum wall time between trajectory control ticks. If not set the controller ticks on
    /// every cycle.
    ///
    /// Units: seconds
    pub tick_min_period_s: Option<f64>,

    /// Time step passed to the pose integrator on each tick.
    pub dt_per_tick: f64,

    /// Path of the JSON sample file, relative paths are relative to the software root.
    pub data_file: String,

    /// Stop after this many controller ticks. If not set the replay loops forever.
    pub max_ticks: Option<u64>,

    /// Log levels
    pub log: LogParams
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Invalid executable parameters.
#[derive(Debug, thiserror::Error)]
pub enum ExecParamsError {
    #[error("The cycle period must be a positive number of seconds, found {0}")]
    InvalidCyclePeriod(f64),

    #[error("The minimum tick period must be a positive number of seconds, found {0}")]
    InvalidTickPeriod(f64),

    #[error("The time step per tick must be finite and non-negative, found {0}")]
    InvalidTimeStep(f64)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ExecParams {
    fn default() -> Self {
        Self {
            cycle_period_s: 1.0 / 60.0,
            tick_min_period_s: None,
            dt_per_tick: 1.0,
            data_file: String::from("data/combined_10_samples_per_label.json"),
            max_ticks: None,
            log: LogParams::default()
        }
    }
}

impl ExecParams {
    /// Check the periods can be turned into durations and the time step is usable.
    pub fn validate(&self) -> Result<(), ExecParamsError> {
        if !is_period(self.cycle_period_s) {
            return Err(ExecParamsError::InvalidCyclePeriod(self.cycle_period_s));
        }

        if let Some(p) = self.tick_min_period_s {
            if !is_period(p) {
                return Err(ExecParamsError::InvalidTickPeriod(p));
            }
        }

        if !(self.dt_per_tick.is_finite() && self.dt_per_tick >= 0.0) {
            return Err(ExecParamsError::InvalidTimeStep(self.dt_per_tick));
        }

        Ok(())
    }

    /// Number of cycles per second
    pub fn cycle_frequency_hz(&self) -> f64 {
        1.0 / self.cycle_period_s
    }
}

/// Positive and finite, NaN fails both.
fn is_period(value_s: f64) -> bool {
    value_s.is_finite() && value_s > 0.0
}
