//! Parameters structure for the control laws

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::{CtrlLawError, Mode};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the control laws.
///
/// Any field missing from a parameter file takes its default value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {

    // ---- LABEL MAPPING ----

    /// Linear speed per unit of power for `feet` (forwards) and `tongue` (backwards). Also the
    /// base step of the epoch-averaged law.
    ///
    /// Units: arena units/tick per unit power
    pub base_speed: f64,

    /// Angular rate per unit of power for `left_hand` (positive) and `right_hand` (negative).
    ///
    /// Units: radians/tick per unit power
    pub turn_gain: f64,

    // ---- SMOOTHED ----

    /// Fraction of the remaining error to the target removed each tick.
    pub smoothing_alpha: f64,

    // ---- DIFFERENTIAL DRIVE ----

    /// Distance between the left and right drive wheels.
    ///
    /// Units: arena units
    pub wheelbase_m: f64,

    /// Speed of the inner wheel during a turn as a fraction of the outer wheel's speed.
    pub inner_wheel_ratio: f64,

    // ---- DWELL STATE MACHINE ----

    pub dwell: DwellParams,

    // ---- EPOCH AVERAGED ----

    /// How long each epoch's command is held for.
    pub epoch_hold: EpochHold
}

/// Parameters for the dwell state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DwellParams {
    /// Ticks spent in `MoveForward`
    pub fwd_ticks: u32,

    /// Ticks spent in `TurnLeft` or `TurnRight`
    pub turn_ticks: u32,

    /// Ticks spent in `Pause`
    pub pause_ticks: u32,

    /// Linear speed while in `MoveForward`.
    ///
    /// Units: arena units/tick
    pub fwd_speed: f64,

    /// Angular rate magnitude while turning.
    ///
    /// Units: radians/tick
    pub turn_rate: f64
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Duration an epoch-averaged command is held for.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum EpochHold {
    /// Hold for a fixed number of ticks.
    Ticks(u32),

    /// Hold for one tick per sample in the epoch.
    GroupLength
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            base_speed: 0.01,
            turn_gain: 0.01,
            smoothing_alpha: 0.05,
            wheelbase_m: 4.8,
            inner_wheel_ratio: 0.3,
            dwell: DwellParams::default(),
            epoch_hold: EpochHold::Ticks(60)
        }
    }
}

impl Default for DwellParams {
    fn default() -> Self {
        Self {
            fwd_ticks: 140,
            turn_ticks: 80,
            pause_ticks: 100,
            fwd_speed: 0.05,
            turn_rate: 0.02
        }
    }
}

impl Params {
    /// Check the parameters can be used by every law.
    pub fn validate(&self) -> Result<(), CtrlLawError> {
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(CtrlLawError::InvalidSmoothingAlpha(self.smoothing_alpha));
        }

        if !(self.wheelbase_m > 0.0) {
            return Err(CtrlLawError::InvalidWheelbase(self.wheelbase_m));
        }

        for mode in &[Mode::MoveForward, Mode::TurnLeft, Mode::TurnRight, Mode::Pause] {
            if self.dwell.ticks_for(*mode) == 0 {
                return Err(CtrlLawError::ZeroDwell(*mode));
            }
        }

        if self.epoch_hold == EpochHold::Ticks(0) {
            return Err(CtrlLawError::ZeroEpochHold);
        }

        Ok(())
    }
}

impl DwellParams {
    /// Number of ticks the given mode is held for. `Idle` has no dwell.
    pub fn ticks_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Idle => 0,
            Mode::MoveForward => self.fwd_ticks,
            Mode::TurnLeft | Mode::TurnRight => self.turn_ticks,
            Mode::Pause => self.pause_ticks
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Params::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_params() {
        let mut p = Params::default();
        p.smoothing_alpha = 0.0;
        assert!(matches!(p.validate(), Err(CtrlLawError::InvalidSmoothingAlpha(_))));

        let mut p = Params::default();
        p.dwell.turn_ticks = 0;
        assert!(matches!(p.validate(), Err(CtrlLawError::ZeroDwell(Mode::TurnLeft))));

        let mut p = Params::default();
        p.epoch_hold = EpochHold::Ticks(0);
        assert!(matches!(p.validate(), Err(CtrlLawError::ZeroEpochHold)));
    }
}
