//! # Control law module
//!
//! Control laws map the classified label and power of the current sample onto a linear and
//! angular velocity command for the pose integrator. Five interchangeable laws are provided,
//! selected by [`ControlLaw`]:
//!
//! - `Direct` - the command is set directly from the label each tick.
//! - `Smoothed` - the direct command becomes a target which the output approaches through a
//!   first order exponential filter.
//! - `DifferentialDrive` - the label sets left and right wheel speeds which are converted into
//!   body velocities.
//! - `DwellStateMachine` - a change of label enters a manouvre mode which is held for a fixed
//!   number of ticks, ignoring labels until it expires.
//! - `EpochAveraged` - powers are averaged over a whole epoch and the resulting command held
//!   for a number of ticks.
//!
//! Every law is a plain function of the parameters, its input and the mutable [`LawState`], so
//! they can be exercised without a feed or a session.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_diff_drive;
mod calc_direct;
mod calc_dwell;
mod calc_epoch_avg;
mod calc_smoothed;
mod cmd;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
pub use calc_diff_drive::calc_diff_drive;
pub use calc_direct::{calc_direct, direct_target};
pub use calc_dwell::calc_dwell;
pub use calc_epoch_avg::{calc_epoch_avg, start_epoch};
pub use calc_smoothed::calc_smoothed;
pub use cmd::*;
pub use params::*;
pub use state::*;

use crate::feed::Sample;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The available control laws.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlLaw {
    Direct,
    Smoothed,
    DifferentialDrive,
    DwellStateMachine,
    EpochAveraged
}

/// Possible errors in the control law parameters.
#[derive(Debug, thiserror::Error)]
pub enum CtrlLawError {
    #[error("Smoothing factor must be in (0, 1], found {0}")]
    InvalidSmoothingAlpha(f64),

    #[error("Wheelbase must be positive, found {0}")]
    InvalidWheelbase(f64),

    #[error("Dwell duration for {0} must be at least one tick")]
    ZeroDwell(Mode),

    #[error("Epoch hold must be at least one tick")]
    ZeroEpochHold
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ControlLaw {
    fn default() -> Self {
        ControlLaw::Smoothed
    }
}

impl ControlLaw {
    /// Returns true if the law consumes whole epoch groups rather than single samples.
    pub fn uses_epochs(&self) -> bool {
        matches!(self, ControlLaw::EpochAveraged)
    }

    /// Calculate the command for a single sample.
    ///
    /// Returns `None` for `EpochAveraged`, which consumes whole epoch groups through
    /// [`start_epoch`] and [`calc_epoch_avg`] instead.
    pub fn calc(&self, params: &Params, sample: &Sample, state: &mut LawState) -> Option<Command> {
        match self {
            ControlLaw::Direct => Some(calc_direct(params, sample)),
            ControlLaw::Smoothed => Some(calc_smoothed(params, sample, state)),
            ControlLaw::DifferentialDrive => Some(calc_diff_drive(params, sample)),
            ControlLaw::DwellStateMachine => Some(calc_dwell(params, sample, state)),
            ControlLaw::EpochAveraged => None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::feed::Label;

    #[test]
    fn test_per_sample_laws() {
        let p = Params::default();
        let sample = Sample::new(Label::Feet, 2.0, None);

        for law in [
            ControlLaw::Direct,
            ControlLaw::Smoothed,
            ControlLaw::DifferentialDrive,
            ControlLaw::DwellStateMachine
        ].iter() {
            let mut state = LawState::default();
            assert!(!law.uses_epochs());
            assert!(law.calc(&p, &sample, &mut state).is_some(), "{:?} gave no command", law);
        }
    }

    #[test]
    fn test_epoch_averaged_needs_groups() {
        let p = Params::default();
        let mut state = LawState::default();
        let law = ControlLaw::EpochAveraged;
        assert!(law.uses_epochs());

        // Single samples are refused and leave the state untouched
        for power in 1..=5 {
            let sample = Sample::new(Label::Feet, power as f64, Some(0));
            assert_eq!(law.calc(&p, &sample, &mut state), None);
        }
        assert_eq!(state, LawState::default());

        // The same samples as a group give the mean power command
        let group: Vec<Sample> = (1..=5)
            .map(|power| Sample::new(Label::Feet, power as f64, Some(0)))
            .collect();
        start_epoch(&p, &group, &mut state).unwrap();
        assert_eq!(calc_epoch_avg(&mut state), Command::new(p.base_speed * 3.0, 0.0));
    }
}
