//! Direct control law

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::{Command, Params};
use crate::feed::{Label, Sample};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Map a label and power onto a command.
///
/// `feet` drives forwards and `tongue` backwards at `base_speed * power`, `left_hand` turns
/// left and `right_hand` right at `turn_gain * power`. Unrecognised labels stop.
pub fn direct_target(params: &Params, label: Label, power: f64) -> Command {
    match label {
        Label::Feet => Command::new(params.base_speed * power, 0.0),
        Label::Tongue => Command::new(-params.base_speed * power, 0.0),
        Label::LeftHand => Command::new(0.0, params.turn_gain * power),
        Label::RightHand => Command::new(0.0, -params.turn_gain * power),
        Label::Other => Command::stop()
    }
}

/// Perform the direct law: the command is set from the sample each tick with no smoothing.
pub fn calc_direct(params: &Params, sample: &Sample) -> Command {
    direct_target(params, sample.label, sample.power)
}
