//! Differential drive control law

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::{Command, Params, WheelSpeeds};
use crate::feed::{Label, Sample};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the wheel speeds demanded by a sample.
///
/// With `s = base_speed * power`, `feet` drives both sides at `s`, `tongue` both at `-s`, and
/// the hand labels slow the inner wheel of the turn to `inner_wheel_ratio * s`.
pub fn wheel_speeds(params: &Params, sample: &Sample) -> WheelSpeeds {
    let s = params.base_speed * sample.power;
    let inner = params.inner_wheel_ratio * s;

    match sample.label {
        Label::Feet => WheelSpeeds { left: s, right: s },
        Label::Tongue => WheelSpeeds { left: -s, right: -s },
        Label::LeftHand => WheelSpeeds { left: inner, right: s },
        Label::RightHand => WheelSpeeds { left: s, right: inner },
        Label::Other => WheelSpeeds::default()
    }
}

/// Perform the differential drive law.
///
/// Turns are forward arcs rather than rotations in place, since both wheels keep moving
/// forwards.
pub fn calc_diff_drive(params: &Params, sample: &Sample) -> Command {
    wheel_speeds(params, sample).to_command(params.wheelbase_m)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_forward_arcs() {
        let p = Params::default();

        let left = calc_diff_drive(&p, &Sample::new(Label::LeftHand, 2.0, None));
        assert!(left.linear > 0.0);
        assert!(left.angular > 0.0);

        let right = calc_diff_drive(&p, &Sample::new(Label::RightHand, 2.0, None));
        assert!(right.linear > 0.0);
        assert!(right.angular < 0.0);

        // Mirror images of each other
        assert!((left.linear - right.linear).abs() < 1e-15);
        assert!((left.angular + right.angular).abs() < 1e-15);

        // v = (0.3s + s)/2, w = 0.7s/wheelbase
        let s = p.base_speed * 2.0;
        assert!((left.linear - 0.65 * s).abs() < 1e-12);
        assert!((left.angular - 0.7 * s / p.wheelbase_m).abs() < 1e-12);
    }

    #[test]
    fn test_straight_lines() {
        let p = Params::default();

        let fwd = calc_diff_drive(&p, &Sample::new(Label::Feet, 1.0, None));
        assert_eq!(fwd, Command::new(p.base_speed, 0.0));

        let back = calc_diff_drive(&p, &Sample::new(Label::Tongue, 1.0, None));
        assert_eq!(back, Command::new(-p.base_speed, 0.0));

        assert!(calc_diff_drive(&p, &Sample::new(Label::Other, 1.0, None)).is_stop());
    }
}
