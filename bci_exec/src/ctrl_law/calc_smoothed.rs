//! Smoothed control law

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use util::maths::approach;

use super::{direct_target, Command, LawState, Params};
use crate::feed::Sample;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Perform the smoothed law.
///
/// The direct mapping gives a target which the state's velocities approach by a fraction
/// `smoothing_alpha` of the remaining error each tick. The smoothed velocities are the command.
pub fn calc_smoothed(params: &Params, sample: &Sample, state: &mut LawState) -> Command {
    let target = direct_target(params, sample.label, sample.power);

    state.velocity = approach(state.velocity, target.linear, params.smoothing_alpha);
    state.turn_velocity = approach(state.turn_velocity, target.angular, params.smoothing_alpha);

    Command::new(state.velocity, state.turn_velocity)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::feed::Label;

    #[test]
    fn test_geometric_convergence() {
        let p = Params::default();
        let sample = Sample::new(Label::Feet, 4.0, None);
        let target = p.base_speed * 4.0;

        let mut state = LawState::default();
        state.velocity = -0.1;
        let err_0 = (state.velocity - target).abs();

        for k in 1..=50 {
            calc_smoothed(&p, &sample, &mut state);

            let expected = err_0 * (1.0 - p.smoothing_alpha).powi(k);
            assert!(((state.velocity - target).abs() - expected).abs() < 1e-12);
        }

        // Nothing was commanded to turn
        assert_eq!(state.turn_velocity, 0.0);
    }

    #[test]
    fn test_decays_on_unrecognised() {
        let p = Params::default();
        let mut state = LawState::default();
        state.turn_velocity = 1.0;

        let cmd = calc_smoothed(&p, &Sample::new(Label::Other, 5.0, None), &mut state);

        assert!((cmd.angular - 0.95).abs() < 1e-12);
        assert_eq!(cmd.linear, 0.0);
    }
}
