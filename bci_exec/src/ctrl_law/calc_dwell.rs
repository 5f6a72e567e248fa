//! Dwell state machine control law
//!
//! The state machine has an `Idle` mode and four manouvre modes. While `Idle` the machine
//! watches for a change of label (an edge, not a level); on an edge it enters the label's mode
//! and holds it for that mode's dwell, emitting the mode's fixed velocity. Labels seen during
//! the dwell are ignored. When the dwell expires the machine returns to `Idle` and edge
//! detection resumes against the label which triggered the expired mode.
//!
//! The first sample is always an edge since no label has been seen yet. Unrecognised labels
//! never count as an edge.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;

use super::{Command, LawState, Mode, Params};
use crate::feed::Sample;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Perform one tick of the dwell state machine.
///
/// After the call `state.mode` is the mode whose velocity was emitted on this tick.
pub fn calc_dwell(params: &Params, sample: &Sample, state: &mut LawState) -> Command {

    // Expire the previous mode if its dwell has been used up
    if state.mode != Mode::Idle && state.hold_ticks_remaining == 0 {
        debug!("Dwell in {} expired", state.mode);
        state.mode = Mode::Idle;
    }

    // Edge detection, only while idle
    if state.mode == Mode::Idle && state.last_label != Some(sample.label) {
        if let Some(mode) = Mode::for_label(sample.label) {
            state.mode = mode;
            state.hold_ticks_remaining = params.dwell.ticks_for(mode);
            state.last_label = Some(sample.label);

            debug!(
                "Dwell state machine entering {} for {} ticks",
                mode, state.hold_ticks_remaining
            );
        }
    }

    let cmd = mode_cmd(params, state.mode);

    if state.mode != Mode::Idle {
        state.hold_ticks_remaining = state.hold_ticks_remaining.saturating_sub(1);
    }

    cmd
}

/// The fixed command emitted while in a mode.
fn mode_cmd(params: &Params, mode: Mode) -> Command {
    match mode {
        Mode::MoveForward => Command::new(params.dwell.fwd_speed, 0.0),
        Mode::TurnLeft => Command::new(0.0, params.dwell.turn_rate),
        Mode::TurnRight => Command::new(0.0, -params.dwell.turn_rate),
        Mode::Idle | Mode::Pause => Command::stop()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::feed::Label;

    fn sample(label: Label) -> Sample {
        Sample::new(label, 1.0, None)
    }

    #[test]
    fn test_dwell_immunity() {
        let p = Params::default();
        let mut state = LawState::default();

        // A single left hand sample followed by a stream of other labels
        let first = calc_dwell(&p, &sample(Label::LeftHand), &mut state);
        assert_eq!(state.mode, Mode::TurnLeft);
        assert_eq!(first, Command::new(0.0, p.dwell.turn_rate));

        let noise = [Label::Feet, Label::RightHand, Label::Tongue, Label::Other];
        for i in 1..80 {
            let cmd = calc_dwell(&p, &sample(noise[i % noise.len()]), &mut state);
            assert_eq!(state.mode, Mode::TurnLeft, "tick {}", i);
            assert_eq!(cmd, Command::new(0.0, p.dwell.turn_rate));
        }
        assert_eq!(state.hold_ticks_remaining, 0);

        // 81st tick: a different label is a fresh edge
        calc_dwell(&p, &sample(Label::Feet), &mut state);
        assert_eq!(state.mode, Mode::MoveForward);
        assert_eq!(state.hold_ticks_remaining, p.dwell.fwd_ticks - 1);
    }

    #[test]
    fn test_returns_to_idle() {
        let p = Params::default();
        let mut state = LawState::default();

        for _ in 0..80 {
            calc_dwell(&p, &sample(Label::LeftHand), &mut state);
            assert_eq!(state.mode, Mode::TurnLeft);
        }

        // Same label held: no edge so the machine idles
        let cmd = calc_dwell(&p, &sample(Label::LeftHand), &mut state);
        assert_eq!(state.mode, Mode::Idle);
        assert!(cmd.is_stop());

        // Re-armed: a change of label triggers again, and so does returning to left hand
        calc_dwell(&p, &sample(Label::Tongue), &mut state);
        assert_eq!(state.mode, Mode::Pause);
        for _ in 1..p.dwell.pause_ticks {
            calc_dwell(&p, &sample(Label::Tongue), &mut state);
        }
        calc_dwell(&p, &sample(Label::LeftHand), &mut state);
        assert_eq!(state.mode, Mode::TurnLeft);
    }

    #[test]
    fn test_first_sample_is_edge() {
        let p = Params::default();
        let mut state = LawState::default();
        assert_eq!(state.last_label, None);

        calc_dwell(&p, &sample(Label::Feet), &mut state);
        assert_eq!(state.mode, Mode::MoveForward);
        assert_eq!(state.last_label, Some(Label::Feet));
    }

    #[test]
    fn test_unrecognised_not_edge() {
        let p = Params::default();
        let mut state = LawState::default();

        let cmd = calc_dwell(&p, &sample(Label::Other), &mut state);
        assert_eq!(state.mode, Mode::Idle);
        assert_eq!(state.last_label, None);
        assert!(cmd.is_stop());
    }
}
