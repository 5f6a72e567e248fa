//! Epoch averaged control law
//!
//! Powers are averaged over a whole epoch group and the group's label mapped through the direct
//! mapping at that mean power. The resulting command is then held for the configured number of
//! ticks before the next group is consumed.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;
use util::maths;

use super::{direct_target, Command, EpochCmd, EpochHold, LawState, Params};
use crate::feed::Sample;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Begin holding the command derived from a new epoch group.
///
/// The label of the first sample is used for the whole group. Returns the epoch command, or
/// `None` if the group is empty, in which case the state is left unchanged.
pub fn start_epoch(params: &Params, group: &[Sample], state: &mut LawState) -> Option<EpochCmd> {
    let first = group.first()?;
    let mean_power = maths::mean(group.iter().map(|s| s.power))?;

    let epoch = EpochCmd {
        epoch_id: first.epoch_id,
        label: first.label,
        mean_power,
        num_samples: group.len(),
        cmd: direct_target(params, first.label, mean_power)
    };

    state.epoch = Some(epoch);
    state.epoch_hold_remaining = match params.epoch_hold {
        EpochHold::Ticks(n) => n,
        EpochHold::GroupLength => group.len() as u32
    };

    debug!(
        "Epoch {:?} ({} samples of {:?}) mean power {:.4}, holding for {} ticks",
        epoch.epoch_id,
        epoch.num_samples,
        epoch.label,
        epoch.mean_power,
        state.epoch_hold_remaining
    );

    Some(epoch)
}

/// Perform one tick of the epoch averaged law, emitting the held command.
///
/// Once the hold has run out the zero command is emitted until a new epoch is started.
pub fn calc_epoch_avg(state: &mut LawState) -> Command {
    if state.epoch_hold_remaining == 0 {
        return Command::stop();
    }

    state.epoch_hold_remaining -= 1;

    state.epoch.map(|e| e.cmd).unwrap_or_default()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::feed::Label;

    fn group(label: Label, powers: &[f64]) -> Vec<Sample> {
        powers.iter().map(|&p| Sample::new(label, p, Some(4))).collect()
    }

    #[test]
    fn test_mean_power_held() {
        let p = Params::default();
        let mut state = LawState::default();

        let epoch = start_epoch(&p, &group(Label::Feet, &[1.0, 2.0, 3.0, 4.0, 5.0]), &mut state)
            .unwrap();
        assert_eq!(epoch.mean_power, 3.0);
        assert_eq!(epoch.num_samples, 5);

        for _ in 0..60 {
            let cmd = calc_epoch_avg(&mut state);
            assert_eq!(cmd, Command::new(p.base_speed * 3.0, 0.0));
        }

        assert_eq!(state.epoch_hold_remaining, 0);
        assert!(calc_epoch_avg(&mut state).is_stop());
    }

    #[test]
    fn test_group_length_hold() {
        let mut p = Params::default();
        p.epoch_hold = EpochHold::GroupLength;
        let mut state = LawState::default();

        start_epoch(&p, &group(Label::RightHand, &[2.0, 2.0, 2.0]), &mut state).unwrap();
        assert_eq!(state.epoch_hold_remaining, 3);

        for _ in 0..3 {
            assert_eq!(calc_epoch_avg(&mut state), Command::new(0.0, -p.turn_gain * 2.0));
        }
        assert!(calc_epoch_avg(&mut state).is_stop());
    }

    #[test]
    fn test_empty_group() {
        let p = Params::default();
        let mut state = LawState::default();

        assert!(start_epoch(&p, &[], &mut state).is_none());
        assert_eq!(state, LawState::default());
    }
}
