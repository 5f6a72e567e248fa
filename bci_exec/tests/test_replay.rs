//! Full replays of the recorded session through trajectory control.

use std::path::PathBuf;

use bci_lib::{
    ctrl_law::{ControlLaw, EpochHold},
    feed::{Label, SampleFeed},
    params::ExecParams,
    pose::ArenaBound,
    traj_ctrl::{InputData, Params, TrajCtrl},
};
use util::{logger::LevelFilter, module::State};

fn sw_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..")
}

fn recorded_feed() -> SampleFeed {
    SampleFeed::from_json_file(sw_root().join("data/combined_10_samples_per_label.json")).unwrap()
}

fn shipped_params() -> Params {
    util::params::load_path(sw_root().join("params/traj_ctrl.toml")).unwrap()
}

#[test]
fn test_shipped_params() {
    let params = shipped_params();

    assert_eq!(params.law, ControlLaw::Smoothed);
    assert_eq!(params.arena_bound_m, ArenaBound::Square(9.0));
    assert_eq!(params.ctrl_law.epoch_hold, EpochHold::Ticks(60));
    assert_eq!(params.ctrl_law.dwell.turn_ticks, 80);
    assert!(params.ctrl_law.validate().is_ok());
}

#[test]
fn test_shipped_exec_params() {
    let params: ExecParams = util::params::load_path(sw_root().join("params/bci_exec.toml")).unwrap();

    assert!(params.validate().is_ok());
    assert!(params.log.validate().is_ok());
    assert_eq!(params.log.stdout_level, LevelFilter::Info);
    assert_eq!(
        params.log.targets.get("bci_lib::traj_ctrl"),
        Some(&LevelFilter::Debug)
    );
    assert!(sw_root().join(&params.data_file).exists());
}

#[test]
fn test_partial_params() {
    let params: Params = toml::from_str(
        r#"
        law = "EpochAveraged"
        arena_bound_m = { x_m = 4.0, z_m = 6.0 }

        [ctrl_law]
        epoch_hold = "GroupLength"
        "#,
    )
    .unwrap();

    assert_eq!(params.law, ControlLaw::EpochAveraged);
    assert_eq!(params.arena_bound_m.half_extents(), (4.0, 6.0));
    assert_eq!(params.ctrl_law.epoch_hold, EpochHold::GroupLength);

    // Unspecified values keep their defaults
    assert_eq!(params.ctrl_law.smoothing_alpha, 0.05);
    assert_eq!(params.wheel_spin_gain, 20.0);
}

#[test]
fn test_recorded_feed() {
    let feed = recorded_feed();

    assert_eq!(feed.len(), 40);
    for label in [Label::Feet, Label::Tongue, Label::LeftHand, Label::RightHand].iter() {
        assert_eq!(feed.samples().iter().filter(|s| s.label == *label).count(), 10);
    }
    assert!(feed.samples().iter().all(|s| s.power >= 0.0));
}

/// The smoothed law must reproduce the reference replay loop exactly.
#[test]
fn test_smoothed_reproduction() {
    let feed = recorded_feed();
    let samples = feed.samples().to_vec();

    let mut tc = TrajCtrl::new(shipped_params()).unwrap();
    tc.load_feed(feed).unwrap();

    let (mut x, mut z, mut theta) = (0f64, 0f64, 0f64);
    let (mut velocity, mut turn_velocity) = (0f64, 0f64);

    for i in 0..500 {
        let sample = samples[i % samples.len()];
        let power = sample.power;

        let mut target_speed = 0.0;
        let mut target_turn = 0.0;
        match sample.label {
            Label::Feet => target_speed = 0.01 * power,
            Label::Tongue => target_speed = -0.01 * power,
            Label::LeftHand => target_turn = 0.01 * power,
            Label::RightHand => target_turn = -0.01 * power,
            Label::Other => (),
        }

        velocity += (target_speed - velocity) * 0.05;
        turn_velocity += (target_turn - turn_velocity) * 0.05;

        theta += turn_velocity;
        x += velocity * theta.cos();
        z += velocity * theta.sin();

        x = x.min(9.0).max(-9.0);
        z = z.min(9.0).max(-9.0);

        let (out, _) = tc.proc(&InputData::default()).unwrap();

        assert_eq!(out.pose.x(), x, "x diverged on tick {}", i);
        assert_eq!(out.pose.z(), z, "z diverged on tick {}", i);
        assert_eq!(out.pose.heading_rad, theta, "heading diverged on tick {}", i);
    }
}

#[test]
fn test_all_laws_stay_in_arena() {
    let laws = [
        ControlLaw::Direct,
        ControlLaw::Smoothed,
        ControlLaw::DifferentialDrive,
        ControlLaw::DwellStateMachine,
        ControlLaw::EpochAveraged,
    ];

    for law in laws.iter() {
        let mut params = shipped_params();
        params.law = *law;

        let mut tc = TrajCtrl::new(params).unwrap();
        tc.load_feed(recorded_feed()).unwrap();

        let mut num_wraps = 0;
        for _ in 0..4000 {
            let (out, rpt) = tc.proc(&InputData::default()).unwrap();

            assert!(!rpt.data_not_ready);
            assert!(!rpt.unrecognised_label);
            assert!(out.pose.x().abs() <= 9.0 && out.pose.z().abs() <= 9.0);

            if rpt.feed_wrapped {
                num_wraps += 1;
            }
        }

        assert!(num_wraps > 0, "{:?} never wrapped the feed", law);
        assert_eq!(tc.state().num_ticks, 4000);
    }
}
