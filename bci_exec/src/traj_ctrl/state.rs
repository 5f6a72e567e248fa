//! Implementations for the TrajCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, trace, warn};
use serde::Serialize;

// Internal
use super::{Params, TrajCtrlError};
use crate::{
    ctrl_law::{self, Command, ControlLaw, LawState, Mode},
    feed::{Label, SampleFeed},
    pose::Pose
};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    module::{ProcResult, State},
    params,
    session::{self, Session}
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Trajectory control module state
#[derive(Default)]
pub struct TrajCtrl {
    pub(crate) params: Params,

    /// The sample feed, `None` until the data has been loaded.
    feed: Option<SampleFeed>,

    state: ControllerState,

    output: Option<OutputData>,

    report: StatusReport,

    arch: Archiver
}

/// The simulation state owned by trajectory control.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ControllerState {
    /// The current (clamped) pose
    pub pose: Pose,

    /// State of the control laws
    pub law: LawState,

    /// Accumulated rotation of the drive wheels, for display.
    ///
    /// Units: radians
    pub wheel_angle_rad: f64,

    /// Number of cycles processed with data available
    pub num_ticks: u64
}

/// Input data to trajectory control.
#[derive(Debug, Copy, Clone)]
pub struct InputData {
    /// Time step to integrate over. Velocities are per tick, so a step of 1 advances a whole
    /// tick.
    pub dt: f64
}

/// Output of trajectory control, everything the renderer needs to present this tick.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct OutputData {
    /// The clamped pose after this tick
    pub pose: Pose,

    /// The command integrated this tick
    pub cmd: Command,

    /// The law which produced the command
    pub law: ControlLaw,

    /// Label acted upon this tick, the epoch's label for the epoch averaged law. `None` if no
    /// data was available.
    pub label: Option<Label>,

    /// Power acted upon this tick, the mean power for the epoch averaged law.
    pub power: f64,

    /// Dwell state machine mode emitted this tick
    pub mode: Mode,

    /// Ticks left in the current dwell mode
    pub hold_ticks_remaining: u32,

    /// Smoothed linear velocity
    pub velocity: f64,

    /// Smoothed angular velocity
    pub turn_velocity: f64,

    /// Accumulated drive wheel rotation
    pub wheel_angle_rad: f64
}

/// Status report for TrajCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    /// No sample data is available yet, the cycle did nothing.
    pub data_not_ready: bool,

    /// The sample (or epoch) label was not recognised and produced no motion.
    pub unrecognised_label: bool,

    /// The feed reached its end and wrapped back to the first sample.
    pub feed_wrapped: bool,

    /// The X position was limited by the arena.
    pub x_limited: bool,

    /// The Z position was limited by the arena.
    pub z_limited: bool,

    /// A new epoch group was consumed this cycle.
    pub new_epoch: bool
}

/// Flat record written to the archive each cycle.
#[derive(Serialize)]
struct ArchRecord {
    time_s: f64,
    tick: u64,
    x_m: f64,
    z_m: f64,
    heading_rad: f64,
    linear: f64,
    angular: f64,
    label: String,
    power: f64,
    mode: String,
    hold_ticks_remaining: u32,
    wheel_angle_rad: f64,
    data_not_ready: bool,
    unrecognised_label: bool,
    feed_wrapped: bool,
    x_limited: bool,
    z_limited: bool,
    new_epoch: bool
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for InputData {
    fn default() -> Self {
        Self { dt: 1.0 }
    }
}

impl OutputData {
    /// The "thought" to display to the user for this tick, e.g. "Move Forward".
    ///
    /// For the dwell state machine this is the active mode, otherwise the label acted upon.
    pub fn thought(&self) -> String {
        match (self.law, self.label) {
            (ControlLaw::DwellStateMachine, _) => self.mode.to_string(),
            (_, Some(label)) => label.to_string(),
            (_, None) => String::from("Waiting for data")
        }
    }
}

impl State for TrajCtrl {
    type InitData = &'static str;
    type InitError = TrajCtrlError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = TrajCtrlError;

    /// Initialise the TrajCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {
        let params: Params = params::load(init_data)
            .map_err(TrajCtrlError::ParamLoadError)?;
        params.ctrl_law.validate()
            .map_err(TrajCtrlError::InvalidParams)?;

        info!("TrajCtrl using the {:?} control law", params.law);
        self.params = params;

        self.arch = Archiver::from_path(session, "traj_ctrl/output.csv")
            .map_err(TrajCtrlError::ArchiveInitError)?;

        Ok(())
    }

    /// Perform cyclic processing of trajectory control.
    ///
    /// This never fails, anomalies are reported through the status report.
    fn proc(&mut self, input_data: &Self::InputData) -> ProcResult<Self> {
        // Clear the status report
        self.report = StatusReport::default();

        let feed = match self.feed.as_mut() {
            Some(f) => f,
            None => return Ok(self.not_ready())
        };
        let wraps_before = feed.num_wraps();

        // Get the command and the label and power it was derived from
        let (cmd, label, power) = if self.params.law.uses_epochs() {
            if self.state.law.epoch_hold_remaining == 0 {
                let group = match feed.next_epoch_group() {
                    Some(g) => g,
                    None => return Ok(self.not_ready())
                };
                ctrl_law::start_epoch(&self.params.ctrl_law, &group, &mut self.state.law);
                self.report.new_epoch = true;
            }

            let cmd = ctrl_law::calc_epoch_avg(&mut self.state.law);

            match self.state.law.epoch {
                Some(e) => (cmd, e.label, e.mean_power),
                None => (cmd, Label::Other, 0.0)
            }
        }
        else {
            let sample = match feed.next() {
                Some(s) => s,
                None => return Ok(self.not_ready())
            };

            let cmd = self.params.law
                .calc(&self.params.ctrl_law, &sample, &mut self.state.law)
                .unwrap_or_default();

            (cmd, sample.label, sample.power)
        };

        self.report.unrecognised_label = !label.is_recognised();
        self.report.feed_wrapped = feed.num_wraps() != wraps_before;

        // Integrate and keep inside the arena
        let mut pose = self.state.pose.integrate(cmd.linear, cmd.angular, input_data.dt);
        let clamp = self.params.arena_bound_m.clamp(&mut pose);
        self.report.x_limited = clamp.x_limited;
        self.report.z_limited = clamp.z_limited;

        self.state.pose = pose;
        self.state.wheel_angle_rad -= cmd.linear * self.params.wheel_spin_gain;
        self.state.num_ticks += 1;

        let output = self.make_output(cmd, Some(label), power);

        trace!(
            "TrajCtrl tick {}: {:?} (p = {:.4}) -> v = {:.5}, w = {:.5}, pose = ({:.4}, {:.4}, {:.4})",
            self.state.num_ticks,
            label,
            power,
            cmd.linear,
            cmd.angular,
            pose.x(),
            pose.z(),
            pose.heading_rad
        );

        self.output = Some(output);

        Ok((output, self.report))
    }

    /// Ready once a feed has been loaded, even if that feed is empty.
    fn is_ready(&self) -> bool {
        self.feed.is_some()
    }
}

impl Archived for TrajCtrl {
    /// Write the last output and status report to the archive.
    ///
    /// Does nothing if the module was not initialised with a session.
    fn write(&mut self) -> Result<(), ArchiveError> {
        if !self.arch.is_init() {
            return Ok(());
        }

        let output = match self.output {
            Some(o) => o,
            None => return Ok(())
        };

        self.arch.serialise(ArchRecord {
            time_s: session::get_elapsed_seconds(),
            tick: self.state.num_ticks,
            x_m: output.pose.x(),
            z_m: output.pose.z(),
            heading_rad: output.pose.heading_rad,
            linear: output.cmd.linear,
            angular: output.cmd.angular,
            label: output.label.map(|l| format!("{:?}", l)).unwrap_or_default(),
            power: output.power,
            mode: format!("{:?}", output.mode),
            hold_ticks_remaining: output.hold_ticks_remaining,
            wheel_angle_rad: output.wheel_angle_rad,
            data_not_ready: self.report.data_not_ready,
            unrecognised_label: self.report.unrecognised_label,
            feed_wrapped: self.report.feed_wrapped,
            x_limited: self.report.x_limited,
            z_limited: self.report.z_limited,
            new_epoch: self.report.new_epoch
        })
    }
}

impl TrajCtrl {

    /// Create a new instance from parameters, without a session and therefore without archiving.
    pub fn new(params: Params) -> Result<Self, TrajCtrlError> {
        params.ctrl_law.validate().map_err(TrajCtrlError::InvalidParams)?;

        Ok(Self {
            params,
            ..Default::default()
        })
    }

    /// Provide the sample feed, marking the module as ready.
    ///
    /// The feed can only be loaded once. Later calls are rejected and leave the original feed
    /// in place.
    pub fn load_feed(&mut self, feed: SampleFeed) -> Result<(), TrajCtrlError> {
        if self.feed.is_some() {
            warn!("Rejecting a second sample feed, TrajCtrl already has one");
            return Err(TrajCtrlError::FeedAlreadyLoaded);
        }

        info!("TrajCtrl sample feed loaded with {} samples", feed.len());
        self.feed = Some(feed);

        Ok(())
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn feed(&self) -> Option<&SampleFeed> {
        self.feed.as_ref()
    }

    /// The output of the most recent cycle, if any.
    pub fn output(&self) -> Option<&OutputData> {
        self.output.as_ref()
    }

    /// Flag the cycle as having no data and produce an output holding the current pose.
    fn not_ready(&mut self) -> (OutputData, StatusReport) {
        self.report.data_not_ready = true;

        let output = self.make_output(Command::stop(), None, 0.0);
        self.output = Some(output);

        (output, self.report)
    }

    fn make_output(&self, cmd: Command, label: Option<Label>, power: f64) -> OutputData {
        OutputData {
            pose: self.state.pose,
            cmd,
            law: self.params.law,
            label,
            power,
            mode: self.state.law.mode,
            hold_ticks_remaining: self.state.law.hold_ticks_remaining,
            velocity: self.state.law.velocity,
            turn_velocity: self.state.law.turn_velocity,
            wheel_angle_rad: self.state.wheel_angle_rad
        }
    }
}
