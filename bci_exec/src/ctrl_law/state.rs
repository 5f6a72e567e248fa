//! Mutable state carried between ticks by the control laws

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::fmt::Display;
use serde::Serialize;

use super::Command;
use crate::feed::Label;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// State of the control laws.
///
/// This is the union of what every law needs, each law only reads and writes its own fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LawState {

    // ---- SMOOTHED ----

    /// Current smoothed linear velocity.
    pub velocity: f64,

    /// Current smoothed angular velocity.
    pub turn_velocity: f64,

    // ---- DWELL STATE MACHINE ----

    /// The active manouvre mode.
    pub mode: Mode,

    /// Ticks left in the active mode after the most recent one.
    pub hold_ticks_remaining: u32,

    /// The label which triggered the last mode transition, `None` until the first transition.
    pub last_label: Option<Label>,

    // ---- EPOCH AVERAGED ----

    /// The command derived from the current epoch.
    pub epoch: Option<EpochCmd>,

    /// Ticks left to hold the current epoch's command.
    pub epoch_hold_remaining: u32
}

/// The command derived from a single epoch group.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct EpochCmd {
    /// Epoch identifier shared by the group
    pub epoch_id: Option<i64>,

    /// Label of the group, taken from its first sample
    pub label: Label,

    /// Mean power over the group
    pub mean_power: f64,

    /// Number of samples in the group
    pub num_samples: usize,

    /// The command held for the epoch
    pub cmd: Command
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Modes of the dwell state machine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Mode {
    Idle,
    MoveForward,
    TurnLeft,
    TurnRight,
    Pause
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Mode {
    fn default() -> Self {
        Mode::Idle
    }
}

impl Mode {
    /// The mode entered on an edge to the given label, or `None` if the label has no mode.
    pub fn for_label(label: Label) -> Option<Self> {
        match label {
            Label::Feet => Some(Mode::MoveForward),
            Label::LeftHand => Some(Mode::TurnLeft),
            Label::RightHand => Some(Mode::TurnRight),
            Label::Tongue => Some(Mode::Pause),
            Label::Other => None
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Idle => write!(f, "Idle"),
            Mode::MoveForward => write!(f, "Move Forward"),
            Mode::TurnLeft => write!(f, "Turn Left"),
            Mode::TurnRight => write!(f, "Turn Right"),
            Mode::Pause => write!(f, "Pause")
        }
    }
}
