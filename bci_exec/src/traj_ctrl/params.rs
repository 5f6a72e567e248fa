//! Trajectory control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use crate::{ctrl_law, ctrl_law::ControlLaw, pose::ArenaBound};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for trajectory control
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// The control law driving the wheelchair
    pub law: ControlLaw,

    /// Half-extent(s) of the arena the wheelchair is kept inside
    pub arena_bound_m: ArenaBound,

    /// Wheel rotation per unit of linear velocity, used for the displayed wheel angle.
    ///
    /// Units: radians per (arena unit/tick)
    pub wheel_spin_gain: f64,

    /// Parameters of the control laws
    pub ctrl_law: ctrl_law::Params
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            law: ControlLaw::default(),
            arena_bound_m: ArenaBound::default(),
            wheel_spin_gain: 20.0,
            ctrl_law: ctrl_law::Params::default()
        }
    }
}
