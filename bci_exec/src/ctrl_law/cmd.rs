//! Commands produced by the control laws

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A body velocity command for the pose integrator.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct Command {
    /// Speed along the current heading. Positive is forwards.
    ///
    /// Units: arena units/tick
    pub linear: f64,

    /// Rate of change of heading. Positive turns left.
    ///
    /// Units: radians/tick
    pub angular: f64
}

/// Left and right wheel speeds of a differential drive.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct WheelSpeeds {
    pub left: f64,
    pub right: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Command {
    pub fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }

    /// The zero command, no motion.
    pub fn stop() -> Self {
        Self::default()
    }

    pub fn is_stop(&self) -> bool {
        self.linear == 0.0 && self.angular == 0.0
    }
}

impl WheelSpeeds {
    /// Convert the wheel speeds into a body command for a drive with the given wheelbase.
    ///
    /// Positive angular rate results when the right wheel is faster than the left.
    pub fn to_command(&self, wheelbase_m: f64) -> Command {
        Command {
            linear: (self.right + self.left) / 2.0,
            angular: (self.right - self.left) / wheelbase_m
        }
    }
}
