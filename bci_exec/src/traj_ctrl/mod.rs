//! # Trajectory control module
//!
//! Trajectory control turns the replayed stream of classified samples into a continuous
//! trajectory of the wheelchair. Each cycle it:
//!
//! 1. Draws the next sample from the feed, or for the epoch averaged law a new epoch group when
//!    the previous epoch's hold has run out.
//! 2. Computes a velocity command with the configured [`ControlLaw`].
//! 3. Integrates the pose with the command and clamps it into the arena.
//!
//! Until a feed has been loaded every cycle is a no-op which is flagged in the status report.
//! Unrecognised labels and the feed wrapping around are likewise reported rather than raised as
//! errors.
//!
//! [`ControlLaw`]: crate::ctrl_law::ControlLaw

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;

use crate::ctrl_law::CtrlLawError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during TrajCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum TrajCtrlError {
    #[error("Failed to load TrajCtrl parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Invalid control law parameters: {0}")]
    InvalidParams(CtrlLawError),

    #[error("A sample feed has already been loaded, the new feed was rejected")]
    FeedAlreadyLoaded,

    #[error("Failed to create the TrajCtrl archive: {0}")]
    ArchiveInitError(util::archive::ArchiveError)
}
