//! # BCI wheelchair library.
//!
//! This library provides the trajectory core of the BCI wheelchair replay: a replayable feed of
//! classified samples, the control laws mapping them to velocity commands, and the pose
//! integration which turns those commands into a trajectory inside the arena.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Control laws - map classified samples onto velocity commands
pub mod ctrl_law;

/// Data loader - loads the sample feed in the background
pub mod data_loader;

/// Global data store for the executable
pub mod data_store;

/// Sample feed - replays the prerecorded samples
pub mod feed;

/// Executable parameters
pub mod params;

/// Pose - the wheelchair's position and heading, and its integration
pub mod pose;

/// Tick gate - limits how often trajectory control advances
pub mod tick;

/// Trajectory control module - drives the pose from the sample feed
pub mod traj_ctrl;
