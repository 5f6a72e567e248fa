//! # Pose module
//!
//! Provides the 2D pose of the wheelchair and its integration. The pose lives on the floor
//! plane of the arena, using the X and Z axes of the scene, with heading measured from the +X
//! axis towards +Z.
//!
//! Heading is never normalised, turning accumulates without bound so that opposite turns of the
//! same size return the heading exactly to where it began.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod arena;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// Internal
pub use arena::*;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The position and heading of the wheelchair on the arena floor.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Pose {
    /// Position on the floor plane, stored as (x, z).
    ///
    /// Units: arena units
    pub position_m: Vector2<f64>,

    /// Heading, the angle from the +X axis towards +Z. Unbounded.
    ///
    /// Units: radians
    pub heading_rad: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    pub fn new(x: f64, z: f64, heading_rad: f64) -> Self {
        Self {
            position_m: Vector2::new(x, z),
            heading_rad
        }
    }

    pub fn x(&self) -> f64 {
        self.position_m[0]
    }

    pub fn z(&self) -> f64 {
        self.position_m[1]
    }

    /// Advance the pose by one step of `dt` at the given linear and angular velocities.
    ///
    /// The heading is updated first and the position then moves along the new heading. This
    /// ordering determines the shape of the trajectory and must be preserved.
    ///
    /// No clamping is performed here, see [`ArenaBound::clamp`].
    pub fn integrate(&self, linear: f64, angular: f64, dt: f64) -> Pose {
        let heading_rad = self.heading_rad + angular * dt;

        let forward = Vector2::new(heading_rad.cos(), heading_rad.sin());

        Pose {
            position_m: self.position_m + forward * (linear * dt),
            heading_rad
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_heading_before_position() {
        // Turning a quarter turn while moving one unit should move along +Z, not +X
        let pose = Pose::default().integrate(1.0, FRAC_PI_2, 1.0);

        assert!(pose.x().abs() < 1e-12);
        assert!((pose.z() - 1.0).abs() < 1e-12);
        assert_eq!(pose.heading_rad, FRAC_PI_2);
    }

    #[test]
    fn test_dt_scaling() {
        let pose = Pose::new(1.0, -1.0, 0.0).integrate(2.0, 0.0, 0.15);
        assert!((pose.x() - 1.3).abs() < 1e-12);
        assert_eq!(pose.z(), -1.0);
    }

    #[test]
    fn test_heading_round_trip() {
        let start = Pose::new(0.0, 0.0, 0.3);

        let turned = start.integrate(0.0, 0.2, 1.0).integrate(0.0, -0.2, 1.0);

        assert!((turned.heading_rad - start.heading_rad).abs() < 1e-15);
        assert_eq!(turned.position_m, start.position_m);
    }

    #[test]
    fn test_heading_not_wrapped() {
        let mut pose = Pose::default();
        for _ in 0..10 {
            pose = pose.integrate(0.0, 1.0, 1.0);
        }

        // Ten radians is well beyond 2 pi and must not have been wrapped
        assert!((pose.heading_rad - 10.0).abs() < 1e-12);
    }
}
