//! Arena boundary clamping

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use util::maths;

use super::Pose;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The square (or rectangular) region the wheelchair is kept inside, centred on the origin.
///
/// In parameter files this is either a single number or a table with `x_m` and `z_m` keys.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArenaBound {
    /// The same half-extent on both axes.
    Square(f64),

    /// A separate half-extent for each axis.
    PerAxis {
        x_m: f64,
        z_m: f64
    }
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Which axes were limited by a clamp.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct ClampReport {
    pub x_limited: bool,
    pub z_limited: bool
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ArenaBound {
    fn default() -> Self {
        ArenaBound::Square(9.0)
    }
}

impl ArenaBound {
    /// The (x, z) half-extents of the arena.
    pub fn half_extents(&self) -> (f64, f64) {
        match *self {
            ArenaBound::Square(b) => (b.abs(), b.abs()),
            ArenaBound::PerAxis { x_m, z_m } => (x_m.abs(), z_m.abs())
        }
    }

    /// Clamp the pose's position into the arena, each axis independently.
    ///
    /// Heading is left untouched.
    pub fn clamp(&self, pose: &mut Pose) -> ClampReport {
        let (bx, bz) = self.half_extents();

        let (x, x_limited) = maths::clamp(pose.x(), -bx, bx);
        let (z, z_limited) = maths::clamp(pose.z(), -bz, bz);

        pose.position_m[0] = x;
        pose.position_m[1] = z;

        ClampReport { x_limited, z_limited }
    }

    /// Returns true if the pose lies within the arena, including its edges.
    pub fn contains(&self, pose: &Pose) -> bool {
        let (bx, bz) = self.half_extents();
        pose.x().abs() <= bx && pose.z().abs() <= bz
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_corner_clamp() {
        let bound = ArenaBound::Square(9.0);
        let mut pose = Pose::new(12.0, -30.0, 1.0);

        let report = bound.clamp(&mut pose);

        // Corner clamping, not radial
        assert_eq!(pose, Pose::new(9.0, -9.0, 1.0));
        assert!(report.x_limited && report.z_limited);
        assert!(bound.contains(&pose));
    }

    #[test]
    fn test_per_axis_clamp() {
        let bound = ArenaBound::PerAxis { x_m: 2.0, z_m: 5.0 };
        let mut pose = Pose::new(-1.0, 6.0, 0.0);

        let report = bound.clamp(&mut pose);

        assert_eq!(pose.x(), -1.0);
        assert_eq!(pose.z(), 5.0);
        assert_eq!(report, ClampReport { x_limited: false, z_limited: true });
    }
}
