//! Swerve drivetrain sample.

use serde::{Deserialize, Serialize};

use crate::flip::{Flipper, Symmetry};
use crate::geometry::{ChassisSpeeds, Pose2d};
use crate::interp::{integrate_constant_accel, lerp_array, segment_scale};
use crate::sample::TrajectorySample;

/// Number of swerve modules. Module forces are ordered
/// `[front-left, front-right, back-left, back-right]`.
pub const MODULE_COUNT: usize = 4;

/// State of a swerve robot at one instant. All quantities are field-relative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SwerveSample {
    /// Seconds from the start of the trajectory.
    #[serde(rename = "t")]
    pub timestamp: f64,
    /// Meters.
    pub x: f64,
    pub y: f64,
    /// Radians, 0 = +X.
    pub heading: f64,
    /// m/s.
    pub vx: f64,
    pub vy: f64,
    /// rad/s.
    pub omega: f64,
    /// m/s².
    pub ax: f64,
    pub ay: f64,
    /// rad/s².
    pub alpha: f64,
    /// Per-module force along X (N).
    pub fx: [f64; MODULE_COUNT],
    /// Per-module force along Y (N).
    pub fy: [f64; MODULE_COUNT],
}

/// Mirroring swaps the left and right module of each axle: FL↔FR, BL↔BR.
#[inline]
fn swap_module_sides(f: &[f64; MODULE_COUNT]) -> [f64; MODULE_COUNT] {
    [f[1], f[0], f[3], f[2]]
}

#[inline]
fn negate(f: &[f64; MODULE_COUNT]) -> [f64; MODULE_COUNT] {
    f.map(|v| -v)
}

impl TrajectorySample for SwerveSample {
    #[inline]
    fn timestamp(&self) -> f64 {
        self.timestamp
    }

    fn pose(&self) -> Pose2d {
        Pose2d::new(self.x, self.y, self.heading)
    }

    fn chassis_speeds(&self) -> ChassisSpeeds {
        ChassisSpeeds::new(self.vx, self.vy, self.omega)
    }

    /// Acceleration is piecewise constant between optimizer knots, so pose and
    /// velocity are integrated forward from `self`; accelerations carry over
    /// unchanged. Module forces have no such relation and are blended.
    fn interpolate(&self, end: &Self, timestamp: f64) -> Self {
        let scale = segment_scale(self.timestamp, end.timestamp, timestamp);
        let tau = timestamp - self.timestamp;

        let (x, vx) = integrate_constant_accel(self.x, self.vx, self.ax, tau);
        let (y, vy) = integrate_constant_accel(self.y, self.vy, self.ay, tau);
        let (heading, omega) = integrate_constant_accel(self.heading, self.omega, self.alpha, tau);

        Self {
            timestamp,
            x,
            y,
            heading,
            vx,
            vy,
            omega,
            ax: self.ax,
            ay: self.ay,
            alpha: self.alpha,
            fx: lerp_array(&self.fx, &end.fx, scale),
            fy: lerp_array(&self.fy, &end.fy, scale),
        }
    }

    fn flipped(&self, flipper: &Flipper) -> Self {
        match flipper.symmetry {
            Symmetry::Mirrored => Self {
                timestamp: self.timestamp,
                x: flipper.flip_x(self.x),
                y: flipper.flip_y(self.y),
                heading: flipper.flip_heading(self.heading),
                vx: -self.vx,
                vy: self.vy,
                omega: -self.omega,
                ax: -self.ax,
                ay: self.ay,
                alpha: -self.alpha,
                fx: negate(&swap_module_sides(&self.fx)),
                fy: swap_module_sides(&self.fy),
            },
            Symmetry::RotateAround => Self {
                timestamp: self.timestamp,
                x: flipper.flip_x(self.x),
                y: flipper.flip_y(self.y),
                heading: flipper.flip_heading(self.heading),
                vx: -self.vx,
                vy: -self.vy,
                omega: self.omega,
                ax: -self.ax,
                ay: -self.ay,
                alpha: self.alpha,
                fx: negate(&self.fx),
                fy: negate(&self.fy),
            },
        }
    }

    fn offset_by(&self, offset: f64) -> Self {
        Self {
            timestamp: self.timestamp + offset,
            ..*self
        }
    }
}
