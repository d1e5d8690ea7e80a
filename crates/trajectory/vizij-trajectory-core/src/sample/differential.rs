//! Differential drivetrain sample.

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LoadResult};
use crate::flip::{Flipper, Symmetry};
use crate::geometry::{ChassisSpeeds, Pose2d};
use crate::interp::{lerp, lerp_slice, segment_scale};
use crate::sample::TrajectorySample;

/// State of a differential (left/right) robot at one instant.
///
/// `fl`/`fr` hold one force per module on that side. Older documents carry a
/// single scalar per side, which loads as a one-element vector. Both sides
/// always have the same length.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DifferentialSample {
    /// Seconds from the start of the trajectory.
    #[serde(rename = "t")]
    pub timestamp: f64,
    /// Meters.
    pub x: f64,
    pub y: f64,
    /// Radians, 0 = +X.
    pub heading: f64,
    /// Left/right wheel speeds (m/s).
    pub vl: f64,
    pub vr: f64,
    /// rad/s.
    pub omega: f64,
    /// Left/right wheel accelerations (m/s²).
    pub al: f64,
    pub ar: f64,
    /// rad/s².
    #[serde(default)]
    pub alpha: f64,
    /// Left/right side forces (N).
    pub fl: Vec<f64>,
    pub fr: Vec<f64>,
}

impl TrajectorySample for DifferentialSample {
    #[inline]
    fn timestamp(&self) -> f64 {
        self.timestamp
    }

    fn pose(&self) -> Pose2d {
        Pose2d::new(self.x, self.y, self.heading)
    }

    fn chassis_speeds(&self) -> ChassisSpeeds {
        ChassisSpeeds::new((self.vl + self.vr) / 2.0, 0.0, self.omega)
    }

    /// Field-wise linear blend of every channel.
    fn interpolate(&self, end: &Self, timestamp: f64) -> Self {
        let s = segment_scale(self.timestamp, end.timestamp, timestamp);
        Self {
            timestamp,
            x: lerp(self.x, end.x, s),
            y: lerp(self.y, end.y, s),
            heading: lerp(self.heading, end.heading, s),
            vl: lerp(self.vl, end.vl, s),
            vr: lerp(self.vr, end.vr, s),
            omega: lerp(self.omega, end.omega, s),
            al: lerp(self.al, end.al, s),
            ar: lerp(self.ar, end.ar, s),
            alpha: lerp(self.alpha, end.alpha, s),
            fl: lerp_slice(&self.fl, &end.fl, s),
            fr: lerp_slice(&self.fr, &end.fr, s),
        }
    }

    fn flipped(&self, flipper: &Flipper) -> Self {
        match flipper.symmetry {
            // A reflection changes handedness: the left side becomes the right.
            Symmetry::Mirrored => Self {
                timestamp: self.timestamp,
                x: flipper.flip_x(self.x),
                y: flipper.flip_y(self.y),
                heading: flipper.flip_heading(self.heading),
                vl: self.vr,
                vr: self.vl,
                omega: -self.omega,
                al: self.ar,
                ar: self.al,
                alpha: -self.alpha,
                fl: self.fr.clone(),
                fr: self.fl.clone(),
            },
            Symmetry::RotateAround => Self {
                timestamp: self.timestamp,
                x: flipper.flip_x(self.x),
                y: flipper.flip_y(self.y),
                heading: flipper.flip_heading(self.heading),
                vl: self.vl,
                vr: self.vr,
                omega: self.omega,
                al: self.al,
                ar: self.ar,
                alpha: self.alpha,
                fl: self.fl.clone(),
                fr: self.fr.clone(),
            },
        }
    }

    fn offset_by(&self, offset: f64) -> Self {
        Self {
            timestamp: self.timestamp + offset,
            ..self.clone()
        }
    }

    /// The first sample fixes the side-count. Every sample needs at least one
    /// force per side and the same count on both sides.
    fn validate_batch(samples: &[Self]) -> LoadResult<()> {
        let Some(first) = samples.first() else {
            return Ok(());
        };
        let sides = first.fl.len();
        for (index, s) in samples.iter().enumerate() {
            if s.fl.is_empty() || s.fl.len() != sides {
                return Err(LoadError::MalformedSample { index, field: "fl" });
            }
            if s.fr.len() != sides {
                return Err(LoadError::MalformedSample { index, field: "fr" });
            }
        }
        Ok(())
    }
}
