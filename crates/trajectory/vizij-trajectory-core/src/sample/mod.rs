//! Kinematic sample types.
//!
//! Two drivetrain models, one capability contract. `Trajectory<S>` and the
//! sampler are generic over `TrajectorySample`. `Sample` is the tagged form
//! handed out when the drivetrain is only known at load time.

pub mod differential;
pub mod swerve;

use serde::{Deserialize, Serialize};

use crate::error::LoadResult;
use crate::flip::Flipper;
use crate::geometry::{ChassisSpeeds, Pose2d};

pub use differential::DifferentialSample;
pub use swerve::{SwerveSample, MODULE_COUNT};

/// Capability contract implemented once per drivetrain model.
pub trait TrajectorySample: Clone + PartialEq {
    /// Seconds from the start of the trajectory.
    fn timestamp(&self) -> f64;

    fn pose(&self) -> Pose2d;

    /// Field-relative chassis speeds.
    fn chassis_speeds(&self) -> ChassisSpeeds;

    /// State at `timestamp`, which lies between `self` and `end`.
    /// Callers guarantee `end.timestamp() - self.timestamp()` is not near zero.
    fn interpolate(&self, end: &Self, timestamp: f64) -> Self;

    /// The same state seen from the opposite alliance side.
    fn flipped(&self, flipper: &Flipper) -> Self;

    /// Copy with the timestamp shifted by `offset` seconds.
    fn offset_by(&self, offset: f64) -> Self;

    /// Shape checks across a whole sample sequence, run by `Trajectory::new`.
    fn validate_batch(_samples: &[Self]) -> LoadResult<()> {
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriveType {
    Differential,
    Swerve,
}

/// A sample of either drivetrain model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Sample {
    Differential(DifferentialSample),
    Swerve(SwerveSample),
}

impl Sample {
    #[inline]
    pub fn drive_type(&self) -> DriveType {
        match self {
            Sample::Differential(_) => DriveType::Differential,
            Sample::Swerve(_) => DriveType::Swerve,
        }
    }

    pub fn timestamp(&self) -> f64 {
        match self {
            Sample::Differential(s) => s.timestamp(),
            Sample::Swerve(s) => s.timestamp(),
        }
    }

    pub fn pose(&self) -> Pose2d {
        match self {
            Sample::Differential(s) => s.pose(),
            Sample::Swerve(s) => s.pose(),
        }
    }

    pub fn chassis_speeds(&self) -> ChassisSpeeds {
        match self {
            Sample::Differential(s) => s.chassis_speeds(),
            Sample::Swerve(s) => s.chassis_speeds(),
        }
    }

    pub fn flipped(&self, flipper: &Flipper) -> Sample {
        match self {
            Sample::Differential(s) => Sample::Differential(s.flipped(flipper)),
            Sample::Swerve(s) => Sample::Swerve(s.flipped(flipper)),
        }
    }

    pub fn as_differential(&self) -> Option<&DifferentialSample> {
        match self {
            Sample::Differential(s) => Some(s),
            Sample::Swerve(_) => None,
        }
    }

    pub fn as_swerve(&self) -> Option<&SwerveSample> {
        match self {
            Sample::Swerve(s) => Some(s),
            Sample::Differential(_) => None,
        }
    }
}

impl From<DifferentialSample> for Sample {
    fn from(s: DifferentialSample) -> Self {
        Sample::Differential(s)
    }
}

impl From<SwerveSample> for Sample {
    fn from(s: SwerveSample) -> Self {
        Sample::Swerve(s)
    }
}
