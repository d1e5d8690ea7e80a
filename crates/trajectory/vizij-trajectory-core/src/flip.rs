//! Alliance flip transform.
//!
//! A playing field is symmetric in one of two ways, depending on the game
//! year. `Flipper` pairs that symmetry with the field dimensions and maps a
//! blue-side coordinate onto the equivalent red-side coordinate. Samples use
//! it through `TrajectorySample::flipped`.

use serde::{Deserialize, Serialize};

use crate::geometry::Pose2d;

/// Field symmetry used to map one alliance side onto the other.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Symmetry {
    /// Reflection across the midline between the driver stations:
    /// x becomes `length - x`, y is unchanged, heading becomes `pi - heading`.
    Mirrored,
    /// Half turn about the field center:
    /// x becomes `length - x`, y becomes `width - y`, heading becomes `pi + heading`.
    RotateAround,
}

impl Symmetry {
    #[inline]
    pub fn flip_heading(self, heading: f64) -> f64 {
        match self {
            Symmetry::Mirrored => std::f64::consts::PI - heading,
            Symmetry::RotateAround => std::f64::consts::PI + heading,
        }
    }
}

/// A symmetry bound to concrete field dimensions (meters).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flipper {
    pub symmetry: Symmetry,
    pub field_length: f64,
    pub field_width: f64,
}

impl Flipper {
    pub const fn new(symmetry: Symmetry, field_length: f64, field_width: f64) -> Self {
        Self {
            symmetry,
            field_length,
            field_width,
        }
    }

    pub const fn mirrored(field_length: f64, field_width: f64) -> Self {
        Self::new(Symmetry::Mirrored, field_length, field_width)
    }

    pub const fn rotate_around(field_length: f64, field_width: f64) -> Self {
        Self::new(Symmetry::RotateAround, field_length, field_width)
    }

    #[inline]
    pub fn is_mirrored(&self) -> bool {
        self.symmetry == Symmetry::Mirrored
    }

    #[inline]
    pub fn flip_x(&self, x: f64) -> f64 {
        self.field_length - x
    }

    #[inline]
    pub fn flip_y(&self, y: f64) -> f64 {
        match self.symmetry {
            Symmetry::Mirrored => y,
            Symmetry::RotateAround => self.field_width - y,
        }
    }

    #[inline]
    pub fn flip_heading(&self, heading: f64) -> f64 {
        self.symmetry.flip_heading(heading)
    }

    pub fn flip_pose(&self, pose: &Pose2d) -> Pose2d {
        Pose2d {
            x: self.flip_x(pose.x),
            y: self.flip_y(pose.y),
            heading: self.flip_heading(pose.heading),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn mirrored_keeps_y_and_reflects_heading() {
        let f = Flipper::mirrored(16.0, 8.0);
        assert_eq!(f.flip_x(1.0), 15.0);
        assert_eq!(f.flip_y(2.0), 2.0);
        assert_eq!(f.flip_heading(0.25), PI - 0.25);
        assert!(f.is_mirrored());
    }

    #[test]
    fn rotate_around_flips_both_axes_and_turns_heading() {
        let f = Flipper::rotate_around(16.0, 8.0);
        let p = f.flip_pose(&Pose2d::new(1.0, 2.0, 0.5));
        assert_eq!(p, Pose2d::new(15.0, 6.0, PI + 0.5));
        assert!(!f.is_mirrored());
    }

    #[test]
    fn symmetry_serializes_camel_case() {
        let s = serde_json::to_string(&Symmetry::RotateAround).unwrap();
        assert_eq!(s, "\"rotateAround\"");
        let back: Symmetry = serde_json::from_str("\"mirrored\"").unwrap();
        assert_eq!(back, Symmetry::Mirrored);
    }
}
