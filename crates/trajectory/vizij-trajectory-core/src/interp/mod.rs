//! Interpolation helpers shared by the sample types.
//!
//! Differential samples blend every channel linearly. Swerve samples integrate
//! pose and velocity under constant acceleration and only blend module forces.

pub mod functions;

pub use functions::{integrate_constant_accel, lerp, lerp_array, lerp_slice, segment_scale};
