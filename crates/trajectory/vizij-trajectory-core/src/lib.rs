//! Vizij Trajectory Core (engine-agnostic)
//!
//! Loads versioned, optimizer-produced robot trajectories and answers "what
//! state should the robot be in at time t?" at control-loop rates.
//!
//! - `stored_trajectory` parses the trajectory document into typed samples,
//!   split indices and event markers, gated on `TRAJ_SCHEMA_VERSION`.
//! - `sampling` is the binary-search lookup shared by both drivetrain models.
//! - `sample` holds the differential and swerve state types and their
//!   interpolation rules.
//! - `flip` and `config` map a trajectory onto the opposite alliance side for
//!   a given field year.

pub mod coercion;
pub mod config;
pub mod error;
pub mod event;
pub mod flip;
pub mod geometry;
pub mod interp;
pub mod sample;
pub mod sampling;
pub mod stored_trajectory;
pub mod trajectory;

// Re-exports for consumers (controllers, loggers, bindings)
pub use config::{FieldConfig, YearSymmetry, DEFAULT_YEAR, FIELD_LENGTH, FIELD_WIDTH};
pub use error::{ConfigError, LoadError, LoadResult};
pub use event::{resolve_event_marker, EventMarker};
pub use flip::{Flipper, Symmetry};
pub use geometry::{ChassisSpeeds, Pose2d};
pub use sample::{DifferentialSample, DriveType, Sample, SwerveSample, TrajectorySample};
pub use sampling::{find_segment, sample_at, Segment};
pub use stored_trajectory::{
    parse_any_trajectory_json, parse_any_trajectory_value, parse_differential_trajectory_json,
    parse_swerve_trajectory_json, parse_trajectory_json, parse_trajectory_value, SampleRecord,
    TRAJ_SCHEMA_VERSION,
};
pub use trajectory::{AnyTrajectory, Trajectory};
