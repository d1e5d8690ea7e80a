//! Trajectory container and its derived views.

use serde::Serialize;

use crate::config::FieldConfig;
use crate::error::{LoadError, LoadResult};
use crate::event::EventMarker;
use crate::flip::Flipper;
use crate::geometry::Pose2d;
use crate::sample::{DifferentialSample, DriveType, Sample, SwerveSample, TrajectorySample};
use crate::sampling::{self, DUPLICATE_TIMESTAMP_EPSILON};

/// An immutable, non-empty, time-ordered sequence of samples of one
/// drivetrain model, with its split indices and event markers.
///
/// Invariants (established by `new`, relied on everywhere else):
/// - `samples` is non-empty.
/// - timestamps are finite, `>= 0` and never step back by more than
///   `DUPLICATE_TIMESTAMP_EPSILON`.
/// - the sample type's `validate_batch` accepts the sequence.
/// - `splits[0] == 0`.
///
/// Serialize-only. Construct through `new` or the `stored_trajectory` loaders.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trajectory<S> {
    name: String,
    samples: Vec<S>,
    splits: Vec<usize>,
    events: Vec<EventMarker>,
}

impl<S: TrajectorySample> Trajectory<S> {
    /// Build a trajectory from in-memory parts.
    ///
    /// Fails with `MalformedSample` on a bad timeline or sample shape.
    /// `splits` gets a leading `0` when it is empty or does not start at `0`.
    pub fn new(
        name: impl Into<String>,
        samples: Vec<S>,
        mut splits: Vec<usize>,
        events: Vec<EventMarker>,
    ) -> LoadResult<Self> {
        let name = name.into();
        if samples.is_empty() {
            return Err(LoadError::EmptyTrajectory { name });
        }
        check_timeline(&samples)?;
        S::validate_batch(&samples)?;
        if splits.first() != Some(&0) {
            log::debug!("{name}: splits {splits:?} do not start at 0, prepending");
            splits.insert(0, 0);
        }
        Ok(Self {
            name,
            samples,
            splits,
            events,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &[S] {
        &self.samples
    }

    /// Sample indices where the trajectory may be cut into segments.
    pub fn splits(&self) -> &[usize] {
        &self.splits
    }

    pub fn events(&self) -> &[EventMarker] {
        &self.events
    }

    /// Expected state at `timestamp`, clamped to the first/last sample
    /// outside the trajectory's time range.
    pub fn sample_at(&self, timestamp: f64) -> S {
        sampling::sample_at(&self.samples, timestamp)
            .unwrap_or_else(|| self.samples[0].clone())
    }

    /// `sample_at` seen from the opposite alliance side.
    pub fn sample_at_flipped(&self, timestamp: f64, flipper: &Flipper) -> S {
        self.sample_at(timestamp).flipped(flipper)
    }

    pub fn initial_sample(&self) -> &S {
        &self.samples[0]
    }

    pub fn final_sample(&self) -> &S {
        &self.samples[self.samples.len() - 1]
    }

    /// Timestamp of the last sample, in seconds.
    pub fn total_time(&self) -> f64 {
        self.final_sample().timestamp()
    }

    /// Pose of every sample, in order.
    pub fn poses(&self) -> Vec<Pose2d> {
        self.samples.iter().map(TrajectorySample::pose).collect()
    }

    /// Starting pose, flipped when a flipper is given.
    pub fn initial_pose(&self, flipper: Option<&Flipper>) -> Pose2d {
        pose_of(self.initial_sample(), flipper)
    }

    /// Ending pose, flipped when a flipper is given.
    pub fn final_pose(&self, flipper: Option<&Flipper>) -> Pose2d {
        pose_of(self.final_sample(), flipper)
    }

    /// The whole trajectory for the opposite alliance in `year`, using the
    /// default field configuration. Splits and events are unchanged.
    pub fn flipped(&self, year: i32) -> Self {
        self.flipped_with(&FieldConfig::default().flipper_for_year(year))
    }

    pub fn flipped_with(&self, flipper: &Flipper) -> Self {
        Self {
            name: self.name.clone(),
            samples: self.samples.iter().map(|s| s.flipped(flipper)).collect(),
            splits: self.splits.clone(),
            events: self.events.clone(),
        }
    }

    /// All markers labelled `event`, in document order.
    pub fn events_named(&self, event: &str) -> Vec<&EventMarker> {
        self.events.iter().filter(|e| e.event == event).collect()
    }

    /// Sub-trajectory for split segment `index`, named `name[index]`.
    ///
    /// The segment runs from `splits[index]` through `splits[index + 1]`
    /// inclusive (or to the last sample for the final segment). Samples and
    /// the markers inside the segment's time window are re-based to start at
    /// zero. Returns `None` for an out-of-range index or a split that points
    /// past the samples.
    pub fn split(&self, index: usize) -> Option<Self> {
        let start = *self.splits.get(index)?;
        let end = match self.splits.get(index + 1) {
            Some(next) => (next + 1).min(self.samples.len()),
            None => self.samples.len(),
        };
        if start >= end {
            return None;
        }
        let segment = &self.samples[start..end];
        let start_time = segment[0].timestamp();
        let end_time = segment[segment.len() - 1].timestamp();

        let samples = segment.iter().map(|s| s.offset_by(-start_time)).collect();
        let events = self
            .events
            .iter()
            .filter(|e| e.timestamp >= start_time && e.timestamp <= end_time)
            .map(|e| e.offset_by(-start_time))
            .collect();

        Some(Self {
            name: format!("{}[{index}]", self.name),
            samples,
            splits: vec![0],
            events,
        })
    }
}

fn check_timeline<S: TrajectorySample>(samples: &[S]) -> LoadResult<()> {
    let mut previous: Option<f64> = None;
    for (index, s) in samples.iter().enumerate() {
        let t = s.timestamp();
        let stepped_back = previous.is_some_and(|p| t < p - DUPLICATE_TIMESTAMP_EPSILON);
        if !t.is_finite() || t < 0.0 || stepped_back {
            return Err(LoadError::MalformedSample { index, field: "t" });
        }
        previous = Some(t);
    }
    Ok(())
}

fn pose_of<S: TrajectorySample>(sample: &S, flipper: Option<&Flipper>) -> Pose2d {
    match flipper {
        Some(f) => f.flip_pose(&sample.pose()),
        None => sample.pose(),
    }
}

/// A trajectory whose drivetrain model is only known once the document is read.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum AnyTrajectory {
    Differential(Trajectory<DifferentialSample>),
    Swerve(Trajectory<SwerveSample>),
}

impl AnyTrajectory {
    pub fn drive_type(&self) -> DriveType {
        match self {
            AnyTrajectory::Differential(_) => DriveType::Differential,
            AnyTrajectory::Swerve(_) => DriveType::Swerve,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AnyTrajectory::Differential(t) => t.name(),
            AnyTrajectory::Swerve(t) => t.name(),
        }
    }

    pub fn splits(&self) -> &[usize] {
        match self {
            AnyTrajectory::Differential(t) => t.splits(),
            AnyTrajectory::Swerve(t) => t.splits(),
        }
    }

    pub fn events(&self) -> &[EventMarker] {
        match self {
            AnyTrajectory::Differential(t) => t.events(),
            AnyTrajectory::Swerve(t) => t.events(),
        }
    }

    pub fn total_time(&self) -> f64 {
        match self {
            AnyTrajectory::Differential(t) => t.total_time(),
            AnyTrajectory::Swerve(t) => t.total_time(),
        }
    }

    pub fn sample_at(&self, timestamp: f64) -> Sample {
        match self {
            AnyTrajectory::Differential(t) => t.sample_at(timestamp).into(),
            AnyTrajectory::Swerve(t) => t.sample_at(timestamp).into(),
        }
    }

    pub fn flipped(&self, year: i32) -> AnyTrajectory {
        match self {
            AnyTrajectory::Differential(t) => AnyTrajectory::Differential(t.flipped(year)),
            AnyTrajectory::Swerve(t) => AnyTrajectory::Swerve(t.flipped(year)),
        }
    }

    pub fn initial_pose(&self, flipper: Option<&Flipper>) -> Pose2d {
        match self {
            AnyTrajectory::Differential(t) => t.initial_pose(flipper),
            AnyTrajectory::Swerve(t) => t.initial_pose(flipper),
        }
    }

    pub fn final_pose(&self, flipper: Option<&Flipper>) -> Pose2d {
        match self {
            AnyTrajectory::Differential(t) => t.final_pose(flipper),
            AnyTrajectory::Swerve(t) => t.final_pose(flipper),
        }
    }

    pub fn events_named(&self, event: &str) -> Vec<&EventMarker> {
        match self {
            AnyTrajectory::Differential(t) => t.events_named(event),
            AnyTrajectory::Swerve(t) => t.events_named(event),
        }
    }

    /// See `Trajectory::split`. The segment keeps the drivetrain model.
    pub fn split(&self, index: usize) -> Option<AnyTrajectory> {
        match self {
            AnyTrajectory::Differential(t) => t.split(index).map(AnyTrajectory::Differential),
            AnyTrajectory::Swerve(t) => t.split(index).map(AnyTrajectory::Swerve),
        }
    }

    pub fn as_differential(&self) -> Option<&Trajectory<DifferentialSample>> {
        match self {
            AnyTrajectory::Differential(t) => Some(t),
            AnyTrajectory::Swerve(_) => None,
        }
    }

    pub fn as_swerve(&self) -> Option<&Trajectory<SwerveSample>> {
        match self {
            AnyTrajectory::Swerve(t) => Some(t),
            AnyTrajectory::Differential(_) => None,
        }
    }
}

impl From<Trajectory<DifferentialSample>> for AnyTrajectory {
    fn from(t: Trajectory<DifferentialSample>) -> Self {
        AnyTrajectory::Differential(t)
    }
}

impl From<Trajectory<SwerveSample>> for AnyTrajectory {
    fn from(t: Trajectory<SwerveSample>) -> Self {
        AnyTrajectory::Swerve(t)
    }
}
