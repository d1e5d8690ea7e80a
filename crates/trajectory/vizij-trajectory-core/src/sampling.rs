//! Time lookup over an ordered sample sequence.
//!
//! Model:
//! - Samples are sorted ascending by timestamp; near-duplicate timestamps are allowed.
//! - Timestamps before the first or after the last sample clamp to that sample.
//! - A timestamp that hits a sample exactly returns that sample untouched.
//! - Otherwise the two neighbours are interpolated by the sample type's own rule.
//!
//! API:
//! - find_segment(&[S], t) -> which sample(s) govern t
//! - sample_at(&[S], t) -> the state at t

use crate::sample::TrajectorySample;

/// Neighbours closer together than this are treated as one instant.
pub const DUPLICATE_TIMESTAMP_EPSILON: f64 = 1e-6;

/// Result of locating a timestamp in a sample sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// The state is exactly sample `i`: clamped, an exact hit, or the later
    /// of two near-duplicates.
    Knot(usize),
    /// The state lies strictly between two samples.
    Between { behind: usize, ahead: usize },
}

/// Locate `timestamp` in `samples`. Returns `None` only for an empty slice.
///
/// The search is a lower bound: the first index whose timestamp is `>=`
/// `timestamp`, so runs of equal timestamps resolve to their earliest entry.
pub fn find_segment<S: TrajectorySample>(samples: &[S], timestamp: f64) -> Option<Segment> {
    let n = samples.len();
    if n == 0 {
        return None;
    }
    let last = n - 1;
    if n == 1 || timestamp < samples[0].timestamp() {
        return Some(Segment::Knot(0));
    }
    if timestamp > samples[last].timestamp() {
        return Some(Segment::Knot(last));
    }

    // Sorted input already gives `low <= last`; the clamp covers unsorted input.
    let low = samples
        .partition_point(|s| s.timestamp() < timestamp)
        .min(last);

    if low == 0 || samples[low].timestamp() == timestamp {
        return Some(Segment::Knot(low));
    }

    let behind = low - 1;
    if samples[low].timestamp() - samples[behind].timestamp() < DUPLICATE_TIMESTAMP_EPSILON {
        return Some(Segment::Knot(low));
    }
    Some(Segment::Between { behind, ahead: low })
}

/// State at `timestamp`. Total over all `f64` inputs for a non-empty slice.
pub fn sample_at<S: TrajectorySample>(samples: &[S], timestamp: f64) -> Option<S> {
    match find_segment(samples, timestamp)? {
        Segment::Knot(i) => Some(samples[i].clone()),
        Segment::Between { behind, ahead } => {
            Some(samples[behind].interpolate(&samples[ahead], timestamp))
        }
    }
}
