use serde_json::{Map, Value as JsonValue};

use crate::coercion::{field_f64, to_f64, to_f64_vec, to_u64};
use crate::error::{LoadError, LoadResult};
use crate::event::{resolve_event_marker, EventMarker};
use crate::sample::{DifferentialSample, DriveType, SwerveSample, TrajectorySample, MODULE_COUNT};
use crate::trajectory::{AnyTrajectory, Trajectory};

/// The only trajectory document version this loader accepts.
pub const TRAJ_SCHEMA_VERSION: u32 = 1;

type JsonObject = Map<String, JsonValue>;

/// Public API: parse a swerve trajectory document.
pub fn parse_swerve_trajectory_json(s: &str) -> LoadResult<Trajectory<SwerveSample>> {
    parse_trajectory_json(s)
}

/// Public API: parse a differential trajectory document.
pub fn parse_differential_trajectory_json(s: &str) -> LoadResult<Trajectory<DifferentialSample>> {
    parse_trajectory_json(s)
}

pub fn parse_trajectory_json<S: SampleRecord>(s: &str) -> LoadResult<Trajectory<S>> {
    let doc: JsonValue = serde_json::from_str(s)?;
    parse_trajectory_value(&doc)
}

/// Parse an already-decoded trajectory document into a typed `Trajectory`.
///
/// Notes:
/// - The version gate runs before any sample is read; a mismatch never
///   yields a partial trajectory.
/// - Numeric fields may be JSON numbers or numeric strings.
/// - `trajectory.splits` and `events` are optional. Unusable event markers
///   are dropped, not reported as errors.
pub fn parse_trajectory_value<S: SampleRecord>(doc: &JsonValue) -> LoadResult<Trajectory<S>> {
    let header = read_header(doc)?;
    build_trajectory(&header)
}

pub fn parse_any_trajectory_json(s: &str) -> LoadResult<AnyTrajectory> {
    let doc: JsonValue = serde_json::from_str(s)?;
    parse_any_trajectory_value(&doc)
}

/// Parse a document whose drivetrain model is not known up front.
///
/// The model comes from `trajectory.sampleType` when present; otherwise the
/// first sample decides (`vx` means swerve, `vl` means differential).
pub fn parse_any_trajectory_value(doc: &JsonValue) -> LoadResult<AnyTrajectory> {
    let header = read_header(doc)?;
    match detect_drive_type(&header)? {
        DriveType::Swerve => build_trajectory::<SwerveSample>(&header).map(AnyTrajectory::Swerve),
        DriveType::Differential => {
            build_trajectory::<DifferentialSample>(&header).map(AnyTrajectory::Differential)
        }
    }
}

/// Conversion from one raw sample record, implemented per drivetrain model.
/// Checks spanning several samples run in `Trajectory::new`.
pub trait SampleRecord: TrajectorySample + Sized {
    fn from_record(index: usize, record: &JsonObject) -> LoadResult<Self>;
}

impl SampleRecord for SwerveSample {
    fn from_record(index: usize, record: &JsonObject) -> LoadResult<Self> {
        let num = |field: &'static str| required_f64(index, record, field);
        Ok(SwerveSample {
            timestamp: num("t")?,
            x: num("x")?,
            y: num("y")?,
            heading: num("heading")?,
            vx: num("vx")?,
            vy: num("vy")?,
            omega: num("omega")?,
            ax: num("ax")?,
            ay: num("ay")?,
            alpha: num("alpha")?,
            fx: module_forces(index, record, "fx")?,
            fy: module_forces(index, record, "fy")?,
        })
    }
}

impl SampleRecord for DifferentialSample {
    fn from_record(index: usize, record: &JsonObject) -> LoadResult<Self> {
        let num = |field: &'static str| required_f64(index, record, field);
        let timestamp = num("t")?;
        let x = num("x")?;
        let y = num("y")?;
        let heading = num("heading")?;
        let vl = num("vl")?;
        let vr = num("vr")?;
        let omega = num("omega")?;
        let al = num("al")?;
        let ar = num("ar")?;
        // Older generators did not emit alpha.
        let alpha = match record.get("alpha") {
            None | Some(JsonValue::Null) => 0.0,
            Some(v) => to_f64(v).ok_or(LoadError::MalformedSample {
                index,
                field: "alpha",
            })?,
        };
        let fl = side_forces(index, record, "fl")?;
        let fr = side_forces(index, record, "fr")?;
        Ok(DifferentialSample {
            timestamp,
            x,
            y,
            heading,
            vl,
            vr,
            omega,
            al,
            ar,
            alpha,
            fl,
            fr,
        })
    }
}

fn required_f64(index: usize, record: &JsonObject, field: &'static str) -> LoadResult<f64> {
    field_f64(record, field).ok_or(LoadError::MalformedSample { index, field })
}

fn module_forces(
    index: usize,
    record: &JsonObject,
    field: &'static str,
) -> LoadResult<[f64; MODULE_COUNT]> {
    let malformed = || LoadError::MalformedSample { index, field };
    let items = record
        .get(field)
        .and_then(JsonValue::as_array)
        .filter(|items| items.len() == MODULE_COUNT)
        .ok_or_else(malformed)?;
    let mut out = [0.0; MODULE_COUNT];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = to_f64(item).ok_or_else(malformed)?;
    }
    Ok(out)
}

fn side_forces(index: usize, record: &JsonObject, field: &'static str) -> LoadResult<Vec<f64>> {
    record
        .get(field)
        .and_then(to_f64_vec)
        .filter(|v| !v.is_empty())
        .ok_or(LoadError::MalformedSample { index, field })
}

// ----- document header -----

/// Validated top level of a document: name, version gate and the
/// `trajectory` object.
struct Header<'a> {
    name: &'a str,
    root: &'a JsonObject,
    body: &'a JsonObject,
}

fn read_header(doc: &JsonValue) -> LoadResult<Header<'_>> {
    let root = doc.as_object().ok_or_else(|| LoadError::MalformedDocument {
        reason: "document root is not an object".to_string(),
    })?;
    let name = root
        .get("name")
        .and_then(JsonValue::as_str)
        .ok_or(LoadError::MissingField { field: "name" })?;

    let actual = root.get("version").cloned().unwrap_or(JsonValue::Null);
    if to_u64(&actual) != Some(u64::from(TRAJ_SCHEMA_VERSION)) {
        return Err(LoadError::SchemaVersionMismatch {
            expected: TRAJ_SCHEMA_VERSION,
            actual,
            name: name.to_string(),
        });
    }

    let body = root
        .get("trajectory")
        .and_then(JsonValue::as_object)
        .ok_or(LoadError::MissingField {
            field: "trajectory",
        })?;
    Ok(Header { name, root, body })
}

fn raw_samples<'a>(header: &Header<'a>) -> LoadResult<&'a Vec<JsonValue>> {
    header
        .body
        .get("samples")
        .and_then(JsonValue::as_array)
        .ok_or(LoadError::MissingField {
            field: "trajectory.samples",
        })
}

fn detect_drive_type(header: &Header<'_>) -> LoadResult<DriveType> {
    if let Some(kind) = header.body.get("sampleType").and_then(JsonValue::as_str) {
        return if kind.eq_ignore_ascii_case("swerve") {
            Ok(DriveType::Swerve)
        } else if kind.eq_ignore_ascii_case("differential") {
            Ok(DriveType::Differential)
        } else {
            Err(LoadError::MalformedDocument {
                reason: format!("unknown sampleType '{kind}'"),
            })
        };
    }
    let Some(first) = raw_samples(header)?.first() else {
        return Err(LoadError::EmptyTrajectory {
            name: header.name.to_string(),
        });
    };
    let first = first
        .as_object()
        .ok_or(LoadError::MalformedSample { index: 0, field: "t" })?;
    if first.contains_key("vx") {
        Ok(DriveType::Swerve)
    } else if first.contains_key("vl") {
        Ok(DriveType::Differential)
    } else {
        Err(LoadError::MalformedDocument {
            reason: "cannot tell drivetrain model: first sample has neither 'vx' nor 'vl'"
                .to_string(),
        })
    }
}

fn build_trajectory<S: SampleRecord>(header: &Header<'_>) -> LoadResult<Trajectory<S>> {
    let raw = raw_samples(header)?;
    let mut samples: Vec<S> = Vec::with_capacity(raw.len());
    for (index, record) in raw.iter().enumerate() {
        let record = record
            .as_object()
            .ok_or(LoadError::MalformedSample { index, field: "t" })?;
        samples.push(S::from_record(index, record)?);
    }

    let splits = read_splits(header.body)?;
    let events = read_events(header.name, header.root)?;

    log::debug!(
        "loaded trajectory '{}': {} samples, {} splits, {} events",
        header.name,
        samples.len(),
        splits.len(),
        events.len()
    );
    Trajectory::new(header.name, samples, splits, events)
}

fn read_splits(body: &JsonObject) -> LoadResult<Vec<usize>> {
    let items = match body.get("splits") {
        None | Some(JsonValue::Null) => return Ok(Vec::new()),
        Some(JsonValue::Array(items)) => items,
        Some(_) => {
            return Err(LoadError::MalformedDocument {
                reason: "trajectory.splits is not an array".to_string(),
            })
        }
    };
    items
        .iter()
        .enumerate()
        .map(|(index, v)| {
            to_u64(v)
                .and_then(|n| usize::try_from(n).ok())
                .ok_or(LoadError::MalformedSplit { index })
        })
        .collect()
}

fn read_events(name: &str, root: &JsonObject) -> LoadResult<Vec<EventMarker>> {
    let items = match root.get("events") {
        None | Some(JsonValue::Null) => return Ok(Vec::new()),
        Some(JsonValue::Array(items)) => items,
        Some(_) => {
            return Err(LoadError::MalformedDocument {
                reason: "events is not an array".to_string(),
            })
        }
    };
    let mut events = Vec::with_capacity(items.len());
    for (index, raw) in items.iter().enumerate() {
        match resolve_event_marker(raw) {
            Some(marker) => events.push(marker),
            None => log::debug!("{name}: dropping unusable event marker {index}: {raw}"),
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn swerve_record(t: f64) -> JsonValue {
        json!({
            "t": t, "x": 0.0, "y": 0.0, "heading": 0.0,
            "vx": 0.0, "vy": 0.0, "omega": 0.0,
            "ax": 0.0, "ay": 0.0, "alpha": 0.0,
            "fx": [0.0, 0.0, 0.0, 0.0], "fy": [0.0, 0.0, 0.0, 0.0]
        })
    }

    #[test]
    fn missing_version_is_a_mismatch() {
        let doc = json!({"name": "v", "trajectory": {"samples": [swerve_record(0.0)]}});
        let err = parse_trajectory_value::<SwerveSample>(&doc).unwrap_err();
        match err {
            LoadError::SchemaVersionMismatch { actual, .. } => assert_eq!(actual, JsonValue::Null),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn string_version_is_accepted() {
        let doc = json!({
            "name": "v", "version": "1",
            "trajectory": {"samples": [swerve_record(0.0)]}
        });
        assert!(parse_trajectory_value::<SwerveSample>(&doc).is_ok());
    }

    #[test]
    fn non_object_root_is_malformed() {
        let err = parse_swerve_trajectory_json("[1, 2]").unwrap_err();
        assert!(matches!(err, LoadError::MalformedDocument { .. }));
    }

    #[test]
    fn sample_type_overrides_field_sniffing() {
        let doc = json!({
            "name": "typed", "version": 1,
            "trajectory": {"sampleType": "Swerve", "samples": [swerve_record(0.0)]}
        });
        let any = parse_any_trajectory_value(&doc).unwrap();
        assert_eq!(any.drive_type(), DriveType::Swerve);

        let doc = json!({
            "name": "typed", "version": 1,
            "trajectory": {"sampleType": "Tank", "samples": [swerve_record(0.0)]}
        });
        assert!(matches!(
            parse_any_trajectory_value(&doc),
            Err(LoadError::MalformedDocument { .. })
        ));
    }
}
