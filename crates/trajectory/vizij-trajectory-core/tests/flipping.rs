use std::f64::consts::{PI, TAU};

use vizij_trajectory_core::{
    parse_differential_trajectory_json, parse_swerve_trajectory_json, DifferentialSample,
    FieldConfig, Flipper, Symmetry, SwerveSample, TrajectorySample, YearSymmetry, FIELD_LENGTH,
    FIELD_WIDTH,
};

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

/// Headings are compared on the circle.
fn approx_angle(a: f64, b: f64, eps: f64) {
    let d = (a - b).rem_euclid(TAU);
    assert!(d <= eps || TAU - d <= eps, "left={a} right={b} eps={eps}");
}

fn swerve_sample() -> SwerveSample {
    SwerveSample {
        timestamp: 0.0,
        x: 1.0,
        y: 2.0,
        heading: 3.0,
        vx: 4.0,
        vy: 5.0,
        omega: 6.0,
        ax: 7.0,
        ay: 8.0,
        alpha: 9.0,
        fx: [10.0, 11.0, 12.0, 13.0],
        fy: [14.0, 15.0, 16.0, 17.0],
    }
}

fn differential_sample() -> DifferentialSample {
    DifferentialSample {
        timestamp: 0.0,
        x: 1.0,
        y: 2.0,
        heading: 3.0,
        vl: 4.0,
        vr: 5.0,
        omega: 6.0,
        al: 7.0,
        ar: 8.0,
        alpha: 9.0,
        fl: vec![10.0, 11.0],
        fr: vec![12.0, 13.0],
    }
}

fn flipper(year: i32) -> Flipper {
    FieldConfig::default().flipper_for_year(year)
}

#[test]
fn swerve_mirrored_2024_matches_reference_values() {
    let flipped = swerve_sample().flipped(&flipper(2024));
    let expected = SwerveSample {
        timestamp: 0.0,
        x: FIELD_LENGTH - 1.0,
        y: 2.0,
        heading: PI - 3.0,
        vx: -4.0,
        vy: 5.0,
        omega: -6.0,
        ax: -7.0,
        ay: 8.0,
        alpha: -9.0,
        fx: [-11.0, -10.0, -13.0, -12.0],
        fy: [15.0, 14.0, 17.0, 16.0],
    };
    assert_eq!(flipped, expected);
}

#[test]
fn swerve_rotate_around_2022_matches_reference_values() {
    let flipped = swerve_sample().flipped(&flipper(2022));
    let expected = SwerveSample {
        timestamp: 0.0,
        x: FIELD_LENGTH - 1.0,
        y: FIELD_WIDTH - 2.0,
        heading: PI + 3.0,
        vx: -4.0,
        vy: -5.0,
        omega: 6.0,
        ax: -7.0,
        ay: -8.0,
        alpha: 9.0,
        fx: [-10.0, -11.0, -12.0, -13.0],
        fy: [-14.0, -15.0, -16.0, -17.0],
    };
    assert_eq!(flipped, expected);
}

#[test]
fn swerve_flips_are_involutions() {
    let s = swerve_sample();
    for symmetry in [Symmetry::Mirrored, Symmetry::RotateAround] {
        let f = Flipper::new(symmetry, FIELD_LENGTH, FIELD_WIDTH);
        let back = s.flipped(&f).flipped(&f);

        // Negations and permutations restore bit patterns exactly.
        for (a, b) in [
            (back.vx, s.vx),
            (back.vy, s.vy),
            (back.omega, s.omega),
            (back.ax, s.ax),
            (back.ay, s.ay),
            (back.alpha, s.alpha),
        ] {
            assert_eq!(a.to_bits(), b.to_bits(), "{symmetry:?}");
        }
        assert_eq!(back.fx, s.fx, "{symmetry:?}");
        assert_eq!(back.fy, s.fy, "{symmetry:?}");
        assert_eq!(back.timestamp, s.timestamp);

        approx(back.x, s.x, 1e-12);
        approx(back.y, s.y, 1e-12);
        approx_angle(back.heading, s.heading, 1e-12);
    }
}

#[test]
fn differential_mirrored_swaps_sides() {
    let s = differential_sample();
    let f = flipper(2023);
    assert!(f.is_mirrored());
    let m = s.flipped(&f);

    assert_eq!((m.vl, m.vr), (5.0, 4.0));
    assert_eq!((m.al, m.ar), (8.0, 7.0));
    assert_eq!(m.fl, vec![12.0, 13.0]);
    assert_eq!(m.fr, vec![10.0, 11.0]);
    assert_eq!((m.omega, m.alpha), (-6.0, -9.0));
    assert_eq!(m.x, FIELD_LENGTH - 1.0);
    assert_eq!(m.y, 2.0);
    assert_eq!(m.heading, PI - 3.0);
}

#[test]
fn differential_rotate_around_keeps_sides() {
    let s = differential_sample();
    let r = s.flipped(&flipper(2025));

    assert_eq!((r.vl, r.vr), (s.vl, s.vr));
    assert_eq!((r.al, r.ar), (s.al, s.ar));
    assert_eq!(r.fl, s.fl);
    assert_eq!(r.fr, s.fr);
    assert_eq!((r.omega, r.alpha), (s.omega, s.alpha));
    assert_eq!(r.x, FIELD_LENGTH - 1.0);
    assert_eq!(r.y, FIELD_WIDTH - 2.0);
    assert_eq!(r.heading, PI + 3.0);
}

#[test]
fn differential_flips_are_involutions() {
    let s = differential_sample();
    for symmetry in [Symmetry::Mirrored, Symmetry::RotateAround] {
        let f = Flipper::new(symmetry, FIELD_LENGTH, FIELD_WIDTH);
        let back = s.flipped(&f).flipped(&f);
        assert_eq!((back.vl, back.vr, back.al, back.ar), (s.vl, s.vr, s.al, s.ar));
        assert_eq!(back.fl, s.fl);
        assert_eq!(back.fr, s.fr);
        assert_eq!(back.omega.to_bits(), s.omega.to_bits());
        assert_eq!(back.alpha.to_bits(), s.alpha.to_bits());
        approx(back.x, s.x, 1e-12);
        approx(back.y, s.y, 1e-12);
        approx_angle(back.heading, s.heading, 1e-12);
    }
}

#[test]
fn unknown_year_uses_default_year() {
    let cfg = FieldConfig::default();
    assert_eq!(cfg.symmetry_for_year(1999), cfg.symmetry_for_year(2025));
    assert_eq!(
        swerve_sample().flipped(&cfg.flipper_for_year(2031)),
        swerve_sample().flipped(&flipper(2025))
    );
}

#[test]
fn custom_field_config_changes_dimensions() {
    let cfg = FieldConfig::new(
        10.0,
        5.0,
        vec![YearSymmetry::new(2030, Symmetry::RotateAround)],
        2030,
    )
    .expect("valid config");
    let p = swerve_sample().flipped(&cfg.flipper()).pose();
    assert_eq!((p.x, p.y), (9.0, 3.0));
}

#[test]
fn flipped_trajectory_keeps_splits_and_events() {
    let json = vizij_test_fixtures::trajectories::json("swerve-auto").expect("load swerve-auto");
    let traj = parse_swerve_trajectory_json(&json).expect("parse swerve-auto");
    let flipped = traj.flipped(2024);

    assert_eq!(flipped.name(), traj.name());
    assert_eq!(flipped.splits(), traj.splits());
    assert_eq!(flipped.events(), traj.events());
    let f = flipper(2024);
    for (a, b) in flipped.samples().iter().zip(traj.samples()) {
        assert_eq!(*a, b.flipped(&f));
    }
}

#[test]
fn sampling_a_flipped_trajectory_matches_flipping_the_sample() {
    let json = vizij_test_fixtures::trajectories::json("differential-array-forces")
        .expect("load differential-array-forces");
    let traj = parse_differential_trajectory_json(&json).expect("parse fixture");
    let f = flipper(2024);
    let flipped = traj.flipped_with(&f);

    for t in [0.0, 0.2, 0.5, 0.85, 1.0] {
        let a = flipped.sample_at(t);
        let b = traj.sample_at_flipped(t, &f);
        approx(a.x, b.x, 1e-12);
        approx(a.y, b.y, 1e-12);
        approx(a.heading, b.heading, 1e-12);
        approx(a.vl, b.vl, 1e-12);
        approx(a.vr, b.vr, 1e-12);
        assert_eq!(a.fl.len(), 2);
    }
}
