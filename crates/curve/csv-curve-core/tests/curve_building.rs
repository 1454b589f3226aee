use approx::assert_relative_eq;
use csv_curve_core::{
    build_curve, build_linear_segments, build_linear_single_pass, build_smooth, Curve,
    CurveConfig, CurveError, CurveMode, Keyframe, TangentMode, TimeValueRow,
};

fn rows(data: &[(&str, i32)]) -> Vec<TimeValueRow> {
    data.iter().map(|(t, v)| TimeValueRow::new(*t, *v)).collect()
}

fn times(curve: &Curve) -> Vec<f32> {
    curve.keys().iter().map(|k| k.time).collect()
}

#[test]
fn times_use_milliseconds_and_values_are_scaled() {
    let input = rows(&[("0:05", 10), ("0:10", 20)]);
    let curve = build_smooth(&input, &CurveConfig::default()).unwrap();
    assert_eq!(times(&curve), vec![5.0, 10.0]);
    assert_relative_eq!(curve.keys()[0].value, 0.10);
    assert_relative_eq!(curve.keys()[1].value, 0.20);
}

#[test]
fn linear_segments_concatenate_with_boundary_duplicates() {
    let input = rows(&[("0:00", 0), ("0:05", 50), ("0:10", 0)]);
    let curve = build_linear_segments(&input, &CurveConfig::default()).unwrap();

    // Two keys per segment; the shared 5s point appears twice.
    assert_eq!(curve.len(), 4);
    assert_eq!(times(&curve), vec![0.0, 5.0, 5.0, 10.0]);

    let keys = curve.keys();
    assert_eq!((keys[0].time, keys[0].value), (0.0, 0.0));
    assert_eq!((keys[3].time, keys[3].value), (10.0, 0.0));

    assert_relative_eq!(keys[0].out_tangent, 0.1);
    assert_relative_eq!(keys[1].in_tangent, 0.1);
    assert_relative_eq!(keys[2].out_tangent, -0.1);
    assert_eq!(keys[0].in_tangent, 0.0);
    assert_eq!(keys[3].out_tangent, 0.0);
}

#[test]
fn linear_segments_need_two_rows() {
    let cfg = CurveConfig::default();
    assert!(build_linear_segments(&[], &cfg).unwrap().is_empty());
    assert!(build_linear_segments(&rows(&[("0:01", 5)]), &cfg)
        .unwrap()
        .is_empty());
}

#[test]
fn zero_length_segment_contributes_one_key() {
    let input = rows(&[("0:01", 5), ("0:01", 9), ("0:02", 0)]);
    let curve = build_linear_segments(&input, &CurveConfig::default()).unwrap();
    assert_eq!(curve.len(), 3);
}

#[test]
fn single_pass_has_one_linear_key_per_row() {
    let input = rows(&[("0:00", 0), ("0:05", 50), ("0:10", 0)]);
    let curve = build_linear_single_pass(&input, &CurveConfig::default()).unwrap();
    assert_eq!(times(&curve), vec![0.0, 5.0, 10.0]);

    let mid = curve.keys()[1];
    assert_eq!(mid.left_mode(), TangentMode::Linear);
    assert_eq!(mid.right_mode(), TangentMode::Linear);
    assert!(mid.is_broken());
    assert_relative_eq!(mid.in_tangent, 0.1);
    assert_relative_eq!(mid.out_tangent, -0.1);
    assert_eq!(curve.keys()[0].in_tangent, 0.0);
    assert_eq!(curve.keys()[2].out_tangent, 0.0);
}

#[test]
fn smooth_tangents_follow_neighbours() {
    let input = rows(&[("0:00", 0), ("0:05", 50), ("0:10", 200)]);
    let curve = build_smooth(&input, &CurveConfig::default()).unwrap();
    let keys = curve.keys();
    assert_eq!(keys[0].in_tangent, 0.0);
    assert_eq!(keys[2].out_tangent, 0.0);
    assert_relative_eq!(keys[1].in_tangent, 0.2);
    assert_relative_eq!(keys[1].out_tangent, 0.2);
    assert_eq!(keys[1].left_mode(), TangentMode::Editable);
    assert!(!keys[1].is_broken());
}

#[test]
fn smooth_keeps_last_of_equal_times() {
    let input = rows(&[("0:01", 10), ("0:01", 30)]);
    let curve = build_smooth(&input, &CurveConfig::default()).unwrap();
    assert_eq!(curve.len(), 1);
    assert_relative_eq!(curve.keys()[0].value, 0.3);
}

#[test]
fn malformed_time_fails_the_row() {
    let input = rows(&[("0:00", 0), ("later", 10)]);
    for mode in [
        CurveMode::LinearSegments,
        CurveMode::LinearSinglePass,
        CurveMode::Smooth,
    ] {
        let cfg = CurveConfig {
            mode,
            ..CurveConfig::default()
        };
        match build_curve(&input, &cfg) {
            Err(CurveError::RowTime { row, raw, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(raw, "later");
            }
            other => panic!("{mode:?}: expected RowTime, got {other:?}"),
        }
    }
}

#[test]
fn value_divisor_is_configurable() {
    let cfg = CurveConfig {
        mode: CurveMode::Smooth,
        value_divisor: 1.0,
    };
    let curve = build_curve(&rows(&[("0:00:02.500", 7)]), &cfg).unwrap();
    assert_eq!(curve.keys()[0].time, 2.5);
    assert_eq!(curve.keys()[0].value, 7.0);
}

#[test]
fn add_key_orders_and_replaces() {
    let mut curve = Curve::new();
    assert_eq!(curve.add_key(Keyframe::new(2.0, 1.0)), 0);
    assert_eq!(curve.add_key(Keyframe::new(1.0, 1.0)), 0);
    assert_eq!(curve.add_key(Keyframe::new(2.0, 5.0)), 1);
    assert_eq!(times(&curve), vec![1.0, 2.0]);
    assert_eq!(curve.keys()[1].value, 5.0);
    assert_eq!(curve.duration(), 1.0);
}

#[test]
fn linear_curve_serializes_for_consumers() {
    let curve = Curve::linear(0.0, 0.0, 2.0, 1.0);
    let json = serde_json::to_string(&curve).unwrap();
    let back: Curve = serde_json::from_str(&json).unwrap();
    assert_eq!(back, curve);
}
