use trace_capture::error::CaptureError;
use trace_capture::metrics::{
    PlaceholderSource, Severity, derive_metrics, display_score, elapsed_ms, speed_score,
    tremor_score,
};
use trace_capture::stroke::StrokePoint;

struct Fixed(f64);

impl PlaceholderSource for Fixed {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

fn collinear(count: usize, spacing_ms: i64) -> Vec<StrokePoint> {
    (0..count)
        .map(|i| StrokePoint::new(100.0 + 10.0 * i as f64, 300.0, i as i64 * spacing_ms))
        .collect()
}

#[test]
fn straight_stroke_has_zero_tremor() {
    assert_eq!(tremor_score(&collinear(25, 10)), 0.0);
}

#[test]
fn tremor_normalizes_by_total_point_count() {
    // One right-angle turn: |π/2 - 0| summed over one triple, divided by 3 points.
    let points = [
        StrokePoint::new(0.0, 0.0, 0),
        StrokePoint::new(10.0, 0.0, 1),
        StrokePoint::new(10.0, 10.0, 2),
    ];
    let expected = std::f64::consts::FRAC_PI_2 / 3.0 * 100.0;
    assert!((tremor_score(&points) - expected).abs() < 1e-9);
}

#[test]
fn tremor_is_bounded_for_jagged_strokes() {
    let zigzag: Vec<StrokePoint> = (0..50)
        .map(|i| StrokePoint::new(i as f64 * 3.0, if i % 2 == 0 { 0.0 } else { 40.0 }, i))
        .collect();
    let score = tremor_score(&zigzag);
    assert!((0.0..=100.0).contains(&score));
    assert_eq!(score, 100.0);
}

#[test]
fn tremor_with_fewer_than_three_points_is_zero() {
    assert_eq!(tremor_score(&collinear(2, 100)), 0.0);
    assert_eq!(tremor_score(&[]), 0.0);
}

#[test]
fn speed_reference_duration_scores_one_hundred() {
    assert_eq!(speed_score(5000), 100.0);
    assert_eq!(speed_score(10_000), 50.0);
    assert_eq!(speed_score(1000), 100.0);
}

#[test]
fn zero_duration_speed_is_pinned_not_infinite() {
    assert_eq!(speed_score(0), 100.0);
    assert_eq!(speed_score(-5), 100.0);
}

#[test]
fn elapsed_time_saturates_across_full_timestamp_range() {
    let points = vec![
        StrokePoint::new(0.0, 0.0, i64::MIN),
        StrokePoint::new(10.0, 0.0, i64::MAX - 1),
        StrokePoint::new(20.0, 0.0, i64::MAX),
    ];
    assert_eq!(elapsed_ms(&points), i64::MAX);

    let metrics = derive_metrics(&points, None).unwrap();
    assert_eq!(metrics.elapsed_ms, i64::MAX);
    assert!(metrics.speed >= 0.0 && metrics.speed < 1.0);
}

#[test]
fn derive_requires_two_points() {
    let err = derive_metrics(&collinear(1, 0), None).unwrap_err();
    assert_eq!(
        err,
        CaptureError::InsufficientPoints {
            required: 2,
            actual: 1
        }
    );
}

#[test]
fn derive_without_placeholders_has_no_overall() {
    let metrics = derive_metrics(&collinear(10, 500), None).unwrap();
    assert_eq!(metrics.tremor, 0.0);
    assert_eq!(metrics.speed, 100.0);
    assert_eq!(metrics.elapsed_ms, 4500);
    assert_eq!(metrics.point_count, 10);
    assert!(metrics.placeholders.is_none());
    assert!(metrics.overall().is_none());
}

#[test]
fn placeholders_stay_in_band_and_feed_overall() {
    let mut low = Fixed(0.0);
    let metrics = derive_metrics(&collinear(10, 2000), Some(&mut low)).unwrap();
    let placeholders = metrics.placeholders.unwrap();
    assert_eq!(placeholders.deviation, 30.0);
    assert_eq!(placeholders.pressure, 30.0);

    // speed = 5000 / 18000 * 100
    let speed = 5000.0 / 18_000.0 * 100.0;
    let expected = 0.0 * 0.4 + 30.0 * 0.3 + speed * 0.2 + 30.0 * 0.1;
    assert!((metrics.overall().unwrap() - expected).abs() < 1e-9);

    let mut high = Fixed(0.999);
    let metrics = derive_metrics(&collinear(10, 10), Some(&mut high)).unwrap();
    let placeholders = metrics.placeholders.unwrap();
    assert!(placeholders.deviation < 70.0 && placeholders.pressure < 70.0);
}

#[test]
fn severity_bands() {
    assert_eq!(Severity::from_score(0.0), Severity::Mild);
    assert_eq!(Severity::from_score(29.9), Severity::Mild);
    assert_eq!(Severity::from_score(30.0), Severity::Moderate);
    assert_eq!(Severity::from_score(59.9), Severity::Moderate);
    assert_eq!(Severity::from_score(60.0).label(), "Severe");
}

#[test]
fn display_scores_are_rounded_and_bounded() {
    assert_eq!(display_score(42.5), 43);
    assert_eq!(display_score(111.1), 100);
    assert_eq!(display_score(-1.0), 0);
}
