//! Local shape heuristics computed from a finished capture.
//!
//! These are a secondary estimate shown next to the backend's scores. The
//! tremor value is a path-jaggedness proxy, not a validated clinical measure.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CaptureError;
use crate::stroke::StrokePoint;

pub const MAX_SCORE: f64 = 100.0;

/// A capture taking this long scores exactly 100 on speed.
pub const SPEED_REFERENCE_MS: f64 = 5000.0;

pub const MIN_METRIC_POINTS: usize = 2;

/// Placeholder scores are drawn from `[PLACEHOLDER_MIN, PLACEHOLDER_MIN + PLACEHOLDER_SPAN)`.
pub const PLACEHOLDER_MIN: f64 = 30.0;
pub const PLACEHOLDER_SPAN: f64 = 40.0;

/// Weights of the overall score: tremor, deviation, speed, pressure.
pub const OVERALL_WEIGHTS: [f64; 4] = [0.4, 0.3, 0.2, 0.1];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub tremor: f64,
    pub speed: f64,
    pub elapsed_ms: i64,
    pub point_count: usize,
    /// Only present when explicitly requested. See [`PlaceholderScores`].
    pub placeholders: Option<PlaceholderScores>,
}

/// Deviation and pressure stand-ins.
///
/// NOT MEASUREMENTS. Neither value looks at the template or the input
/// device; they are uniform random numbers kept so that result layouts
/// built around five scores still have something to show. A real
/// template-deviation measure (e.g. curve-alignment distance) is pending
/// product sign-off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderScores {
    pub deviation: f64,
    pub pressure: f64,
}

impl DerivedMetrics {
    /// Weighted blend of all four scores. `None` without placeholders.
    pub fn overall(&self) -> Option<f64> {
        let p = self.placeholders?;
        let [w_tremor, w_deviation, w_speed, w_pressure] = OVERALL_WEIGHTS;
        Some(
            self.tremor * w_tremor
                + p.deviation * w_deviation
                + self.speed * w_speed
                + p.pressure * w_pressure,
        )
    }
}

/// Source of unit-interval samples for the placeholder scores.
pub trait PlaceholderSource {
    /// A value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// Thread-local RNG backed source.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPlaceholders;

impl PlaceholderSource for RandomPlaceholders {
    fn next_unit(&mut self) -> f64 {
        rand::rng().random::<f64>()
    }
}

pub fn placeholder_scores(source: &mut dyn PlaceholderSource) -> PlaceholderScores {
    let mut draw = || PLACEHOLDER_MIN + source.next_unit().clamp(0.0, 1.0) * PLACEHOLDER_SPAN;
    let deviation = draw();
    let pressure = draw();
    PlaceholderScores { deviation, pressure }
}

/// Accumulated absolute direction change over consecutive point triples,
/// normalized by the total point count (not the triple count).
pub fn tremor_score(points: &[StrokePoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let sum: f64 = points
        .windows(3)
        .map(|w| {
            let (p1, p2, p3) = (w[0], w[1], w[2]);
            let a1 = (p2.y - p1.y).atan2(p2.x - p1.x);
            let a2 = (p3.y - p2.y).atan2(p3.x - p2.x);
            (a2 - a1).abs()
        })
        .sum();

    (sum / points.len() as f64 * MAX_SCORE).min(MAX_SCORE)
}

/// Zero or negative durations pin to [`MAX_SCORE`].
pub fn speed_score(elapsed_ms: i64) -> f64 {
    if elapsed_ms <= 0 {
        return MAX_SCORE;
    }
    (SPEED_REFERENCE_MS / elapsed_ms as f64 * MAX_SCORE).min(MAX_SCORE)
}

/// Saturates at `i64::MAX` for captures spanning the whole timestamp range.
pub fn elapsed_ms(points: &[StrokePoint]) -> i64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => last.timestamp_ms.saturating_sub(first.timestamp_ms),
        _ => 0,
    }
}

pub fn derive_metrics(
    points: &[StrokePoint],
    placeholders: Option<&mut dyn PlaceholderSource>,
) -> Result<DerivedMetrics, CaptureError> {
    if points.len() < MIN_METRIC_POINTS {
        return Err(CaptureError::InsufficientPoints {
            required: MIN_METRIC_POINTS,
            actual: points.len(),
        });
    }

    let elapsed = elapsed_ms(points);
    Ok(DerivedMetrics {
        tremor: tremor_score(points),
        speed: speed_score(elapsed),
        elapsed_ms: elapsed,
        point_count: points.len(),
        placeholders: placeholders.map(|source| placeholder_scores(source)),
    })
}

/// Coarse severity band used for every displayed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn from_score(score: f64) -> Self {
        if score < 30.0 {
            Severity::Mild
        } else if score < 60.0 {
            Severity::Moderate
        } else {
            Severity::Severe
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

/// Scores are shown as whole numbers out of 100.
pub fn display_score(score: f64) -> u32 {
    score.clamp(0.0, MAX_SCORE).round() as u32
}
