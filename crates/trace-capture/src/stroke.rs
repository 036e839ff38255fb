use serde::{Deserialize, Serialize};

use crate::error::CaptureError;
use crate::geometry::Point;

/// A captured pointer sample in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: i64,
}

impl StrokePoint {
    pub const fn new(x: f64, y: f64, timestamp_ms: i64) -> Self {
        Self { x, y, timestamp_ms }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One continuous pointer-down to pointer-up drag.
///
/// Append-only until [`Stroke::finalize`]; timestamps strictly increase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<StrokePoint>,
    finalized: bool,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: StrokePoint) -> Result<(), CaptureError> {
        if self.finalized {
            return Err(CaptureError::StrokeFinalized);
        }
        if !point.position().is_finite() {
            return Err(CaptureError::NonFiniteCoordinate);
        }
        if let Some(last) = self.points.last()
            && point.timestamp_ms <= last.timestamp_ms
        {
            return Err(CaptureError::NonMonotonicTimestamp {
                previous: last.timestamp_ms,
                got: point.timestamp_ms,
            });
        }
        self.points.push(point);
        Ok(())
    }

    pub fn finalize(&mut self) {
        self.finalized = true;
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&StrokePoint> {
        self.points.last()
    }
}
