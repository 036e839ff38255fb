//! Raw pointer/touch events and their mapping into canvas-local space.

use serde::{Deserialize, Serialize};

use crate::geometry::{CanvasSize, Point};

/// Bounding box of the drawing surface in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRect {
    /// A surface anchored at the client origin, so client and local
    /// coordinates coincide.
    pub fn at_origin(size: CanvasSize) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize::new(self.width, self.height)
    }

    pub fn to_local(&self, client_x: f64, client_y: f64) -> Point {
        Point::new(client_x - self.left, client_y - self.top)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClientPoint {
    pub client_x: f64,
    pub client_y: f64,
}

/// Position source of a down/move event. Mouse and touch are handled the
/// same way once a client position is extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum InputSample {
    Mouse { client_x: f64, client_y: f64 },
    Touch { touches: Vec<ClientPoint> },
}

impl InputSample {
    /// Client position, taking the first touch for touch input.
    ///
    /// `None` when no finite position can be derived.
    pub fn client_position(&self) -> Option<ClientPoint> {
        let point = match self {
            InputSample::Mouse { client_x, client_y } => ClientPoint {
                client_x: *client_x,
                client_y: *client_y,
            },
            InputSample::Touch { touches } => *touches.first()?,
        };
        (point.client_x.is_finite() && point.client_y.is_finite()).then_some(point)
    }

    pub fn local_position(&self, rect: &CanvasRect) -> Option<Point> {
        self.client_position()
            .map(|p| rect.to_local(p.client_x, p.client_y))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { sample: InputSample, timestamp_ms: i64 },
    Move { sample: InputSample, timestamp_ms: i64 },
    /// Mouse-up or touch-end.
    Up,
    /// Pointer left the surface mid-drag.
    Leave,
}

/// A recorded capture, replayable through a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecording {
    pub canvas: CanvasRect,
    pub events: Vec<PointerEvent>,
}
