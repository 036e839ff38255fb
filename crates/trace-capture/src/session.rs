//! One tracing assessment: template, captured strokes, and derived metrics.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trace_core::models::assessment::TemplateKind;

use crate::generate_template;
use crate::geometry::{CanvasSize, Point};
use crate::input::{CanvasRect, EventRecording, PointerEvent};
use crate::metrics::{self, DerivedMetrics, PlaceholderSource};
use crate::stroke::{Stroke, StrokePoint};
use crate::template::TemplateShape;

/// Analysis is refused below this many captured points.
pub const MIN_ANALYSIS_POINTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureState {
    Idle,
    Capturing,
}

/// Owns all mutable per-assessment state.
///
/// Input after analysis is ignored until [`TracingSession::reset`]; the
/// computed metrics never change once set.
#[derive(Debug, Clone)]
pub struct TracingSession {
    id: Uuid,
    kind: TemplateKind,
    size: CanvasSize,
    template: TemplateShape,
    phase: SessionPhase,
    strokes: Vec<Stroke>,
    /// `Some` while capturing.
    active: Option<Stroke>,
    metrics: Option<DerivedMetrics>,
    started_at: Option<jiff::Timestamp>,
}

impl TracingSession {
    pub fn new(kind: TemplateKind, size: CanvasSize) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            size,
            template: generate_template(kind, size.width, size.height),
            phase: SessionPhase::NotStarted,
            strokes: Vec::new(),
            active: None,
            metrics: None,
            started_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn template(&self) -> &TemplateShape {
        &self.template
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn capture_state(&self) -> CaptureState {
        if self.active.is_some() {
            CaptureState::Capturing
        } else {
            CaptureState::Idle
        }
    }

    /// Finalized strokes, oldest first. Excludes the stroke being captured.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    pub fn metrics(&self) -> Option<&DerivedMetrics> {
        self.metrics.as_ref()
    }

    pub fn started_at(&self) -> Option<jiff::Timestamp> {
        self.started_at
    }

    /// Points across all strokes, including the active one.
    pub fn point_count(&self) -> usize {
        self.all_strokes().map(Stroke::len).sum()
    }

    /// Every captured point in temporal order.
    pub fn points(&self) -> Vec<StrokePoint> {
        self.all_strokes()
            .flat_map(|s| s.points().iter().copied())
            .collect()
    }

    pub fn can_analyze(&self) -> bool {
        self.phase != SessionPhase::Completed && self.point_count() >= MIN_ANALYSIS_POINTS
    }

    /// Apply one raw event. Returns whether the session changed.
    pub fn handle(&mut self, event: &PointerEvent, rect: &CanvasRect) -> bool {
        match event {
            PointerEvent::Down {
                sample,
                timestamp_ms,
            } => match sample.local_position(rect) {
                Some(point) => self.pointer_down(point, *timestamp_ms),
                None => {
                    tracing::debug!("pointer down without coordinates ignored");
                    false
                }
            },
            PointerEvent::Move {
                sample,
                timestamp_ms,
            } => match sample.local_position(rect) {
                Some(point) => self.pointer_move(point, *timestamp_ms),
                None => false,
            },
            PointerEvent::Up | PointerEvent::Leave => self.pointer_up(),
        }
    }

    /// Replay a recorded event stream. Returns how many events changed state.
    pub fn replay(&mut self, recording: &EventRecording) -> usize {
        recording
            .events
            .iter()
            .filter(|event| self.handle(event, &recording.canvas))
            .count()
    }

    /// Idle → Capturing. A stroke still open is finalized first.
    pub fn pointer_down(&mut self, point: Point, timestamp_ms: i64) -> bool {
        if self.phase == SessionPhase::Completed {
            tracing::debug!(session = %self.id, "input after analysis ignored");
            return false;
        }
        if !self.accepts(point, timestamp_ms) {
            return false;
        }

        self.pointer_up();

        let mut stroke = Stroke::new();
        if stroke
            .push(StrokePoint::new(point.x, point.y, timestamp_ms))
            .is_err()
        {
            return false;
        }
        self.active = Some(stroke);

        if self.phase == SessionPhase::NotStarted {
            self.phase = SessionPhase::InProgress;
            self.started_at = Some(jiff::Timestamp::now());
            tracing::debug!(session = %self.id, kind = %self.kind, "capture started");
        }
        true
    }

    /// Capturing → Capturing, appending one point.
    pub fn pointer_move(&mut self, point: Point, timestamp_ms: i64) -> bool {
        if self.active.is_none() || !self.accepts(point, timestamp_ms) {
            return false;
        }
        let Some(stroke) = self.active.as_mut() else {
            return false;
        };
        match stroke.push(StrokePoint::new(point.x, point.y, timestamp_ms)) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "pointer move ignored");
                false
            }
        }
    }

    /// Capturing → Idle. No-op while idle.
    pub fn pointer_up(&mut self) -> bool {
        let Some(mut stroke) = self.active.take() else {
            return false;
        };
        stroke.finalize();
        tracing::debug!(session = %self.id, points = stroke.len(), "stroke finalized");
        self.strokes.push(stroke);
        true
    }

    /// Compute metrics once. A no-op returning `None` while fewer than
    /// [`MIN_ANALYSIS_POINTS`] points are captured; returns the stored
    /// result when already completed.
    ///
    /// Placeholder deviation/pressure scores are only produced when a
    /// source is given.
    pub fn analyze(
        &mut self,
        placeholders: Option<&mut dyn PlaceholderSource>,
    ) -> Option<&DerivedMetrics> {
        if self.phase == SessionPhase::Completed {
            return self.metrics.as_ref();
        }
        let count = self.point_count();
        if count < MIN_ANALYSIS_POINTS {
            tracing::debug!(
                points = count,
                required = MIN_ANALYSIS_POINTS,
                "not enough points to analyze"
            );
            return None;
        }

        self.pointer_up();

        match metrics::derive_metrics(&self.points(), placeholders) {
            Ok(derived) => {
                tracing::info!(
                    session = %self.id,
                    kind = %self.kind,
                    points = derived.point_count,
                    elapsed_ms = derived.elapsed_ms,
                    tremor = derived.tremor,
                    speed = derived.speed,
                    "assessment analyzed"
                );
                self.metrics = Some(derived);
                self.phase = SessionPhase::Completed;
                self.metrics.as_ref()
            }
            Err(e) => {
                tracing::warn!(error = %e, "metrics derivation failed");
                None
            }
        }
    }

    /// Back to NotStarted with a freshly generated template.
    pub fn reset(&mut self) {
        self.strokes.clear();
        self.active = None;
        self.metrics = None;
        self.started_at = None;
        self.phase = SessionPhase::NotStarted;
        self.regenerate();
        tracing::debug!(session = %self.id, "session reset");
    }

    /// Switching templates discards the capture.
    pub fn set_template(&mut self, kind: TemplateKind) {
        self.kind = kind;
        self.reset();
    }

    /// Regenerates the template; captured strokes are kept.
    pub fn resize(&mut self, size: CanvasSize) {
        self.size = size;
        self.regenerate();
    }

    fn regenerate(&mut self) {
        self.template = generate_template(self.kind, self.size.width, self.size.height);
    }

    fn all_strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter().chain(self.active.as_ref())
    }

    fn last_timestamp(&self) -> Option<i64> {
        self.all_strokes()
            .filter_map(Stroke::last)
            .last()
            .map(|p| p.timestamp_ms)
    }

    /// Finite coordinates and a timestamp after everything captured so far.
    fn accepts(&self, point: Point, timestamp_ms: i64) -> bool {
        if !point.is_finite() {
            tracing::debug!("non-finite pointer coordinates ignored");
            return false;
        }
        if let Some(previous) = self.last_timestamp()
            && timestamp_ms <= previous
        {
            tracing::debug!(previous, timestamp_ms, "out-of-order pointer sample ignored");
            return false;
        }
        true
    }
}
