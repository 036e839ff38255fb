use crate::geometry::{CanvasSize, Point};
use crate::template::TemplateShape;
use crate::TracingTemplate;
use trace_core::models::assessment::TemplateKind;

/// Horizontal inset of both line ends from the canvas edges.
pub const LINE_INSET: f64 = 50.0;

/// Horizontal segment across the vertical middle of the canvas.
pub struct StraightLine;

impl TracingTemplate for StraightLine {
    fn kind(&self) -> TemplateKind {
        TemplateKind::StraightLine
    }

    fn name(&self) -> &str {
        "Straight Line"
    }

    fn instructions(&self) -> &str {
        "Ask the patient to trace over the straight line"
    }

    fn generate(&self, size: CanvasSize) -> TemplateShape {
        let y = size.height / 2.0;
        TemplateShape::Path {
            vertices: vec![
                Point::new(LINE_INSET, y),
                Point::new(size.width - LINE_INSET, y),
            ],
        }
    }
}
