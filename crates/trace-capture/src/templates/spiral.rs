use crate::geometry::{CanvasSize, Point};
use crate::template::TemplateShape;
use crate::TracingTemplate;
use trace_core::models::assessment::TemplateKind;

/// Number of angular steps; the path has one more vertex than this.
pub const SPIRAL_STEPS: usize = 720;

/// Angle advanced per step. 720 steps sweep 864°, a little under 2.5 turns.
pub const SPIRAL_STEP_DEGREES: f64 = 1.2;

/// Gap left between the outermost turn and the shorter canvas edge.
pub const SPIRAL_MARGIN: f64 = 100.0;

/// Radius used when the canvas leaves no room inside [`SPIRAL_MARGIN`].
pub const MIN_SPIRAL_RADIUS: f64 = 10.0;

/// Archimedean spiral growing linearly from the canvas center.
pub struct Spiral;

impl Spiral {
    pub fn max_radius(size: CanvasSize) -> f64 {
        let radius = size.min_side() / 2.0 - SPIRAL_MARGIN;
        if radius > 0.0 { radius } else { MIN_SPIRAL_RADIUS }
    }
}

impl TracingTemplate for Spiral {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Spiral
    }

    fn name(&self) -> &str {
        "Spiral Tracing"
    }

    fn instructions(&self) -> &str {
        "Ask the patient to trace over the spiral pattern"
    }

    fn generate(&self, size: CanvasSize) -> TemplateShape {
        let center = size.center();
        let radius_step = Self::max_radius(size) / SPIRAL_STEPS as f64;

        let vertices = (0..=SPIRAL_STEPS)
            .map(|i| {
                let angle = (SPIRAL_STEP_DEGREES * i as f64).to_radians();
                let radius = radius_step * i as f64;
                Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect();

        TemplateShape::Path { vertices }
    }
}
