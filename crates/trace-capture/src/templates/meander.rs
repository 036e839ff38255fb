use crate::geometry::{CanvasSize, Point};
use crate::template::TemplateShape;
use crate::TracingTemplate;
use trace_core::models::assessment::TemplateKind;

pub const MEANDER_INITIAL_SIDE: f64 = 100.0;

/// Added to the side length after every second leg.
pub const MEANDER_SIDE_INCREMENT: f64 = 100.0;

pub const MEANDER_TURNS: usize = 2;

/// Rectangular spiral unwinding outwards from the canvas center.
///
/// Leg order: right and down by half a side, then per turn left, up, right,
/// down, lengthening the side after each up and each down leg. The path has
/// `3 + 4 * MEANDER_TURNS` vertices.
pub struct Meander;

impl TracingTemplate for Meander {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Meander
    }

    fn name(&self) -> &str {
        "Meander Tracing"
    }

    fn instructions(&self) -> &str {
        "Ask the patient to trace over the square spiral, starting from the center"
    }

    fn generate(&self, size: CanvasSize) -> TemplateShape {
        let Point { mut x, mut y } = size.center();
        let mut side = MEANDER_INITIAL_SIDE;

        let mut vertices = Vec::with_capacity(3 + 4 * MEANDER_TURNS);
        vertices.push(Point::new(x, y));

        x += side / 2.0;
        vertices.push(Point::new(x, y));
        y += side / 2.0;
        vertices.push(Point::new(x, y));

        for _ in 0..MEANDER_TURNS {
            x -= side;
            vertices.push(Point::new(x, y));
            y -= side;
            vertices.push(Point::new(x, y));
            side += MEANDER_SIDE_INCREMENT;

            x += side;
            vertices.push(Point::new(x, y));
            y += side;
            vertices.push(Point::new(x, y));
            side += MEANDER_SIDE_INCREMENT;
        }

        TemplateShape::Path { vertices }
    }
}
