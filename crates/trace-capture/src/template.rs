//! Rendered template shapes and the drawing instructions derived from them.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Reference shape for one template variant on one surface size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TemplateShape {
    /// A connected polyline: move to the first vertex, line to the rest.
    Path { vertices: Vec<Point> },
    /// Display-only text. There is nothing to stroke, so tracing accuracy
    /// against it is approximate at best.
    Label(TextLabel),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub text: String,
    /// Center of the text baseline.
    pub anchor: Point,
    pub font_px: f64,
}

/// A single canvas drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp<'a> {
    MoveTo(Point),
    LineTo(Point),
    FillText(&'a TextLabel),
}

impl TemplateShape {
    pub fn vertices(&self) -> &[Point] {
        match self {
            TemplateShape::Path { vertices } => vertices,
            TemplateShape::Label(_) => &[],
        }
    }

    pub fn is_strokeable(&self) -> bool {
        self.vertices().len() >= 2
    }

    pub fn draw_ops(&self) -> Vec<DrawOp<'_>> {
        match self {
            TemplateShape::Path { vertices } => vertices
                .iter()
                .enumerate()
                .map(|(i, &p)| if i == 0 { DrawOp::MoveTo(p) } else { DrawOp::LineTo(p) })
                .collect(),
            TemplateShape::Label(label) => vec![DrawOp::FillText(label)],
        }
    }
}
