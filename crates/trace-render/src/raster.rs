//! Rasterization to transparent PNGs, matching the two stacked canvases of
//! the assessment page: a light template layer and a dark trace layer.

use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke as LineStroke, Transform,
};

use trace_capture::geometry::{CanvasSize, Point};
use trace_capture::session::TracingSession;
use trace_capture::stroke::Stroke;
use trace_capture::template::TemplateShape;

use crate::data_url::png_data_url;
use crate::error::RenderError;

#[derive(Debug, Clone, Copy)]
pub struct LineStyle {
    pub rgb: [u8; 3],
    pub width: f32,
}

pub const TEMPLATE_STYLE: LineStyle = LineStyle {
    rgb: [0xcc, 0xcc, 0xcc],
    width: 1.0,
};

pub const TRACE_STYLE: LineStyle = LineStyle {
    rgb: [0x00, 0x00, 0x00],
    width: 2.0,
};

/// Longest side, in pixels, a surface may have before rasterizing is refused.
pub const MAX_SURFACE_SIDE: u32 = 8192;

/// Both layers of one session, PNG-encoded.
#[derive(Debug, Clone)]
pub struct SessionImages {
    pub template_png: Vec<u8>,
    pub trace_png: Vec<u8>,
}

impl SessionImages {
    pub fn template_data_url(&self) -> String {
        png_data_url(&self.template_png)
    }

    pub fn trace_data_url(&self) -> String {
        png_data_url(&self.trace_png)
    }
}

pub fn rasterize_session(session: &TracingSession) -> Result<SessionImages, RenderError> {
    let template_png = render_template_png(session.template(), session.size())?;
    let trace_png = render_strokes_png(session.strokes(), session.size())?;
    tracing::debug!(
        session = %session.id(),
        template_bytes = template_png.len(),
        trace_bytes = trace_png.len(),
        "session rasterized"
    );
    Ok(SessionImages {
        template_png,
        trace_png,
    })
}

/// Text labels need a font engine and are left out; the PNG is then blank.
pub fn render_template_png(shape: &TemplateShape, size: CanvasSize) -> Result<Vec<u8>, RenderError> {
    let mut pixmap = surface(size)?;
    if shape.is_strokeable() {
        stroke_polyline(&mut pixmap, shape.vertices(), TEMPLATE_STYLE);
    } else {
        tracing::debug!("template has no strokeable path, raster left blank");
    }
    encode(&pixmap)
}

pub fn render_strokes_png(strokes: &[Stroke], size: CanvasSize) -> Result<Vec<u8>, RenderError> {
    let mut pixmap = surface(size)?;
    for stroke in strokes {
        let points: Vec<Point> = stroke.points().iter().map(|p| p.position()).collect();
        match points.as_slice() {
            [] => {}
            [single] => dot(&mut pixmap, *single, TRACE_STYLE),
            _ => stroke_polyline(&mut pixmap, &points, TRACE_STYLE),
        }
    }
    encode(&pixmap)
}

fn surface(size: CanvasSize) -> Result<Pixmap, RenderError> {
    let width = size.width.round() as u32;
    let height = size.height.round() as u32;
    if width > MAX_SURFACE_SIDE || height > MAX_SURFACE_SIDE {
        tracing::warn!(width, height, "surface too large to rasterize");
        return Err(RenderError::SurfaceTooLarge {
            width,
            height,
            max: MAX_SURFACE_SIDE,
        });
    }
    Pixmap::new(width, height).ok_or(RenderError::EmptySurface { width, height })
}

fn encode(pixmap: &Pixmap) -> Result<Vec<u8>, RenderError> {
    pixmap
        .encode_png()
        .map_err(|e| RenderError::Png(e.to_string()))
}

fn paint(style: LineStyle) -> Paint<'static> {
    let [r, g, b] = style.rgb;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, 255);
    paint.anti_alias = true;
    paint
}

fn stroke_polyline(pixmap: &mut Pixmap, points: &[Point], style: LineStyle) {
    let mut builder = PathBuilder::new();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            builder.move_to(p.x as f32, p.y as f32);
        } else {
            builder.line_to(p.x as f32, p.y as f32);
        }
    }
    let Some(path) = builder.finish() else {
        return;
    };

    let line = LineStroke {
        width: style.width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..LineStroke::default()
    };
    pixmap.stroke_path(&path, &paint(style), &line, Transform::identity(), None);
}

fn dot(pixmap: &mut Pixmap, at: Point, style: LineStyle) {
    if let Some(circle) = PathBuilder::from_circle(at.x as f32, at.y as f32, style.width / 2.0) {
        pixmap.fill_path(
            &circle,
            &paint(style),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}
