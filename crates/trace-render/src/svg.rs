//! Vector rendition. Unlike the PNG path this keeps text templates.

use trace_capture::geometry::{CanvasSize, Point};
use trace_capture::stroke::Stroke;
use trace_capture::template::TemplateShape;

use crate::raster::{LineStyle, TEMPLATE_STYLE, TRACE_STYLE};

pub fn template_svg(shape: &TemplateShape, size: CanvasSize) -> String {
    document(size, &template_element(shape))
}

pub fn strokes_svg(strokes: &[Stroke], size: CanvasSize) -> String {
    document(size, &stroke_elements(strokes))
}

/// Template and trace on one sheet, trace on top.
pub fn overlay_svg(shape: &TemplateShape, strokes: &[Stroke], size: CanvasSize) -> String {
    let mut body = template_element(shape);
    body.push_str(&stroke_elements(strokes));
    document(size, &body)
}

fn document(size: CanvasSize, body: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
        w = size.width,
        h = size.height,
    )
}

fn template_element(shape: &TemplateShape) -> String {
    match shape {
        TemplateShape::Path { vertices } => polyline(vertices, TEMPLATE_STYLE),
        TemplateShape::Label(label) => format!(
            "  <text x=\"{x:.2}\" y=\"{y:.2}\" font-family=\"Arial\" font-size=\"{size}\" text-anchor=\"middle\" fill=\"{fill}\">{text}</text>\n",
            x = label.anchor.x,
            y = label.anchor.y,
            size = label.font_px,
            fill = hex(TEMPLATE_STYLE),
            text = escape(&label.text),
        ),
    }
}

fn stroke_elements(strokes: &[Stroke]) -> String {
    let mut out = String::new();
    for stroke in strokes.iter().filter(|s| !s.is_empty()) {
        let points: Vec<Point> = stroke.points().iter().map(|p| p.position()).collect();
        out.push_str(&polyline(&points, TRACE_STYLE));
    }
    out
}

fn polyline(points: &[Point], style: LineStyle) -> String {
    let coords: Vec<String> = points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect();
    format!(
        "  <polyline fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\" points=\"{}\"/>\n",
        hex(style),
        style.width,
        coords.join(" "),
    )
}

fn hex(style: LineStyle) -> String {
    let [r, g, b] = style.rgb;
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
