//! trace-capture
//!
//! Tracing-assessment capture core. Pure geometry and in-memory state, no
//! I/O. Generates the reference templates, records timestamped pointer input
//! over them, and derives the local tremor/speed heuristics.

pub mod error;
pub mod geometry;
pub mod input;
pub mod metrics;
pub mod session;
pub mod stroke;
pub mod template;
pub mod templates;

use geometry::CanvasSize;
use template::TemplateShape;
use trace_core::models::assessment::TemplateKind;

/// Trait implemented by each reference shape a patient can trace.
pub trait TracingTemplate: Send + Sync {
    fn kind(&self) -> TemplateKind;

    /// Unique identifier, identical to the wire name of [`TemplateKind`].
    fn id(&self) -> &str {
        self.kind().as_str()
    }

    /// Human-readable name (e.g., "Spiral Tracing").
    fn name(&self) -> &str;

    /// What the clinician tells the patient before they start.
    fn instructions(&self) -> &str;

    /// Build the shape for a drawing surface. Must be a pure function of `size`.
    fn generate(&self, size: CanvasSize) -> TemplateShape;
}

/// Return all registered templates, in selector order.
pub fn all_templates() -> Vec<&'static dyn TracingTemplate> {
    TemplateKind::ALL.into_iter().map(template_for).collect()
}

/// Look up a template by ID.
pub fn get_template(id: &str) -> Option<&'static dyn TracingTemplate> {
    all_templates().into_iter().find(|t| t.id() == id)
}

pub fn template_for(kind: TemplateKind) -> &'static dyn TracingTemplate {
    match kind {
        TemplateKind::Spiral => &templates::spiral::Spiral,
        TemplateKind::Meander => &templates::meander::Meander,
        TemplateKind::StraightLine => &templates::line::StraightLine,
        TemplateKind::Text => &templates::text::TextPrompt,
    }
}

/// Generate the reference shape for `kind` on a `width` × `height` surface.
///
/// Degenerate sizes are clamped, never rejected.
pub fn generate_template(kind: TemplateKind, width: f64, height: f64) -> TemplateShape {
    template_for(kind).generate(CanvasSize::new(width, height))
}
