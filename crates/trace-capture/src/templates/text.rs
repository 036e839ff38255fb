use crate::geometry::CanvasSize;
use crate::template::{TemplateShape, TextLabel};
use crate::TracingTemplate;
use trace_core::models::assessment::TemplateKind;

pub const TEXT_PROMPT: &str = "Trace this sentence";

pub const TEXT_FONT_PX: f64 = 24.0;

pub struct TextPrompt;

impl TracingTemplate for TextPrompt {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Text
    }

    fn name(&self) -> &str {
        "Text Tracing"
    }

    fn instructions(&self) -> &str {
        "Ask the patient to trace over the text"
    }

    fn generate(&self, size: CanvasSize) -> TemplateShape {
        TemplateShape::Label(TextLabel {
            text: TEXT_PROMPT.to_string(),
            anchor: size.center(),
            font_px: TEXT_FONT_PX,
        })
    }
}
