//! Markdown assessment report.
//!
//! Findings and recommendations use the same wording and severity bands
//! as the on-screen results panel.

use serde::Serialize;
use tera::{Context, Tera};

use trace_capture::metrics::{DerivedMetrics, Severity, display_score};
use trace_capture::session::TracingSession;
use trace_capture::template_for;
use trace_core::models::scoring::ScoringResult;

use crate::error::RenderError;

pub const REPORT_TEMPLATE_NAME: &str = "assessment_report.md";

const REPORT_TEMPLATE: &str = include_str!("../templates/assessment_report.md.tera");

#[derive(Debug, Clone, Serialize)]
pub struct ScoreRow {
    pub name: &'static str,
    pub value: u32,
    pub severity: &'static str,
    pub placeholder: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub label: &'static str,
    pub text: &'static str,
}

/// Everything the report template can reference.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub patient_name: Option<String>,
    pub assessment_name: String,
    pub date: String,
    pub session_id: String,
    pub point_count: usize,
    pub elapsed_seconds: String,
    pub scores: Vec<ScoreRow>,
    pub has_placeholders: bool,
    pub scoring: Option<ScoringResult>,
    pub summary_severity: &'static str,
    pub findings: Vec<Finding>,
    pub recommendation: Option<&'static str>,
}

impl ReportContext {
    pub fn from_session(
        session: &TracingSession,
        patient_name: Option<&str>,
        scoring: Option<ScoringResult>,
    ) -> Result<Self, RenderError> {
        let metrics = session.metrics().ok_or(RenderError::NotAnalyzed)?;
        let started = session.started_at().unwrap_or_else(jiff::Timestamp::now);
        let date = started.to_zoned(jiff::tz::TimeZone::system()).date();

        Ok(Self {
            patient_name: patient_name.map(str::to_string),
            assessment_name: template_for(session.kind()).name().to_string(),
            date: date.to_string(),
            session_id: session.id().to_string(),
            point_count: metrics.point_count,
            elapsed_seconds: format!("{:.1}", metrics.elapsed_ms as f64 / 1000.0),
            scores: score_rows(metrics),
            has_placeholders: metrics.placeholders.is_some(),
            scoring,
            summary_severity: Severity::from_score(metrics.overall().unwrap_or(metrics.tremor))
                .label(),
            findings: findings(metrics),
            recommendation: metrics.overall().map(recommendation),
        })
    }
}

/// Render a Tera template against any serializable context.
pub fn render_markdown(
    template_name: &str,
    template_content: &str,
    context: &impl Serialize,
) -> Result<String, RenderError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| RenderError::TemplateParse(e.to_string()))?;

    let context = Context::from_serialize(context)
        .map_err(|e| RenderError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

pub fn render_report(
    session: &TracingSession,
    patient_name: Option<&str>,
    scoring: Option<ScoringResult>,
) -> Result<String, RenderError> {
    let context = ReportContext::from_session(session, patient_name, scoring)?;
    render_markdown(REPORT_TEMPLATE_NAME, REPORT_TEMPLATE, &context)
}

fn row(name: &'static str, score: f64, placeholder: bool) -> ScoreRow {
    ScoreRow {
        name,
        value: display_score(score),
        severity: Severity::from_score(score).label(),
        placeholder,
    }
}

fn score_rows(metrics: &DerivedMetrics) -> Vec<ScoreRow> {
    let mut rows = Vec::with_capacity(5);
    if let Some(overall) = metrics.overall() {
        rows.push(row("Overall Severity", overall, true));
    }
    rows.push(row("Tremor", metrics.tremor, false));
    if let Some(p) = metrics.placeholders {
        rows.push(row("Deviation", p.deviation, true));
    }
    rows.push(row("Speed", metrics.speed, false));
    if let Some(p) = metrics.placeholders {
        rows.push(row("Pressure", p.pressure, true));
    }
    rows
}

fn findings(metrics: &DerivedMetrics) -> Vec<Finding> {
    let mut out = vec![Finding {
        label: "Tremor",
        text: match Severity::from_score(metrics.tremor) {
            Severity::Mild => "Minimal resting tremor observed during the tracing task.",
            Severity::Moderate => "Moderate tremor affecting fine motor control.",
            Severity::Severe => {
                "Significant tremor affecting the patient's ability to complete the tracing task."
            }
        },
    }];

    if let Some(p) = metrics.placeholders {
        out.push(Finding {
            label: "Movement Precision (placeholder)",
            text: match Severity::from_score(p.deviation) {
                Severity::Mild => "Good ability to follow the template pattern.",
                Severity::Moderate => "Moderate difficulty maintaining precision in tracing.",
                Severity::Severe => "Significant deviation from the template pattern.",
            },
        });
    }

    out.push(Finding {
        label: "Movement Speed",
        text: match Severity::from_score(metrics.speed) {
            Severity::Mild => "Normal movement speed with good control.",
            Severity::Moderate => "Some bradykinesia (slowness of movement) observed.",
            Severity::Severe => "Marked bradykinesia affecting task completion time.",
        },
    });
    out
}

fn recommendation(overall: f64) -> &'static str {
    match Severity::from_score(overall) {
        Severity::Mild => {
            "Continue current treatment regimen with regular monitoring. Consider physical therapy to maintain motor function."
        }
        Severity::Moderate => {
            "Evaluate current medication dosage and timing. Consider adding physical and occupational therapy to the treatment plan."
        }
        Severity::Severe => {
            "Urgent medication adjustment recommended. Consider referral to movement disorder specialist for advanced treatment options including deep brain stimulation evaluation."
        }
    }
}
