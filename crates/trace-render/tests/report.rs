use trace_capture::geometry::{CanvasSize, Point};
use trace_capture::metrics::PlaceholderSource;
use trace_capture::session::TracingSession;
use trace_core::models::assessment::TemplateKind;
use trace_core::models::scoring::ScoringResult;
use trace_render::error::RenderError;
use trace_render::report::{ReportContext, render_markdown, render_report};

struct Low;

impl PlaceholderSource for Low {
    fn next_unit(&mut self) -> f64 {
        0.0
    }
}

fn analyzed_session(placeholders: bool) -> TracingSession {
    let mut session = TracingSession::new(TemplateKind::Spiral, CanvasSize::new(800.0, 600.0));
    session.pointer_down(Point::new(100.0, 300.0), 0);
    for i in 1..10 {
        session.pointer_move(Point::new(100.0 + 10.0 * i as f64, 300.0), i * 500);
    }
    session.pointer_up();
    if placeholders {
        session.analyze(Some(&mut Low));
    } else {
        session.analyze(None);
    }
    session
}

#[test]
fn report_requires_analysis() {
    let session = TracingSession::new(TemplateKind::Spiral, CanvasSize::default());
    assert!(matches!(
        render_report(&session, None, None),
        Err(RenderError::NotAnalyzed)
    ));
}

#[test]
fn report_lists_measured_scores() {
    let session = analyzed_session(false);
    let report = render_report(&session, Some("Ada Lovelace"), None).unwrap();

    assert!(report.contains("**Patient:** Ada Lovelace"));
    assert!(report.contains("**Assessment:** Spiral Tracing"));
    assert!(report.contains("| Tremor | 0/100 | Mild |"));
    assert!(report.contains("| Speed | 100/100 | Severe |"));
    assert!(report.contains("Minimal resting tremor observed during the tracing task."));
    assert!(report.contains("Marked bradykinesia affecting task completion time."));
    assert!(!report.contains("placeholder"));
    assert!(!report.contains("Treatment Recommendations"));
    assert!(!report.contains("Server Scoring"));
}

#[test]
fn placeholder_scores_are_labelled() {
    let session = analyzed_session(true);
    let report = render_report(&session, None, None).unwrap();

    assert!(report.contains("| Deviation (placeholder) | 30/100 | Moderate |"));
    assert!(report.contains("| Pressure (placeholder) | 30/100 | Moderate |"));
    assert!(report.contains("placeholder values, not measurements"));
    assert!(report.contains("## Treatment Recommendations"));
    assert!(!report.contains("**Patient:**"));
}

#[test]
fn server_scores_are_included_when_present() {
    let session = analyzed_session(false);
    let scoring = ScoringResult {
        severity_score: 2.5,
        mean_tremor: 0.75,
        dtw_distance: 143.0,
    };
    let report = render_report(&session, None, Some(scoring)).unwrap();
    assert!(report.contains("## Server Scoring"));
    assert!(report.contains("- DTW distance: 143"));
}

#[test]
fn context_summarizes_from_tremor_without_overall() {
    let session = analyzed_session(false);
    let context = ReportContext::from_session(&session, None, None).unwrap();
    assert_eq!(context.summary_severity, "Mild");
    assert_eq!(context.point_count, 10);
    assert_eq!(context.elapsed_seconds, "4.5");
    assert_eq!(context.findings.len(), 2);
}

#[test]
fn custom_templates_render_against_context() {
    let session = analyzed_session(false);
    let context = ReportContext::from_session(&session, Some("A"), None).unwrap();
    let out = render_markdown("short.md", "{{ assessment_name }}: {{ scores | length }}", &context)
        .unwrap();
    assert_eq!(out, "Spiral Tracing: 2");
}

#[test]
fn broken_template_is_a_parse_error() {
    let err = render_markdown("bad.md", "{% if %}", &serde_json::json!({})).unwrap_err();
    assert!(matches!(err, RenderError::TemplateParse(_)));
}
