use std::path::Path;

use eyre::{Result, WrapErr};

use trace_capture::generate_template;
use trace_capture::input::EventRecording;
use trace_capture::metrics::{PlaceholderSource, RandomPlaceholders, Severity, display_score};
use trace_capture::session::{MIN_ANALYSIS_POINTS, TracingSession};
use trace_capture::template_for;
use trace_client::client::BackendClient;
use trace_core::models::assessment::TemplateKind;
use trace_core::models::patient::{NewPatient, Treatment};
use trace_core::models::scoring::{ImageSubmission, ScoringResult};
use trace_render::raster::{rasterize_session, render_template_png};
use trace_render::report::render_report;
use trace_render::svg::{overlay_svg, template_svg};

use crate::cli::{Commands, ConfigAction, NoteAction, PatientAction, TreatmentAction};
use crate::config::{self, TraceConfig};

pub fn run(command: Commands, config_path: &Path) -> Result<()> {
    let config = config::load_or_default(config_path)?;

    match command {
        Commands::Template {
            kind,
            width,
            height,
            svg,
            png,
        } => template(&config, kind, width, height, svg.as_deref(), png.as_deref()),
        Commands::Replay {
            events,
            template,
            placeholders,
            report,
            submit,
            patient_name,
            age,
            out_dir,
        } => replay(
            &config,
            &ReplayOptions {
                events: &events,
                kind: template,
                placeholders: placeholders || config.placeholder_scores,
                report: report.as_deref(),
                submission: if submit { patient_name.zip(age) } else { None },
                out_dir: out_dir.as_deref(),
            },
        ),
        Commands::Patients { action } => patients(&client(&config), action),
        Commands::Notes {
            action: NoteAction::Add { patient_id, note },
        } => {
            client(&config).add_note(&patient_id, &note)?;
            println!("Note added to {patient_id}");
            Ok(())
        }
        Commands::Treatments {
            action:
                TreatmentAction::Add {
                    patient_id,
                    date,
                    description,
                    provider,
                },
        } => {
            let treatment = Treatment {
                date,
                t_desc: description,
                provider,
            };
            client(&config).add_treatment(&patient_id, &treatment)?;
            println!("Treatment recorded for {patient_id}");
            Ok(())
        }
        Commands::Assessments { patient_id } => {
            let records = client(&config).list_assessments(&patient_id)?;
            if records.is_empty() {
                println!("No assessments for {patient_id}");
            }
            for record in records {
                println!(
                    "{}  {:<8}  severity {}  tremor {}  dtw {}",
                    record.date,
                    record.kind.as_deref().unwrap_or("-"),
                    optional_score(record.severity),
                    optional_score(record.tremor),
                    optional_score(record.dtw_distance),
                );
            }
            Ok(())
        }
        Commands::Recent => {
            for entry in client(&config).recent_assessments()? {
                let p = entry.patient;
                println!("{}  {} {}  ({})", p.date, p.first_name, p.last_name, p.id);
            }
            Ok(())
        }
        Commands::Report { patient_id } => {
            let generated = client(&config).generate_report(&patient_id)?;
            println!("{}", generated.report);
            Ok(())
        }
        Commands::Config { action } => config_action(config, config_path, action),
    }
}

struct ReplayOptions<'a> {
    events: &'a Path,
    kind: TemplateKind,
    placeholders: bool,
    report: Option<&'a Path>,
    /// Patient name and age, when scoring on the backend.
    submission: Option<(String, u32)>,
    out_dir: Option<&'a Path>,
}

fn client(config: &TraceConfig) -> BackendClient {
    let base_url = config.resolved_base_url();
    tracing::debug!(%base_url, "using backend");
    BackendClient::new(base_url)
}

fn template(
    config: &TraceConfig,
    kind: TemplateKind,
    width: Option<f64>,
    height: Option<f64>,
    svg: Option<&Path>,
    png: Option<&Path>,
) -> Result<()> {
    let canvas = config.canvas();
    let size = trace_capture::geometry::CanvasSize::new(
        width.unwrap_or(canvas.width),
        height.unwrap_or(canvas.height),
    );
    let shape = generate_template(kind, size.width, size.height);
    let info = template_for(kind);

    println!("{} ({})", info.name(), info.id());
    println!("{}", info.instructions());
    println!("{} vertices on {}x{}", shape.vertices().len(), size.width, size.height);

    if let Some(path) = svg {
        write_file(path, template_svg(&shape, size).as_bytes())?;
    }
    if let Some(path) = png {
        write_file(path, &render_template_png(&shape, size)?)?;
    }
    Ok(())
}

fn replay(config: &TraceConfig, options: &ReplayOptions<'_>) -> Result<()> {
    let contents = std::fs::read_to_string(options.events)
        .wrap_err_with(|| format!("failed to read {}", options.events.display()))?;
    let recording: EventRecording = serde_json::from_str(&contents)
        .wrap_err_with(|| format!("invalid event recording {}", options.events.display()))?;

    let mut session = TracingSession::new(options.kind, recording.canvas.size());
    let applied = session.replay(&recording);
    tracing::info!(
        events = recording.events.len(),
        applied,
        points = session.point_count(),
        "recording replayed"
    );

    let mut random = RandomPlaceholders;
    let source: Option<&mut dyn PlaceholderSource> = if options.placeholders {
        Some(&mut random)
    } else {
        None
    };
    let Some(metrics) = session.analyze(source).copied() else {
        return Err(eyre::eyre!(
            "need at least {MIN_ANALYSIS_POINTS} points to analyze, captured {}",
            session.point_count()
        ));
    };

    println!("Template:  {}", template_for(session.kind()).name());
    println!("Points:    {}", metrics.point_count);
    println!("Duration:  {:.1}s", metrics.elapsed_ms as f64 / 1000.0);
    print_score("Tremor", metrics.tremor, false);
    print_score("Speed", metrics.speed, false);
    if let Some(p) = metrics.placeholders {
        print_score("Deviation", p.deviation, true);
        print_score("Pressure", p.pressure, true);
    }
    if let Some(overall) = metrics.overall() {
        print_score("Overall", overall, true);
    }

    if let Some(dir) = options.out_dir {
        std::fs::create_dir_all(dir)?;
        let images = rasterize_session(&session)?;
        write_file(&dir.join("template.png"), &images.template_png)?;
        write_file(&dir.join("trace.png"), &images.trace_png)?;
        let overlay = overlay_svg(session.template(), session.strokes(), session.size());
        write_file(&dir.join("overlay.svg"), overlay.as_bytes())?;
    }

    let scoring = match &options.submission {
        Some((patient_name, age)) => Some(submit(config, &session, patient_name, *age)?),
        None => None,
    };

    if let Some(path) = options.report {
        let patient_name = options.submission.as_ref().map(|(name, _)| name.as_str());
        let markdown = render_report(&session, patient_name, scoring)?;
        write_file(path, markdown.as_bytes())?;
    }
    Ok(())
}

fn submit(
    config: &TraceConfig,
    session: &TracingSession,
    patient_name: &str,
    age: u32,
) -> Result<ScoringResult> {
    let images = rasterize_session(session)?;
    let submission = ImageSubmission {
        trace_image: images.trace_data_url(),
        template_image: images.template_data_url(),
        age,
        patient_name: patient_name.to_string(),
    };
    let result = client(config).submit_images(&submission)?;

    println!("Backend scoring:");
    println!("  Severity score: {:.2}", result.severity_score);
    println!("  Mean tremor:    {:.2}", result.mean_tremor);
    println!("  DTW distance:   {:.2}", result.dtw_distance);
    Ok(result)
}

fn patients(client: &BackendClient, action: PatientAction) -> Result<()> {
    match action {
        PatientAction::List => {
            for p in client.list_patients()? {
                println!("{}  {} {}", p.id, p.first_name, p.last_name);
            }
        }
        PatientAction::Show { id } => {
            let patient = client.get_patient(&id)?;
            println!("{}", serde_json::to_string_pretty(&patient)?);
        }
        PatientAction::Find {
            first_name,
            last_name,
        } => {
            let patient = client.find_patient(&first_name, &last_name)?;
            println!("{}  {}", patient.id, patient.full_name());
        }
        PatientAction::Add {
            first_name,
            last_name,
            birth_date,
            gender,
            email,
            phone,
            address,
            contact_name,
            contact_phone,
            diagnosis,
            medical_history,
            medication,
        } => {
            let patient = NewPatient {
                email,
                phone,
                address,
                contact_name,
                contact_phone,
                diagnosis,
                medical_history,
                medication,
                ..NewPatient::new(first_name, last_name, birth_date, gender)
            };
            client.add_patient(&patient)?;
            println!("Added {} {}", patient.first_name, patient.last_name);
        }
    }
    Ok(())
}

fn config_action(mut config: TraceConfig, path: &Path, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("# {}", path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
            if std::env::var(config::API_URL_ENV).is_ok() {
                println!(
                    "# {} is set; requests go to {}",
                    config::API_URL_ENV,
                    config.resolved_base_url()
                );
            }
        }
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            config::save(path, &config)?;
            println!("{key} updated");
        }
        ConfigAction::Reset => {
            config::delete(path)?;
            config::save(path, &TraceConfig::default())?;
            println!("Configuration reset");
        }
    }
    Ok(())
}

fn print_score(name: &str, score: f64, placeholder: bool) {
    let marker = if placeholder { "  (placeholder)" } else { "" };
    println!(
        "{:<10} {:>3}/100  {}{marker}",
        format!("{name}:"),
        display_score(score),
        Severity::from_score(score).label()
    );
}

fn optional_score(score: Option<f64>) -> String {
    score.map_or_else(|| "-".to_string(), |s| format!("{s:.2}"))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "written");
    Ok(())
}
