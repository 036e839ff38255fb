//! Command-line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use trace_core::models::assessment::TemplateKind;

/// Trace - run and score drawing-based tremor assessments
#[derive(Parser, Debug)]
#[command(name = "trace")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a reference template
    Template {
        /// spiral, meander, line or text
        kind: TemplateKind,

        /// Surface width (defaults to the configured canvas)
        #[arg(long)]
        width: Option<f64>,

        /// Surface height (defaults to the configured canvas)
        #[arg(long)]
        height: Option<f64>,

        /// Write an SVG rendition
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Write a PNG rendition
        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// Replay recorded pointer events and analyze the result
    Replay {
        /// Recorded events (JSON)
        events: PathBuf,

        /// Template the patient traced
        #[arg(short, long, default_value = "spiral")]
        template: TemplateKind,

        /// Include the random deviation/pressure stand-ins
        #[arg(long)]
        placeholders: bool,

        /// Write a markdown report
        #[arg(long)]
        report: Option<PathBuf>,

        /// Send the images to the backend for scoring
        #[arg(long, requires_all = ["patient_name", "age"])]
        submit: bool,

        /// Patient name sent with the submission
        #[arg(long)]
        patient_name: Option<String>,

        /// Patient age sent with the submission
        #[arg(long)]
        age: Option<u32>,

        /// Write template.png, trace.png and overlay.svg here
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Patient records
    Patients {
        #[command(subcommand)]
        action: PatientAction,
    },

    /// Clinician notes
    Notes {
        #[command(subcommand)]
        action: NoteAction,
    },

    /// Treatment history
    Treatments {
        #[command(subcommand)]
        action: TreatmentAction,
    },

    /// List a patient's assessments
    Assessments {
        patient_id: String,
    },

    /// List recently assessed patients
    Recent,

    /// Fetch the generated clinical report for a patient
    Report {
        patient_id: String,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PatientAction {
    /// List all patients
    List,

    /// Show one patient
    Show { id: String },

    /// Look a patient up by name
    Find { first_name: String, last_name: String },

    /// Register a patient
    Add {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// YYYY-MM-DD
        #[arg(long)]
        birth_date: jiff::civil::Date,

        #[arg(long)]
        gender: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        address: String,

        #[arg(long, default_value = "")]
        contact_name: String,

        #[arg(long, default_value = "")]
        contact_phone: String,

        #[arg(long, default_value = "")]
        diagnosis: String,

        #[arg(long, default_value = "")]
        medical_history: String,

        #[arg(long, default_value = "")]
        medication: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteAction {
    /// Append a note to a patient's record
    Add { patient_id: String, note: String },
}

#[derive(Subcommand, Debug)]
pub enum TreatmentAction {
    /// Record a treatment
    Add {
        patient_id: String,

        /// YYYY-MM-DD
        #[arg(long)]
        date: jiff::civil::Date,

        #[arg(long)]
        description: String,

        #[arg(long)]
        provider: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// api_base_url, canvas_width, canvas_height or placeholder_scores
        key: String,

        value: String,
    },

    /// Reset configuration to defaults
    Reset,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_template_command() {
        let cli = Cli::try_parse_from(["trace", "template", "meander", "--width", "1024"]).unwrap();

        match cli.command {
            Commands::Template {
                kind,
                width,
                height,
                svg,
                png,
            } => {
                assert_eq!(kind, TemplateKind::Meander);
                assert_eq!(width, Some(1024.0));
                assert!(height.is_none());
                assert!(svg.is_none());
                assert!(png.is_none());
            }
            _ => panic!("Expected Template command"),
        }
    }

    #[test]
    fn test_template_kind_is_case_insensitive() {
        let cli = Cli::try_parse_from(["trace", "template", "LINE"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Template {
                kind: TemplateKind::StraightLine,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_template_kind_is_rejected() {
        assert!(Cli::try_parse_from(["trace", "template", "circle"]).is_err());
    }

    #[test]
    fn test_parse_replay_defaults() {
        let cli = Cli::try_parse_from(["trace", "replay", "events.json"]).unwrap();

        match cli.command {
            Commands::Replay {
                events,
                template,
                placeholders,
                submit,
                out_dir,
                ..
            } => {
                assert_eq!(events, PathBuf::from("events.json"));
                assert_eq!(template, TemplateKind::Spiral);
                assert!(!placeholders);
                assert!(!submit);
                assert!(out_dir.is_none());
            }
            _ => panic!("Expected Replay command"),
        }
    }

    #[test]
    fn test_submit_requires_patient_details() {
        assert!(Cli::try_parse_from(["trace", "replay", "events.json", "--submit"]).is_err());

        let cli = Cli::try_parse_from([
            "trace",
            "replay",
            "events.json",
            "--submit",
            "--patient-name",
            "Ada Lovelace",
            "--age",
            "68",
        ])
        .unwrap();
        match cli.command {
            Commands::Replay {
                submit,
                patient_name,
                age,
                ..
            } => {
                assert!(submit);
                assert_eq!(patient_name.as_deref(), Some("Ada Lovelace"));
                assert_eq!(age, Some(68));
            }
            _ => panic!("Expected Replay command"),
        }
    }

    #[test]
    fn test_parse_treatment_add() {
        let cli = Cli::try_parse_from([
            "trace",
            "treatments",
            "add",
            "p1",
            "--date",
            "2024-03-01",
            "--description",
            "Levodopa 100mg",
            "--provider",
            "Dr. Johnson",
        ])
        .unwrap();

        match cli.command {
            Commands::Treatments {
                action:
                    TreatmentAction::Add {
                        patient_id, date, ..
                    },
            } => {
                assert_eq!(patient_id, "p1");
                assert_eq!(date, jiff::civil::date(2024, 3, 1));
            }
            _ => panic!("Expected Treatments command"),
        }
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let result = Cli::try_parse_from([
            "trace",
            "patients",
            "add",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
            "--birth-date",
            "1950-13-40",
            "--gender",
            "female",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "trace",
            "recent",
            "--verbose",
            "--json-logs",
            "--config",
            "/tmp/trace.json",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(cli.json_logs);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/trace.json")));
        assert!(matches!(cli.command, Commands::Recent));
    }

    #[test]
    fn test_parse_config_set() {
        let cli =
            Cli::try_parse_from(["trace", "config", "set", "canvas_width", "1024"]).unwrap();
        match cli.command {
            Commands::Config {
                action: ConfigAction::Set { key, value },
            } => {
                assert_eq!(key, "canvas_width");
                assert_eq!(value, "1024");
            }
            _ => panic!("Expected Config command"),
        }
    }
}
