use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;

use biorisk_app::config;
use biorisk_app::session::{Session, SessionError};
use biorisk_export::render::{render_default, render_report};
use biorisk_export::write::write_report;
use biorisk_models::engine::DiagnosticEngine;

#[derive(Parser)]
#[command(name = "biorisk", version, about = "Biomarker-based clinical risk scoring")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available model variants.
    List,
    /// Show the input fields and threshold of a model.
    Fields {
        /// Model ID; defaults to the configured startup model.
        model: Option<String>,
    },
    /// Score a JSON file of field values and print the report.
    Score {
        /// JSON object mapping field keys to values (numbers or text).
        input: PathBuf,
        /// Model ID; defaults to the configured startup model.
        #[arg(short, long)]
        model: Option<String>,
        /// Physician name printed on the report.
        #[arg(long)]
        doctor: Option<String>,
        /// Custom Tera template for the report.
        #[arg(long)]
        template: Option<PathBuf>,
        /// Write the report here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Print the raw result as JSON instead of a report.
        #[arg(long)]
        json: bool,
    },
    /// Update the saved user config. With no options, print it.
    Config {
        /// Physician name pre-filled on reports; empty clears it.
        #[arg(long)]
        doctor: Option<String>,
        /// Model selected on startup.
        #[arg(long)]
        default_model: Option<String>,
        /// Catalog document replacing the built-in variants.
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// `tracing` filter used when `RUST_LOG` is unset.
        #[arg(long)]
        log_filter: Option<String>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let mut config = config::load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.log_filter.as_deref().unwrap_or("info"))
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let catalog = config::load_catalog(&config)?;
    let startup = config::startup_model(&config, &catalog);
    let mut session = Session::new(DiagnosticEngine::new(catalog));

    let pick = |explicit: Option<String>| {
        explicit
            .or_else(|| startup.clone())
            .ok_or_else(|| eyre::eyre!("catalog has no models"))
    };

    match cli.command {
        Command::List => {
            for variant in session.engine().catalog().iter() {
                println!("{}\t{}", variant.id, variant.name);
            }
        }
        Command::Fields { model } => {
            let model = pick(model)?;
            let fields = session.select_model(&model)?;
            for field in fields {
                println!("{}\t{}", field.key, field.label);
            }
            let variant = session.current_variant()?;
            println!("threshold\t{}", variant.threshold);
        }
        Command::Score {
            input,
            model,
            doctor,
            template,
            out,
            json,
        } => {
            let model = pick(model)?;
            session.select_model(&model)?;

            let raw = read_raw_values(&input)?;
            match session.calculate(&raw) {
                Ok(_) => {}
                Err(SessionError::Form(form)) => {
                    for (key, err) in &form.errors {
                        eprintln!("{key}: {err}");
                    }
                    return Err(eyre::eyre!(form));
                }
                Err(e) => return Err(e.into()),
            }

            let text = if json {
                serde_json::to_string_pretty(&session.last_result())?
            } else {
                let doctor = doctor.or_else(|| config.doctor_name.clone());
                let report = session.report(doctor.as_deref(), jiff::Timestamp::now())?;
                match &template {
                    Some(path) => {
                        let content = std::fs::read_to_string(path)?;
                        render_report("custom", &content, &report)?
                    }
                    None => render_default(&report)?,
                }
            };

            match out {
                Some(path) => write_report(&path, &text)?,
                None => println!("{text}"),
            }
        }
        Command::Config {
            doctor,
            default_model,
            catalog,
            log_filter,
        } => {
            let changed = doctor.is_some()
                || default_model.is_some()
                || catalog.is_some()
                || log_filter.is_some();
            if let Some(doctor) = doctor {
                config.doctor_name = Some(doctor).filter(|d| !d.trim().is_empty());
            }
            if let Some(path) = catalog {
                config.catalog_path = Some(path);
            }
            if let Some(filter) = log_filter {
                config.log_filter = Some(filter);
            }
            if let Some(model) = default_model {
                let catalog = config::load_catalog(&config)?;
                config::set_default_model(&mut config, &catalog, &model)?;
            }
            if changed {
                config::save_config(&config)?;
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Read form values from a JSON object. Numbers are passed through as text
/// so they go through the same parsing as typed input.
fn read_raw_values(path: &std::path::Path) -> Result<BTreeMap<String, String>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
    let values: BTreeMap<String, serde_json::Value> = serde_json::from_str(&contents)?;
    Ok(values
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect())
}
