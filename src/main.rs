use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scan_core::config::{report_locale_from_env_value, resolve_fixture_source};
use scan_core::validation::{is_arm_or_hand, parse_click_event};
use scan_core::view::{PainAreaRow, pain_area_rows, render_bar};
use scan_core::{
    ClickOutcome, CoreConfig, LocationId, ScanData, ScanSession, fixture, generate_report_in,
    handle_location_click, schema, upsert_pain_area_with_type,
};

const BAR_TRACK_LEN: usize = 20;

#[derive(Parser)]
#[command(name = "body-scanner")]
#[command(about = "Body scan pain-area recorder and report generator")]
struct Cli {
    /// Fixture file to load (overrides SCAN_FIXTURE_PATH)
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,
    /// Report language: en or fa (overrides SCAN_REPORT_LOCALE)
    #[arg(long, global = true)]
    locale: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the report for the loaded scan
    Report,
    /// List recorded pain areas with severity bars
    Areas,
    /// Apply body-location clicks in order, then print the report
    Click {
        /// Click events as location=severity, e.g. hand_left=7
        #[arg(required = true)]
        events: Vec<String>,
        /// Pain category recorded for accepted clicks
        #[arg(long = "type")]
        pain_type: Option<String>,
        /// Print the resulting scan data as fixture JSON instead of the report
        #[arg(long)]
        json: bool,
    },
    /// Read "location severity" lines from stdin and apply them as clicks
    Session,
    /// Run the schema diagnostic over the fixture and report violations
    Validate,
    /// Print the JSON Schema of the fixture document
    Schema,
}

/// Main entry point for the body scanner CLI
///
/// # Environment Variables
/// - `SCAN_FIXTURE_PATH`: fixture file to load (default: `data/scan_data.json`, then the
///   embedded fixture)
/// - `SCAN_REPORT_LOCALE`: report language, `en` or `fa` (default: `en`)
/// - `RUST_LOG`: extra tracing directives
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("body_scanner=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = resolve_config(&cli)?;

    match cli.command {
        Some(Commands::Report) => {
            let data = fixture::load(cfg.fixture_source())?;
            println!("{}", generate_report_in(&data, cfg.report_locale()));
        }
        Some(Commands::Areas) => {
            let data = fixture::load(cfg.fixture_source())?;
            print_rows(&mut std::io::stdout().lock(), &pain_area_rows(&data), None)?;
        }
        Some(Commands::Click {
            events,
            pain_type,
            json,
        }) => {
            let data = fixture::load(cfg.fixture_source())?;
            let data = apply_clicks(data, &events, pain_type.as_deref())?;
            if json {
                println!("{}", fixture::render(&data)?);
            } else {
                println!("{}", generate_report_in(&data, cfg.report_locale()));
            }
        }
        Some(Commands::Session) => {
            let data = fixture::load(cfg.fixture_source())?;
            run_session(
                ScanSession::new(data, &cfg),
                std::io::stdin().lock(),
                &mut std::io::stdout().lock(),
            )?;
        }
        Some(Commands::Validate) => {
            let text = fixture::read_text(cfg.fixture_source())?;
            let violations = schema::check_str(&text)?;
            if violations.is_empty() {
                fixture::parse(&text)?;
                println!("{}: ok", cfg.fixture_source());
            } else {
                for violation in &violations {
                    println!("{violation}");
                }
                anyhow::bail!(
                    "{}: {} schema violation(s)",
                    cfg.fixture_source(),
                    violations.len()
                );
            }
        }
        Some(Commands::Schema) => {
            println!("{}", serde_json::to_string_pretty(&schema::scan_data_schema()?)?);
        }
        None => {
            println!("Use 'body-scanner --help' for commands");
        }
    }

    Ok(())
}

/// Builds the core configuration from CLI flags, falling back to the environment.
fn resolve_config(cli: &Cli) -> anyhow::Result<CoreConfig> {
    let fixture_override = cli
        .fixture
        .clone()
        .or_else(|| std::env::var_os("SCAN_FIXTURE_PATH").map(PathBuf::from));
    let locale = cli
        .locale
        .clone()
        .or_else(|| std::env::var("SCAN_REPORT_LOCALE").ok());

    let cfg = CoreConfig::new(
        resolve_fixture_source(fixture_override)?,
        report_locale_from_env_value(locale)?,
        scan_core::constants::HIGHLIGHT_DURATION,
    )?;
    tracing::debug!(fixture = %cfg.fixture_source(), locale = ?cfg.report_locale(), "resolved config");
    Ok(cfg)
}

/// Applies `location=severity` events in order.
///
/// With `pain_type` set, accepted clicks record that category instead of the default.
fn apply_clicks(
    mut data: ScanData,
    events: &[String],
    pain_type: Option<&str>,
) -> anyhow::Result<ScanData> {
    for event in events {
        let (location, severity) = parse_click_event(event)?;
        data = match pain_type {
            Some(tag) if is_arm_or_hand(&location) => match LocationId::new(&location) {
                Ok(id) => upsert_pain_area_with_type(&data, id, severity, tag)?,
                Err(e) => {
                    tracing::info!("ignored click on {location:?}: {e}");
                    data
                }
            },
            Some(_) => {
                tracing::info!("ignored click on {location}");
                data
            }
            None => match handle_location_click(&data, &location, severity) {
                ClickOutcome::Updated(updated) => updated,
                ClickOutcome::Ignored => {
                    tracing::info!("ignored click on {location}");
                    data
                }
            },
        };
    }
    Ok(data)
}

/// Drives a session from line input until EOF, then writes the final report.
///
/// Besides click lines, `report` writes the current report and `areas` the
/// current rows. Malformed lines are logged and skipped.
fn run_session<R: BufRead, W: Write>(
    mut session: ScanSession,
    input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        match line {
            "" => continue,
            "report" => writeln!(out, "{}", session.report())?,
            "areas" => print_rows(out, &session.rows(), Some((&session, Instant::now())))?,
            _ => match parse_click_event(line) {
                Ok((location, severity)) => {
                    if session.click(&location, severity, Instant::now()) {
                        writeln!(out, "recorded {location} ({severity}/10)")?;
                    } else {
                        writeln!(out, "ignored {location}")?;
                    }
                }
                Err(e) => tracing::warn!("skipping input {line:?}: {e}"),
            },
        }
    }

    writeln!(out, "{}", session.report())?;
    Ok(())
}

fn print_rows<W: Write>(
    out: &mut W,
    rows: &[PainAreaRow],
    highlight: Option<(&ScanSession, Instant)>,
) -> std::io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No pain areas recorded.");
    }
    for row in rows {
        let marker = match highlight {
            Some((session, now)) if session.is_highlighted(&row.location, now) => '*',
            _ => ' ',
        };
        writeln!(out, "{}", format_row(row, marker))?;
    }
    Ok(())
}

fn format_row(row: &PainAreaRow, marker: char) -> String {
    format!(
        "{marker} {:<18} {:<14} {:>2}/10 {}",
        row.location,
        row.pain_type,
        row.severity,
        render_bar(row.width_percent, BAR_TRACK_LEN)
    )
}
