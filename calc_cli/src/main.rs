//! # Computo CLI
//!
//! Terminal front end for the materials estimator. Every command first checks
//! the license terms and credentials, then either estimates a single room or
//! opens an interactive session that accumulates rooms into one project.

mod config;
mod display;
mod error;
mod license;
mod session;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use calc_core::calculations::{BoardThickness, RoomInput, Spacing, SystemType};
use calc_core::Project;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::session::{export_csv, export_pdf, Session};

#[derive(Parser)]
#[command(name = "computo")]
#[command(about = "Computo - construction materials estimator", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (default: ./computo.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Licensed email
    #[arg(long, global = true, env = "COMPUTO_EMAIL")]
    email: Option<String>,

    /// License key
    #[arg(long, global = true, env = "COMPUTO_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Accept the license terms without being asked
    #[arg(long, global = true)]
    accept_terms: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate materials for a single room
    Estimate(EstimateArgs),
    /// Interactive session accumulating rooms into a project
    Session,
}

#[derive(Args)]
struct EstimateArgs {
    /// Construction system: drywall, ceiling or steel-frame
    system: String,

    /// Wall length, or first ceiling side (m)
    #[arg(long)]
    length: f64,

    /// Wall height, or second ceiling side (m)
    #[arg(long)]
    height: f64,

    /// Stud spacing in cm (40, 48 or 60)
    #[arg(long)]
    spacing_cm: Option<u32>,

    /// Waste allowance in percent (0-20)
    #[arg(long)]
    waste: Option<u8>,

    /// Boarded faces of a partition (1 or 2)
    #[arg(long)]
    faces: Option<u8>,

    /// Boards per face, or interior boards of a steel-frame wall (1 or 2)
    #[arg(long)]
    layers: Option<u8>,

    /// Include thermal/acoustic insulation (any system)
    #[arg(long)]
    insulation: bool,

    /// Ceiling board thickness (9.5 or 12.5)
    #[arg(long)]
    thickness: Option<String>,

    /// Room label
    #[arg(long, default_value = "Ambiente 1")]
    name: String,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Also write the materials list as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Also write the PDF report
    #[arg(long)]
    pdf: Option<PathBuf>,
}

const TERMS: &str = "\
Términos de Licencia: el uso de Computo está limitado al titular de la
licencia. La licencia es intransferible y los reportes generados no pueden
copiarse ni redistribuirse.";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    let config = Config::load(cli.config.as_deref())?;
    debug!(local = config.license_url.is_none(), "configuration loaded");

    let identity = login(&config, cli.email, cli.key, cli.accept_terms)?;
    let project = Project::with_settings(identity, config.defaults.clone());

    match cli.command {
        Commands::Estimate(args) => cmd_estimate(project, args),
        Commands::Session => {
            let stdin = io::stdin();
            let mut session = Session::new(project, stdin.lock(), io::stdout());
            session.run()?;
            debug!(rooms = session.project().room_count(), "session ended");
            Ok(())
        }
    }
}

/// Terms first, then credentials. Missing values are asked for on stdin.
fn login(config: &Config, email: Option<String>, key: Option<String>, accept_terms: bool) -> CliResult<String> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    if !accept_terms {
        eprintln!("{}", TERMS);
        let answer = ask(&mut input, "Acepto los Términos de Licencia (s/n): ")?;
        if !matches!(answer.to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes") {
            return Err(CliError::TermsNotAccepted);
        }
    }

    let email = match email {
        Some(email) => email,
        None => ask(&mut input, "Email: ")?,
    };
    let key = match key {
        Some(key) => key,
        None => ask(&mut input, "Contraseña de Licencia: ")?,
    };

    let verifier = license::verifier_from_config(config);
    license::authorize(verifier.as_ref(), &email, &key)
}

fn ask(input: &mut impl BufRead, prompt: &str) -> CliResult<String> {
    eprint!("{}", prompt);
    io::stderr().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn cmd_estimate(mut project: Project, args: EstimateArgs) -> CliResult<()> {
    let system = SystemType::from_str_flexible(&args.system)?;
    let mut input = RoomInput::with_settings(system, args.length, args.height, &project.settings)
        .with_insulation(args.insulation);
    if let Some(cm) = args.spacing_cm {
        input = input.with_spacing(Spacing::from_centimeters(cm)?);
    }
    if let Some(waste) = args.waste {
        input = input.with_waste(waste);
    }
    if let Some(faces) = args.faces {
        input = input.with_faces(faces);
    }
    if let Some(layers) = args.layers {
        input = input.with_layers(layers);
    }
    if let Some(thickness) = &args.thickness {
        input = input.with_ceiling_thickness(BoardThickness::from_str_flexible(thickness)?);
    }

    let position = project.add_calculation(args.name, input)?;
    let room = project.room(position)?;

    let mut out = io::stdout().lock();
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(room)?)?;
    } else {
        writeln!(out, "{} - {}", room.name, system.display_name())?;
        write!(out, "{}", display::materials_table(&room.lines))?;
    }

    if let Some(path) = &args.csv {
        export_csv(&project, path)?;
    }
    if let Some(path) = &args.pdf {
        export_pdf(&project, path)?;
    }
    Ok(())
}
