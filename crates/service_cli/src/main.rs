//! `modelrisk`: callable-bond model-risk comparison from a scenario file.

mod error;
mod scenario;

use clap::{Parser, Subcommand, ValueEnum};
use pricer_risk::report;
use pricer_risk::sweeps::{run_sweep, SweepKind};
use pricer_risk::ModelComparison;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::scenario::Scenario;

#[derive(Debug, Parser)]
#[command(name = "modelrisk", about = "Callable bond model-risk pricer", version)]
struct Cli {
    /// Enable debug logging.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Price the bond under every configured model and compare.
    Compare {
        /// Scenario TOML file.
        #[arg(long)]
        scenario: PathBuf,

        /// Directory for results.csv, results.json and scenario.json.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Stdout format.
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Sweep one parameter and report prices per engine.
    Sweep {
        /// Scenario TOML file.
        #[arg(long)]
        scenario: PathBuf,

        /// Parameter to sweep.
        #[arg(long, value_enum)]
        kind: SweepArg,

        /// CSV output path; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SweepArg {
    /// Scale model volatility.
    Vol,
    /// Parallel shift of the zero curve.
    Rate,
    /// Option-adjusted spread override.
    Oas,
}

impl From<SweepArg> for SweepKind {
    fn from(arg: SweepArg) -> Self {
        match arg {
            SweepArg::Vol => SweepKind::Volatility,
            SweepArg::Rate => SweepKind::RateShift,
            SweepArg::Oas => SweepKind::Oas,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(err) = run(cli.command) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Compare { scenario, output_dir, format } => {
            compare(&scenario, output_dir.as_deref(), format)
        }
        Command::Sweep { scenario, kind, output } => {
            sweep(&scenario, kind.into(), output.as_deref())
        }
    }
}

fn compare(
    path: &std::path::Path,
    output_dir: Option<&std::path::Path>,
    format: Format,
) -> Result<(), CliError> {
    let scenario = Scenario::load(path)?;
    let curve = scenario.build_curve()?;
    let bond = scenario.build_bond()?;
    let engines = scenario.build_engines()?;
    let settings = scenario.run_settings();
    info!(engines = engines.len(), "running comparison");

    let comparison =
        ModelComparison::run(&engines, &curve, &bond, scenario.valuation_date, &settings);

    match format {
        Format::Table => print!("{}", comparison.render_table()),
        Format::Csv => print!("{}", report::results_csv(comparison.results())?),
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(comparison.results())?)
        }
    }

    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)?;
        report::write_results_csv(&dir.join("results.csv"), comparison.results())?;
        report::write_json(&dir.join("results.json"), &comparison.results())?;
        report::write_json(&dir.join("scenario.json"), &scenario)?;
        info!(dir = %dir.display(), "reports written");
    }

    if !comparison.all_validated() {
        info!("one or more engines did not validate");
    }
    Ok(())
}

fn sweep(
    path: &std::path::Path,
    kind: SweepKind,
    output: Option<&std::path::Path>,
) -> Result<(), CliError> {
    let scenario = Scenario::load(path)?;
    let curve = scenario.build_curve()?;
    let bond = scenario.build_bond()?;
    let engines = scenario.build_engines()?;
    let points = kind.default_points();
    info!(%kind, points = points.len(), "running sweep");

    let result = run_sweep(kind, &engines, &curve, &bond, scenario.valuation_date, &points);

    match output {
        Some(path) => {
            report::write_sweep_csv(path, &result)?;
            info!(path = %path.display(), "sweep written");
        }
        None => print!("{}", report::sweep_csv(&result)?),
    }
    Ok(())
}
