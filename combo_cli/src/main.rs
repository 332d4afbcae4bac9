//! # Combinar CLI
//!
//! Reads characteristic loads from a JSON file and prints the NBR 8800
//! load combination table.
//!
//! ```text
//! combo_cli loads.json --rule ULS-Normal --rule SLS-Rare --structure precast
//! combo_cli loads.json --by-category --format csv --output combos.csv
//! ```
//!
//! Exit status: 0 on success (including an empty table), 1 for invalid
//! input, 2 for configuration or file errors.

mod render;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use combo_core::loads::Load;
use combo_core::{
    generate, CombinationReport, CombinationRule, ComboError, ComboResult, EngineSettings, PermanentFactorMode,
    StructureType,
};

#[derive(Debug, Parser)]
#[command(name = "combo_cli", version, about = "NBR 8800 load combination generator")]
struct Cli {
    /// JSON file with the load list
    loads: PathBuf,

    /// Combination rule to generate (repeatable, default: all)
    #[arg(short, long = "rule", value_name = "CODE")]
    rules: Vec<String>,

    /// Structural material for the single permanent factor
    #[arg(short, long, value_enum, conflicts_with = "by_category")]
    structure: Option<StructureArg>,

    /// Factor permanent loads per category instead of per structure
    #[arg(long)]
    by_category: bool,

    /// Engine settings file (JSON)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StructureArg {
    Metal,
    Precast,
    CastInPlace,
}

impl From<StructureArg> for StructureType {
    fn from(arg: StructureArg) -> Self {
        match arg {
            StructureArg::Metal => StructureType::Metal,
            StructureArg::Precast => StructureType::Precast,
            StructureArg::CastInPlace => StructureType::CastInPlace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

/// Accepted layouts of the load file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LoadSheet {
    List(Vec<Load>),
    Document { loads: Vec<Load> },
}

impl LoadSheet {
    fn into_loads(self) -> Vec<Load> {
        match self {
            LoadSheet::List(loads) | LoadSheet::Document { loads } => loads,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn read_loads(path: &Path) -> ComboResult<Vec<Load>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ComboError::file_error("read", path.display().to_string(), e.to_string()))?;
    let sheet: LoadSheet = serde_json::from_str(&contents)?;
    Ok(sheet.into_loads())
}

fn parse_rules(codes: &[String]) -> ComboResult<Vec<CombinationRule>> {
    if codes.is_empty() {
        return Ok(CombinationRule::ALL.to_vec());
    }
    codes.iter().map(|code| code.parse()).collect()
}

/// Settings file first, then command-line overrides
fn build_settings(cli: &Cli) -> ComboResult<EngineSettings> {
    let mut settings = match &cli.settings {
        Some(path) => EngineSettings::load(path)?,
        None => EngineSettings::default(),
    };

    if cli.by_category {
        settings.permanent_factors = PermanentFactorMode::ByCategory;
    } else if let Some(structure) = cli.structure {
        settings.permanent_factors = PermanentFactorMode::ByStructure {
            structure: structure.into(),
        };
    }
    Ok(settings)
}

fn write_report(
    report: &CombinationReport,
    loads: &[Load],
    format: Format,
    decimals: u32,
    out: &mut dyn Write,
) -> ComboResult<()> {
    let written = match format {
        Format::Table => render::write_table(report, decimals, &mut *out)
            .and_then(|()| render::write_legend(loads, &mut *out)),
        Format::Json => render::write_json(report, out),
        Format::Csv => render::write_csv(report, &mut *out).map_err(io::Error::other),
    };
    written.map_err(|e| ComboError::file_error("write", "output", e.to_string()))
}

fn run(cli: &Cli) -> ComboResult<CombinationReport> {
    let settings = build_settings(cli)?;
    let rules = parse_rules(&cli.rules)?;
    let loads = read_loads(&cli.loads)?;
    tracing::debug!(loads = loads.len(), rules = rules.len(), "input read");

    let report = generate(&loads, &rules, &settings)?;

    if let Some(notice) = report.notice() {
        eprintln!("{notice}");
        if cli.format == Format::Table {
            return Ok(report);
        }
    }

    match &cli.output {
        Some(path) => {
            let mut buffer = Vec::new();
            write_report(&report, &loads, cli.format, settings.decimals, &mut buffer)?;
            fs::write(path, buffer)
                .map_err(|e| ComboError::file_error("write", path.display().to_string(), e.to_string()))?;
            tracing::info!(path = %path.display(), combinations = report.len(), "report written");
        }
        None => {
            let stdout = io::stdout();
            write_report(&report, &loads, cli.format, settings.decimals, &mut stdout.lock())?;
        }
    }
    Ok(report)
}

/// 1 for invalid input, 2 for configuration and file errors
fn exit_status(err: &ComboError) -> u8 {
    if err.is_validation() {
        1
    } else {
        2
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error [{}]: {err}", err.error_code());
            if let Ok(json) = serde_json::to_string(&err) {
                eprintln!("{json}");
            }
            ExitCode::from(exit_status(&err))
        }
    }
}
