use clap::{Args, ValueEnum};
use strandcut::catalog::ProductCatalog;
use strandcut::config::AnalysisConfig;
use strandcut::report::{assemble, ReportInputs};
use strandcut::slippage::io;
use strandcut::strands::{InMemoryPatternRepository, PatternRepository};
use strandcut::ScResult;

use super::CutArgs;
use crate::reports;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Svg,
    Table,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub config: AnalysisConfig,

    #[arg(short, long)]
    pub product: String,

    /// Strand pattern library (JSON array).
    #[arg(long)]
    pub patterns: String,

    #[arg(long)]
    pub pattern: String,

    /// Readings file (`.csv` or JSON). Without it the report has geometry only.
    #[arg(short, long)]
    pub readings: Option<String>,

    #[command(flatten)]
    pub cut: CutArgs,

    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    pub format: ReportFormat,
}

pub fn run(args: &ReportArgs, catalog: &ProductCatalog, config: &AnalysisConfig) -> ScResult<()> {
    let geometry = catalog.lookup(&args.product)?;
    let repo = InMemoryPatternRepository::load_from_file(&args.patterns)?;
    let pattern = repo.get(&args.pattern)?;
    let cut = args.cut.to_cut_spec()?;
    let readings = match &args.readings {
        Some(path) => io::load_readings(path)?,
        None => Vec::new(),
    };

    let report = assemble(
        ReportInputs {
            geometry,
            pattern,
            cut: cut.as_ref(),
            readings: &readings,
        },
        config,
    )?;

    match args.format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Svg => print!("{}", report.to_svg()),
        ReportFormat::Table => {
            reports::print_report_header(&report);
            reports::print_strand_summary(&report.summary);
            reports::print_strand_slippage(&report.statistics, config.fraction_denominator);
            reports::print_scope_report(&report.statistics, config.fraction_denominator);
            reports::print_invalid_entries(&report.statistics);
        }
    }
    Ok(())
}
