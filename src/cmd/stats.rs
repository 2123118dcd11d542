use clap::Args;
use strandcut::config::AnalysisConfig;
use strandcut::slippage::{self, io};
use strandcut::ScResult;

use crate::reports;

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub config: AnalysisConfig,

    /// Readings file: `.csv` (strand,end,value,exceeds) or JSON.
    #[arg(short, long)]
    pub readings: String,

    /// Print the statistics as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &StatsArgs, config: &AnalysisConfig) -> ScResult<()> {
    let readings = io::load_readings(&args.readings)?;
    let stats = slippage::compute(&readings, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        reports::print_strand_slippage(&stats, config.fraction_denominator);
        reports::print_scope_report(&stats, config.fraction_denominator);
        reports::print_invalid_entries(&stats);
    }
    Ok(())
}
