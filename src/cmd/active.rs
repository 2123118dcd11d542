use clap::Args;
use strandcut::catalog::ProductCatalog;
use strandcut::config::AnalysisConfig;
use strandcut::strands::{
    check_full_width, resolve_active, summarize, InMemoryPatternRepository, PatternRepository,
};
use strandcut::ScResult;

use super::CutArgs;
use crate::reports;

#[derive(Args, Debug, Clone)]
pub struct ActiveArgs {
    #[command(flatten)]
    pub config: AnalysisConfig,

    /// Strand pattern library (JSON array).
    #[arg(long)]
    pub patterns: String,

    #[arg(long)]
    pub pattern: String,

    /// Product type, to check the pattern width against the catalog.
    #[arg(short, long)]
    pub product: Option<String>,

    #[command(flatten)]
    pub cut: CutArgs,
}

pub fn run(args: &ActiveArgs, catalog: &ProductCatalog, config: &AnalysisConfig) -> ScResult<()> {
    let repo = InMemoryPatternRepository::load_from_file(&args.patterns)?;
    let pattern = repo.get(&args.pattern)?;
    let cut = args.cut.to_cut_spec()?;

    let mut warnings = Vec::new();
    if let Some(product) = &args.product {
        let geometry = catalog.lookup(product)?;
        if let Some(mismatch) = check_full_width(pattern, geometry, config) {
            warnings.push(mismatch.message());
        }
    }

    let active = resolve_active(pattern, cut.as_ref(), config)?;
    let slots = pattern.slots(config.layer_split_min_gap_in);

    reports::print_active_strands(pattern, &slots, &active);
    reports::print_strand_summary(&summarize(&slots, &active));
    reports::print_warnings(&warnings);
    Ok(())
}
