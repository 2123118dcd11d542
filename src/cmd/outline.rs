use clap::Args;
use strandcut::catalog::ProductCatalog;
use strandcut::section::build_cross_section;
use strandcut::section::svg::render_cross_section;
use strandcut::ScResult;

use super::CutArgs;
use crate::reports;

#[derive(Args, Debug, Clone)]
pub struct OutlineArgs {
    #[arg(short, long)]
    pub product: String,

    #[command(flatten)]
    pub cut: CutArgs,

    /// Print an SVG document instead of the vertex table.
    #[arg(long, default_value_t = false)]
    pub svg: bool,
}

pub fn run(args: &OutlineArgs, catalog: &ProductCatalog) -> ScResult<()> {
    let geometry = catalog.lookup(&args.product)?;
    let cut = args.cut.to_cut_spec()?;
    let section = build_cross_section(geometry, cut.as_ref())?;

    if args.svg {
        print!("{}", render_cross_section(&section, &[]));
    } else {
        reports::print_outline(&section);
    }
    Ok(())
}
