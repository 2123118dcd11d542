pub mod active;
pub mod outline;
pub mod report;
pub mod stats;

use clap::Args;
use strandcut::cut::{CutSpec, KeeperSide};
use strandcut::ScResult;

/// Cut fields as they come off the entry form.
#[derive(Args, Debug, Clone)]
pub struct CutArgs {
    /// Shipped width in inches. Omit for a full-width plank.
    #[arg(long)]
    pub cut_width: Option<f64>,

    /// Kept side: L1 (left, keyway on the left) or L2.
    #[arg(long)]
    pub keeper: Option<KeeperSide>,
}

impl CutArgs {
    pub fn to_cut_spec(&self) -> ScResult<Option<CutSpec>> {
        CutSpec::from_form(self.cut_width, self.keeper)
    }
}
