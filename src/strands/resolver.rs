use serde::Serialize;
use std::collections::BTreeSet;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

use super::pattern::{DiameterClass, Layer, StrandId, StrandPattern, StrandSlot};
use crate::catalog::ProductGeometry;
use crate::config::AnalysisConfig;
use crate::cut::{CutSpec, KeeperSide};
use crate::error::ScResult;

/// Strands that remain in the shipped piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "strands", rename_all = "snake_case")]
pub enum ActiveStrands {
    /// Uncut plank: every strand survives.
    All,
    Only(BTreeSet<StrandId>),
}

impl ActiveStrands {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn contains(&self, id: &StrandId) -> bool {
        match self {
            Self::All => true,
            Self::Only(set) => set.contains(id),
        }
    }

    /// Active ids among `slots`, in slot order.
    pub fn select(&self, slots: &[StrandSlot]) -> Vec<StrandId> {
        slots
            .iter()
            .filter(|s| self.contains(&s.id))
            .map(|s| s.id)
            .collect()
    }

    pub fn count(&self, slots: &[StrandSlot]) -> usize {
        slots.iter().filter(|s| self.contains(&s.id)).count()
    }

    /// Active 1-based positions within one layer.
    pub fn positions(&self, layer: Layer, slots: &[StrandSlot]) -> Vec<u32> {
        slots
            .iter()
            .filter(|s| s.id.layer == layer && self.contains(&s.id))
            .map(|s| s.id.position)
            .collect()
    }
}

/// Decides which strands survive a cut.
///
/// L1 keeps strands with `x <= cut_width`, L2 keeps strands with
/// `x >= full_width - cut_width`, both inclusive, where `full_width` is
/// derived from the pattern. Top-layer strands are always kept regardless of
/// the cut. That matches the field behaviour this tool replaced and is pending
/// product-owner confirmation.
pub fn resolve_active(
    pattern: &StrandPattern,
    cut: Option<&CutSpec>,
    config: &AnalysisConfig,
) -> ScResult<ActiveStrands> {
    pattern.validate()?;

    let Some(cut) = cut else {
        debug!("Pattern '{}' uncut: all strands active", pattern.id);
        return Ok(ActiveStrands::All);
    };

    let full_width = pattern.derived_full_width(config.concrete_cover_in);
    cut.check_against(full_width)?;

    let left_bound = full_width - cut.cut_width_in;
    let active: BTreeSet<StrandId> = pattern
        .slots(config.layer_split_min_gap_in)
        .into_iter()
        .filter(|slot| match slot.id.layer {
            Layer::Top => true,
            Layer::Bottom => match cut.keeper_side {
                KeeperSide::L1 => slot.coordinate.x <= cut.cut_width_in,
                KeeperSide::L2 => slot.coordinate.x >= left_bound,
            },
        })
        .map(|slot| slot.id)
        .collect();

    debug!(
        "Pattern '{}' cut to {}\" ({}): {} of {} strands active",
        pattern.id,
        cut.cut_width_in,
        cut.keeper_side,
        active.len(),
        pattern.len()
    );

    Ok(ActiveStrands::Only(active))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidthMismatch {
    pub pattern_id: String,
    pub product_type: String,
    pub derived_width_in: f64,
    pub catalog_width_in: f64,
}

impl WidthMismatch {
    pub fn message(&self) -> String {
        format!(
            "Pattern '{}' implies a {:.3}\" plank but product '{}' is {:.3}\" wide",
            self.pattern_id, self.derived_width_in, self.product_type, self.catalog_width_in
        )
    }
}

/// Compares the pattern-derived width with the catalog. A mismatch is only a
/// warning: patterns may use nonstandard coordinates on purpose.
pub fn check_full_width(
    pattern: &StrandPattern,
    geometry: &ProductGeometry,
    config: &AnalysisConfig,
) -> Option<WidthMismatch> {
    let derived = pattern.derived_full_width(config.concrete_cover_in);
    if (derived - geometry.full_width_in).abs() <= config.width_tolerance_in {
        return None;
    }

    let mismatch = WidthMismatch {
        pattern_id: pattern.id.clone(),
        product_type: geometry.product_type.clone(),
        derived_width_in: derived,
        catalog_width_in: geometry.full_width_in,
    };
    warn!("{}", mismatch.message());
    Some(mismatch)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassCount {
    /// `None` collects strands whose diameter was never recorded.
    pub class: Option<DiameterClass>,
    pub total: u32,
    pub active: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrandSummary {
    pub total: u32,
    pub active: u32,
    pub by_class: Vec<ClassCount>,
}

/// Counts total and surviving strands per diameter class.
pub fn summarize(slots: &[StrandSlot], active: &ActiveStrands) -> StrandSummary {
    let classes = DiameterClass::iter()
        .map(Some)
        .chain(std::iter::once(None));

    let by_class: Vec<ClassCount> = classes
        .map(|class| {
            let members = slots.iter().filter(|s| s.diameter == class);
            let (total, kept) = members.fold((0, 0), |(t, k), s| {
                (t + 1, k + u32::from(active.contains(&s.id)))
            });
            ClassCount {
                class,
                total,
                active: kept,
            }
        })
        .filter(|c| c.total > 0)
        .collect();

    StrandSummary {
        total: slots.len() as u32,
        active: active.count(slots) as u32,
        by_class,
    }
}
