use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{ScResult, StrandCutError};

/// Which part of a saw-cut plank is kept as product.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum KeeperSide {
    /// Left part kept; the keyway stays on the left edge.
    L1,
    /// Right part kept; the keyway stays on the right edge.
    L2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutSpec {
    pub cut_width_in: f64,
    pub keeper_side: KeeperSide,
}

impl CutSpec {
    pub fn new(cut_width_in: f64, keeper_side: KeeperSide) -> ScResult<Self> {
        let cut = Self {
            cut_width_in,
            keeper_side,
        };
        cut.check_width()?;
        Ok(cut)
    }

    /// Fields are public and deserializable, so every consumer re-checks.
    fn check_width(&self) -> ScResult<()> {
        if !self.cut_width_in.is_finite() || self.cut_width_in < 0.0 {
            return Err(StrandCutError::InvalidCutSpec(format!(
                "cut width must be a non-negative number, got {}",
                self.cut_width_in
            )));
        }
        Ok(())
    }

    /// Builds a cut from the two optional form fields.
    ///
    /// A width without a side is rejected. A side without a width means the
    /// plank ships at full width.
    pub fn from_form(
        cut_width_in: Option<f64>,
        keeper_side: Option<KeeperSide>,
    ) -> ScResult<Option<Self>> {
        match (cut_width_in, keeper_side) {
            (None, _) => Ok(None),
            (Some(width), Some(side)) => Self::new(width, side).map(Some),
            (Some(width), None) => Err(StrandCutError::InvalidCutSpec(format!(
                "cut width {} given without a keeper side",
                width
            ))),
        }
    }

    /// Rejects negative, non-finite and over-wide cuts. Never clamps.
    pub fn check_against(&self, full_width_in: f64) -> ScResult<()> {
        self.check_width()?;
        if self.cut_width_in > full_width_in {
            return Err(StrandCutError::InvalidCutSpec(format!(
                "cut width {} exceeds full width {}",
                self.cut_width_in, full_width_in
            )));
        }
        Ok(())
    }
}

/// Maps uncut-plank x coordinates into the rendered (possibly cut) frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutWindow {
    pub full_width_in: f64,
    pub display_width_in: f64,
    /// Uncut x that lands on display x = 0.
    pub offset_in: f64,
}

impl CutWindow {
    pub fn new(full_width_in: f64, cut: Option<&CutSpec>) -> ScResult<Self> {
        let Some(cut) = cut else {
            return Ok(Self {
                full_width_in,
                display_width_in: full_width_in,
                offset_in: 0.0,
            });
        };

        cut.check_against(full_width_in)?;
        let offset_in = match cut.keeper_side {
            KeeperSide::L1 => 0.0,
            KeeperSide::L2 => full_width_in - cut.cut_width_in,
        };

        Ok(Self {
            full_width_in,
            display_width_in: cut.cut_width_in,
            offset_in,
        })
    }

    pub fn to_display_x(&self, uncut_x: f64) -> f64 {
        uncut_x - self.offset_in
    }

    /// True when the open span `(lo, hi)` in display coordinates overlaps the window.
    pub fn overlaps(&self, lo: f64, hi: f64) -> bool {
        hi > 0.0 && lo < self.display_width_in
    }
}
