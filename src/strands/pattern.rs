use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{ScResult, StrandCutError};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
pub enum DiameterClass {
    #[strum(serialize = "3/8")]
    #[serde(rename = "3/8")]
    ThreeEighths,
    #[strum(serialize = "1/2")]
    #[serde(rename = "1/2")]
    OneHalf,
    #[strum(serialize = "0.6")]
    #[serde(rename = "0.6")]
    PointSix,
}

impl DiameterClass {
    pub fn nominal_diameter_in(&self) -> f64 {
        match self {
            Self::ThreeEighths => 0.375,
            Self::OneHalf => 0.5,
            Self::PointSix => 0.6,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Bottom,
    Top,
}

impl Layer {
    fn prefix(&self) -> char {
        match self {
            Self::Bottom => 'B',
            Self::Top => 'T',
        }
    }
}

/// Identifies a strand by layer and 1-based position, e.g. `B3` or `T1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StrandId {
    pub layer: Layer,
    pub position: u32,
}

impl StrandId {
    pub const fn bottom(position: u32) -> Self {
        Self {
            layer: Layer::Bottom,
            position,
        }
    }

    pub const fn top(position: u32) -> Self {
        Self {
            layer: Layer::Top,
            position,
        }
    }
}

impl fmt::Display for StrandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.layer.prefix(), self.position)
    }
}

impl FromStr for StrandId {
    type Err = StrandCutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || StrandCutError::UnknownStrand(s.to_string());

        let mut chars = s.chars();
        let layer = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('B') => Layer::Bottom,
            Some('T') => Layer::Top,
            _ => return Err(bad()),
        };
        let position: u32 = chars.as_str().parse().map_err(|_| bad())?;
        if position == 0 {
            return Err(bad());
        }
        Ok(Self { layer, position })
    }
}

impl TryFrom<String> for StrandId {
    type Error = StrandCutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StrandId> for String {
    fn from(id: StrandId) -> Self {
        id.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrandCoordinate {
    pub x: f64,
    pub y: f64,
}

impl StrandCoordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Declared strand counts per diameter class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrandCounts {
    pub three_eighths: u32,
    pub one_half: u32,
    pub point_six: u32,
}

impl StrandCounts {
    pub fn get(&self, class: DiameterClass) -> u32 {
        match class {
            DiameterClass::ThreeEighths => self.three_eighths,
            DiameterClass::OneHalf => self.one_half,
            DiameterClass::PointSix => self.point_six,
        }
    }

    pub fn add(&mut self, class: DiameterClass) {
        match class {
            DiameterClass::ThreeEighths => self.three_eighths += 1,
            DiameterClass::OneHalf => self.one_half += 1,
            DiameterClass::PointSix => self.point_six += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.three_eighths + self.one_half + self.point_six
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrandPattern {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub counts: StrandCounts,
    /// Inches, x measured from the uncut left edge.
    pub coordinates: Vec<StrandCoordinate>,
    /// Parallel to `coordinates`; may be empty when diameters were never recorded.
    #[serde(default)]
    pub diameters: Vec<DiameterClass>,
    #[serde(default)]
    pub required_force_lbs: Option<f64>,
}

/// One pattern entry with its derived identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrandSlot {
    pub id: StrandId,
    /// 1-based index in pattern order.
    pub index: usize,
    pub coordinate: StrandCoordinate,
    pub diameter: Option<DiameterClass>,
}

impl StrandPattern {
    pub fn validate(&self) -> ScResult<()> {
        let fail = |reason: String| {
            Err(StrandCutError::InvalidPattern {
                pattern_id: self.id.clone(),
                reason,
            })
        };

        if !self.diameters.is_empty() && self.diameters.len() != self.coordinates.len() {
            return fail(format!(
                "{} coordinates but {} diameters",
                self.coordinates.len(),
                self.diameters.len()
            ));
        }

        for (i, c) in self.coordinates.iter().enumerate() {
            if !c.x.is_finite() || !c.y.is_finite() {
                return fail(format!("strand {} has a non-finite coordinate", i + 1));
            }
            if c.x < 0.0 {
                return fail(format!("strand {} lies left of the plank edge", i + 1));
            }
        }

        if self.counts.total() > 0 && !self.diameters.is_empty() {
            let mut actual = StrandCounts::default();
            for d in &self.diameters {
                actual.add(*d);
            }
            if actual != self.counts {
                return fail(format!(
                    "declared counts {:?} do not match diameters {:?}",
                    self.counts, actual
                ));
            }
        }

        if let Some(force) = self.required_force_lbs {
            if !force.is_finite() || force < 0.0 {
                return fail(format!("required force {} is invalid", force));
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Plank width implied by the outermost strand plus concrete cover.
    pub fn derived_full_width(&self, concrete_cover_in: f64) -> f64 {
        let max_x = self.coordinates.iter().fold(0.0f64, |m, c| m.max(c.x));
        max_x + concrete_cover_in
    }

    /// Layer of each coordinate, in pattern order.
    ///
    /// Strands above the midpoint of the vertical spread are top-layer, but
    /// only once the spread reaches `min_gap_in`; a single row is all bottom.
    pub fn layers(&self, min_gap_in: f64) -> Vec<Layer> {
        let (lo, hi) = self
            .coordinates
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
                (lo.min(c.y), hi.max(c.y))
            });

        if self.coordinates.is_empty() || hi - lo < min_gap_in {
            return vec![Layer::Bottom; self.coordinates.len()];
        }

        let mid = (lo + hi) / 2.0;
        self.coordinates
            .iter()
            .map(|c| if c.y > mid { Layer::Top } else { Layer::Bottom })
            .collect()
    }

    /// Resolves every coordinate to its `StrandId`, numbered per layer in pattern order.
    pub fn slots(&self, min_gap_in: f64) -> Vec<StrandSlot> {
        let mut bottom = 0;
        let mut top = 0;

        self.layers(min_gap_in)
            .into_iter()
            .zip(self.coordinates.iter())
            .enumerate()
            .map(|(i, (layer, coordinate))| {
                let counter = match layer {
                    Layer::Bottom => &mut bottom,
                    Layer::Top => &mut top,
                };
                *counter += 1;
                StrandSlot {
                    id: StrandId {
                        layer,
                        position: *counter,
                    },
                    index: i + 1,
                    coordinate: *coordinate,
                    diameter: self.diameters.get(i).copied(),
                }
            })
            .collect()
    }
}
