pub mod io;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::{ScResult, StrandCutError};
use crate::measurement::{self, EntryStatus, Measurement};
use crate::strands::{Layer, StrandId};

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
#[strum(ascii_case_insensitive)]
pub enum StrandEnd {
    E1,
    E2,
}

/// One field entry: raw gauge text plus the ">1 inch" checkbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlippageReading {
    pub strand: StrandId,
    pub end: StrandEnd,
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub exceeds_one: bool,
}

impl SlippageReading {
    pub fn new(strand: StrandId, end: StrandEnd, raw_text: impl Into<String>) -> Self {
        Self {
            strand,
            end,
            raw_text: raw_text.into(),
            exceeds_one: false,
        }
    }

    pub fn exceeding(strand: StrandId, end: StrandEnd) -> Self {
        Self {
            strand,
            end,
            raw_text: String::new(),
            exceeds_one: true,
        }
    }

    pub fn measurement(&self, threshold_in: f64) -> Measurement {
        Measurement::from_entry(&self.raw_text, self.exceeds_one, threshold_in)
    }
}

/// Sum, count, mean and sentinel flag for one aggregation scope.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScopeTotals {
    pub total_in: f64,
    pub count: usize,
    pub average_in: f64,
    pub exceeds: bool,
}

impl ScopeTotals {
    fn add(&mut self, m: Measurement) {
        self.total_in += m.effective_value();
        self.count += 1;
        self.average_in = self.total_in / self.count as f64;
        self.exceeds |= m.exceeds();
    }

    pub fn display_total(&self) -> String {
        measurement::format_value(self.total_in, self.exceeds)
    }

    pub fn display_average(&self) -> String {
        measurement::format_value(self.average_in, self.exceeds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LayerBreakdown {
    pub bottom: ScopeTotals,
    pub top: ScopeTotals,
    pub combined: ScopeTotals,
}

impl LayerBreakdown {
    fn add(&mut self, layer: Layer, m: Measurement) {
        match layer {
            Layer::Bottom => self.bottom.add(m),
            Layer::Top => self.top.add(m),
        }
        self.combined.add(m);
    }

    pub fn layer(&self, layer: Layer) -> &ScopeTotals {
        match layer {
            Layer::Bottom => &self.bottom,
            Layer::Top => &self.top,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrandSlippage {
    pub strand: StrandId,
    pub end1: Option<Measurement>,
    pub end2: Option<Measurement>,
    pub total_in: f64,
    pub exceeds: bool,
}

impl StrandSlippage {
    fn new(strand: StrandId) -> Self {
        Self {
            strand,
            end1: None,
            end2: None,
            total_in: 0.0,
            exceeds: false,
        }
    }

    pub fn end(&self, end: StrandEnd) -> Option<Measurement> {
        match end {
            StrandEnd::E1 => self.end1,
            StrandEnd::E2 => self.end2,
        }
    }

    pub fn display_total(&self) -> String {
        measurement::format_value(self.total_in, self.exceeds)
    }
}

/// A reading whose text did not parse. It still counts as 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidEntry {
    pub strand: StrandId,
    pub end: StrandEnd,
    pub raw_text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SlippageStatistics {
    pub strands: BTreeMap<StrandId, StrandSlippage>,
    pub end1: LayerBreakdown,
    pub end2: LayerBreakdown,
    pub grand: LayerBreakdown,
    pub invalid_entries: Vec<InvalidEntry>,
}

impl SlippageStatistics {
    pub fn end(&self, end: StrandEnd) -> &LayerBreakdown {
        match end {
            StrandEnd::E1 => &self.end1,
            StrandEnd::E2 => &self.end2,
        }
    }

    pub fn strand(&self, id: &StrandId) -> Option<&StrandSlippage> {
        self.strands.get(id)
    }

    /// `(strand, end)` pairs among `expected` that have no reading.
    pub fn missing(&self, expected: &[StrandId]) -> Vec<(StrandId, StrandEnd)> {
        expected
            .iter()
            .flat_map(|id| StrandEnd::iter().map(move |end| (*id, end)))
            .filter(|(id, end)| {
                self.strands
                    .get(id)
                    .and_then(|s| s.end(*end))
                    .is_none()
            })
            .collect()
    }
}

/// Aggregates readings into strand, end, layer and grand scopes.
///
/// Only readings that are present are counted; there is no zero-fill for
/// strands without readings. A ">1 inch" reading contributes the configured
/// threshold and marks every scope it feeds.
pub fn compute(
    readings: &[SlippageReading],
    config: &AnalysisConfig,
) -> ScResult<SlippageStatistics> {
    let mut stats = SlippageStatistics::default();
    let mut seen = BTreeSet::new();

    for reading in readings {
        if !seen.insert((reading.strand, reading.end)) {
            return Err(StrandCutError::DuplicateReading {
                strand: reading.strand.to_string(),
                end: reading.end.to_string(),
            });
        }

        let m = reading.measurement(config.exceeds_threshold_in);
        if !reading.exceeds_one && measurement::classify(&reading.raw_text) == EntryStatus::Invalid
        {
            debug!(
                "Unparseable slippage '{}' on {} {}; counted as 0",
                reading.raw_text, reading.strand, reading.end
            );
            stats.invalid_entries.push(InvalidEntry {
                strand: reading.strand,
                end: reading.end,
                raw_text: reading.raw_text.clone(),
            });
        }

        let strand = stats
            .strands
            .entry(reading.strand)
            .or_insert_with(|| StrandSlippage::new(reading.strand));
        match reading.end {
            StrandEnd::E1 => strand.end1 = Some(m),
            StrandEnd::E2 => strand.end2 = Some(m),
        }
        strand.total_in += m.effective_value();
        strand.exceeds |= m.exceeds();

        let layer = reading.strand.layer;
        match reading.end {
            StrandEnd::E1 => stats.end1.add(layer, m),
            StrandEnd::E2 => stats.end2.add(layer, m),
        }
        stats.grand.add(layer, m);
    }

    debug!(
        "Slippage over {} strands / {} readings: total {}",
        stats.strands.len(),
        stats.grand.combined.count,
        stats.grand.combined.display_total()
    );

    Ok(stats)
}
