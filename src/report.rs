use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use crate::catalog::ProductGeometry;
use crate::config::AnalysisConfig;
use crate::cut::CutSpec;
use crate::error::{ScResult, StrandCutError};
use crate::measurement::Measurement;
use crate::section::svg::{render_cross_section, StrandMarker};
use crate::section::{build_cross_section, CrossSection};
use crate::slippage::{self, SlippageReading, SlippageStatistics, StrandEnd};
use crate::strands::{
    check_full_width, resolve_active, summarize, ActiveStrands, DiameterClass, StrandCoordinate,
    StrandId, StrandPattern, StrandSummary,
};

/// Strand diameter drawn when the pattern never recorded one.
const FALLBACK_MARKER_DIAMETER_IN: f64 = 0.5;

pub struct ReportInputs<'a> {
    pub geometry: &'a ProductGeometry,
    pub pattern: &'a StrandPattern,
    pub cut: Option<&'a CutSpec>,
    pub readings: &'a [SlippageReading],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrandRow {
    pub id: StrandId,
    /// 1-based pattern index.
    pub index: usize,
    pub uncut: StrandCoordinate,
    /// x in the rendered (possibly cut) frame.
    pub display_x: f64,
    pub diameter: Option<DiameterClass>,
    pub active: bool,
    pub end1: Option<Measurement>,
    pub end2: Option<Measurement>,
    pub total_in: Option<f64>,
    pub exceeds: bool,
}

/// Everything an exporter needs for one analysis, keyed by strand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    pub product_type: String,
    pub pattern_id: String,
    pub pattern_name: String,
    pub required_force_lbs: Option<f64>,
    pub cut: Option<CutSpec>,
    pub section: CrossSection,
    pub active: ActiveStrands,
    pub strands: BTreeMap<StrandId, StrandRow>,
    pub summary: StrandSummary,
    pub statistics: SlippageStatistics,
    pub missing_readings: Vec<(StrandId, StrandEnd)>,
    /// Readings on strands that the cut removed; not part of the statistics.
    pub excluded_readings: Vec<SlippageReading>,
    pub warnings: Vec<String>,
}

impl ReportData {
    pub fn markers(&self) -> Vec<StrandMarker> {
        self.strands
            .values()
            .map(|row| StrandMarker {
                x: row.display_x,
                y: row.uncut.y,
                diameter_in: row
                    .diameter
                    .map_or(FALLBACK_MARKER_DIAMETER_IN, |d| d.nominal_diameter_in()),
                active: row.active,
            })
            .collect()
    }

    pub fn to_svg(&self) -> String {
        render_cross_section(&self.section, &self.markers())
    }
}

pub fn assemble(inputs: ReportInputs<'_>, config: &AnalysisConfig) -> ScResult<ReportData> {
    let ReportInputs {
        geometry,
        pattern,
        cut,
        readings,
    } = inputs;

    let section = build_cross_section(geometry, cut)?;
    let active = resolve_active(pattern, cut, config)?;
    let slots = pattern.slots(config.layer_split_min_gap_in);

    let mut warnings = Vec::new();
    if let Some(mismatch) = check_full_width(pattern, geometry, config) {
        warnings.push(mismatch.message());
    }

    let known: BTreeSet<StrandId> = slots.iter().map(|s| s.id).collect();
    let mut included = Vec::with_capacity(readings.len());
    let mut excluded = Vec::new();
    for reading in readings {
        if !known.contains(&reading.strand) {
            return Err(StrandCutError::UnknownStrand(reading.strand.to_string()));
        }
        if active.contains(&reading.strand) {
            included.push(reading.clone());
        } else {
            excluded.push(reading.clone());
        }
    }

    if !excluded.is_empty() {
        let message = format!(
            "{} reading(s) on strands removed by the cut were left out of the statistics",
            excluded.len()
        );
        warn!("{}", message);
        warnings.push(message);
    }

    let statistics = slippage::compute(&included, config)?;
    let missing_readings = statistics.missing(&active.select(&slots));
    let summary = summarize(&slots, &active);

    let strands = slots
        .iter()
        .map(|slot| {
            let slip = statistics.strand(&slot.id);
            let row = StrandRow {
                id: slot.id,
                index: slot.index,
                uncut: slot.coordinate,
                display_x: section.window.to_display_x(slot.coordinate.x),
                diameter: slot.diameter,
                active: active.contains(&slot.id),
                end1: slip.and_then(|s| s.end1),
                end2: slip.and_then(|s| s.end2),
                total_in: slip.map(|s| s.total_in),
                exceeds: slip.is_some_and(|s| s.exceeds),
            };
            (slot.id, row)
        })
        .collect();

    Ok(ReportData {
        product_type: geometry.product_type.clone(),
        pattern_id: pattern.id.clone(),
        pattern_name: pattern.name.clone(),
        required_force_lbs: pattern.required_force_lbs,
        cut: cut.copied(),
        section,
        active,
        strands,
        summary,
        statistics,
        missing_readings,
        excluded_readings: excluded,
        warnings,
    })
}
