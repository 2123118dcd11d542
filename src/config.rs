use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ScResult, StrandCutError};

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    // === GEOMETRY ===
    /// Concrete cover added to the outermost strand to derive the plank width.
    #[arg(long, default_value_t = 2.0)]
    pub concrete_cover_in: f64,

    /// Allowed difference between derived and catalog width before warning.
    #[arg(long, default_value_t = 0.01)]
    pub width_tolerance_in: f64,

    /// Minimum vertical spread of strands before a top layer is recognised.
    #[arg(long, default_value_t = 1.0)]
    pub layer_split_min_gap_in: f64,

    // === SLIPPAGE ===
    /// Value substituted for a ">1 inch" reading.
    #[arg(long, default_value_t = 1.0)]
    pub exceeds_threshold_in: f64,

    /// Fraction display resolution (16 = nearest 1/16").
    #[arg(long, default_value_t = 16)]
    pub fraction_denominator: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            concrete_cover_in: 2.0,
            width_tolerance_in: 0.01,
            layer_split_min_gap_in: 1.0,
            exceeds_threshold_in: 1.0,
            fraction_denominator: 16,
        }
    }
}

impl AnalysisConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ScResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            StrandCutError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;

        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ScResult<()> {
        let non_negative = [
            ("concrete_cover_in", self.concrete_cover_in),
            ("width_tolerance_in", self.width_tolerance_in),
            ("layer_split_min_gap_in", self.layer_split_min_gap_in),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(StrandCutError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if !self.exceeds_threshold_in.is_finite() || self.exceeds_threshold_in <= 0.0 {
            return Err(StrandCutError::Config(format!(
                "exceeds_threshold_in must be positive, got {}",
                self.exceeds_threshold_in
            )));
        }

        if self.fraction_denominator == 0 {
            return Err(StrandCutError::Config(
                "fraction_denominator must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Overlays flags the user actually typed on top of a file-loaded config.
    pub fn merge_from_cli(&mut self, cli: &AnalysisConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(concrete_cover_in, "concrete_cover_in");
        update_if_present!(width_tolerance_in, "width_tolerance_in");
        update_if_present!(layer_split_min_gap_in, "layer_split_min_gap_in");
        update_if_present!(exceeds_threshold_in, "exceeds_threshold_in");
        update_if_present!(fraction_denominator, "fraction_denominator");
    }
}
