#![allow(dead_code)]

use strandcut::slippage::{SlippageReading, StrandEnd};
use strandcut::strands::{
    DiameterClass, StrandCoordinate, StrandCounts, StrandId, StrandPattern,
};

pub const BOTTOM_Y: f64 = 1.75;
pub const TOP_Y: f64 = 6.5;

/// Builder for StrandPattern to keep fixtures short
pub struct PatternBuilder {
    pattern: StrandPattern,
}

impl PatternBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            pattern: StrandPattern {
                id: id.to_string(),
                name: format!("Pattern {}", id),
                counts: StrandCounts::default(),
                coordinates: vec![],
                diameters: vec![],
                required_force_lbs: None,
            },
        }
    }

    pub fn strand(mut self, x: f64, y: f64, diameter: DiameterClass) -> Self {
        self.pattern.coordinates.push(StrandCoordinate::new(x, y));
        self.pattern.diameters.push(diameter);
        self.pattern.counts.add(diameter);
        self
    }

    pub fn bottom(self, xs: &[f64]) -> Self {
        xs.iter()
            .fold(self, |b, &x| b.strand(x, BOTTOM_Y, DiameterClass::OneHalf))
    }

    pub fn top(self, xs: &[f64]) -> Self {
        xs.iter()
            .fold(self, |b, &x| b.strand(x, TOP_Y, DiameterClass::ThreeEighths))
    }

    pub fn force(mut self, lbs: f64) -> Self {
        self.pattern.required_force_lbs = Some(lbs);
        self
    }

    pub fn build(self) -> StrandPattern {
        self.pattern
    }
}

/// Six bottom strands whose derived width is 48.625" (2" cover).
pub fn field_pattern() -> StrandPattern {
    PatternBuilder::new("field-6")
        .bottom(&[1.375, 10.78, 19.59, 28.41, 37.22, 46.625])
        .build()
}

/// Six bottom and two top strands, derived width exactly 48".
pub fn two_layer_pattern() -> StrandPattern {
    PatternBuilder::new("hc8-6b2t")
        .bottom(&[2.0, 11.0, 20.0, 28.0, 37.0, 46.0])
        .top(&[12.0, 36.0])
        .force(85_000.0)
        .build()
}

pub fn reading(id: &str, end: StrandEnd, text: &str) -> SlippageReading {
    SlippageReading::new(id.parse::<StrandId>().unwrap(), end, text)
}

pub fn exceeding(id: &str, end: StrandEnd) -> SlippageReading {
    SlippageReading::exceeding(id.parse::<StrandId>().unwrap(), end)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
