use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{ScResult, StrandCutError};

const HEIGHT_EPSILON: f64 = 1e-9;

/// One point of the keyway groove, measured inward from the plank edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeywayPoint {
    pub depth_in: f64,
    pub height_in: f64,
}

impl KeywayPoint {
    pub const fn new(depth_in: f64, height_in: f64) -> Self {
        Self {
            depth_in,
            height_in,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductGeometry {
    pub product_type: String,
    #[serde(default)]
    pub description: String,

    pub full_width_in: f64,
    pub height_in: f64,
    pub top_flange_in: f64,
    pub bottom_flange_in: f64,

    // Cores are longitudinal voids, numbered left to right on the uncut plank.
    pub core_width_in: f64,
    pub core_height_in: f64,
    pub edge_to_first_core_in: f64,
    pub core_spacing_in: f64,
    pub num_cores: usize,

    pub bottom_corner_radius_in: f64,

    /// Ascending in height; first point above the corner radius, last at full height.
    pub keyway_profile: Vec<KeywayPoint>,
}

impl ProductGeometry {
    /// Center-to-center distance between neighbouring cores.
    pub fn core_pitch_in(&self) -> f64 {
        self.core_width_in + self.core_spacing_in
    }

    /// Vertical center of every core, measured from the plank bottom.
    pub fn core_center_y_in(&self) -> f64 {
        self.bottom_flange_in + self.core_height_in / 2.0
    }

    pub fn validate(&self) -> ScResult<()> {
        let fail = |reason: String| {
            Err(StrandCutError::InvalidGeometry {
                product_type: self.product_type.clone(),
                reason,
            })
        };

        if self.product_type.trim().is_empty() {
            return fail("product type id is empty".to_string());
        }

        let dims = [
            ("full_width_in", self.full_width_in),
            ("height_in", self.height_in),
            ("top_flange_in", self.top_flange_in),
            ("bottom_flange_in", self.bottom_flange_in),
            ("core_width_in", self.core_width_in),
            ("core_height_in", self.core_height_in),
            ("edge_to_first_core_in", self.edge_to_first_core_in),
            ("core_spacing_in", self.core_spacing_in),
            ("bottom_corner_radius_in", self.bottom_corner_radius_in),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value < 0.0 {
                return fail(format!("{} must be a non-negative number, got {}", name, value));
            }
        }

        if self.full_width_in <= 0.0 || self.height_in <= 0.0 {
            return fail("full width and height must be positive".to_string());
        }

        if self.bottom_corner_radius_in * 2.0 > self.full_width_in
            || self.bottom_corner_radius_in >= self.height_in
        {
            return fail(format!(
                "corner radius {} does not fit the section",
                self.bottom_corner_radius_in
            ));
        }

        if self.num_cores > 0 && (self.core_width_in <= 0.0 || self.core_height_in <= 0.0) {
            return fail("cores need a positive width and height".to_string());
        }

        let Some(first) = self.keyway_profile.first() else {
            return fail("keyway profile is empty".to_string());
        };
        if first.height_in <= self.bottom_corner_radius_in {
            return fail(format!(
                "first keyway point ({}) must sit above the corner radius ({})",
                first.height_in, self.bottom_corner_radius_in
            ));
        }

        for pair in self.keyway_profile.windows(2) {
            if pair[1].height_in <= pair[0].height_in {
                return fail(format!(
                    "keyway heights must strictly increase ({} then {})",
                    pair[0].height_in, pair[1].height_in
                ));
            }
        }

        for p in &self.keyway_profile {
            if !p.depth_in.is_finite() || !p.height_in.is_finite() {
                return fail("keyway point is not finite".to_string());
            }
            if p.depth_in < 0.0 || p.depth_in * 2.0 >= self.full_width_in {
                return fail(format!("keyway depth {} is out of range", p.depth_in));
            }
        }

        let last = self.keyway_profile[self.keyway_profile.len() - 1];
        if (last.height_in - self.height_in).abs() > HEIGHT_EPSILON {
            return fail(format!(
                "last keyway point ({}) must sit at full height ({})",
                last.height_in, self.height_in
            ));
        }

        Ok(())
    }
}

/// Static geometry for every product family, keyed by product type id.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    entries: BTreeMap<String, ProductGeometry>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The hollow-core families shipped with the tool.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for geometry in standard_products() {
            catalog
                .entries
                .insert(normalize_id(&geometry.product_type), geometry);
        }
        catalog
    }

    pub fn from_json(content: &str) -> ScResult<Self> {
        let products: Vec<ProductGeometry> = serde_json::from_str(content)?;
        let mut catalog = Self::new();
        for geometry in products {
            catalog.insert(geometry)?;
        }
        Ok(catalog)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ScResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        info!(
            "Loaded {} product families from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Adds or replaces a family after validating it.
    pub fn insert(&mut self, geometry: ProductGeometry) -> ScResult<()> {
        geometry.validate()?;
        self.entries
            .insert(normalize_id(&geometry.product_type), geometry);
        Ok(())
    }

    /// Merges another catalog in; its entries win on id collisions.
    pub fn extend(&mut self, other: ProductCatalog) {
        self.entries.extend(other.entries);
    }

    pub fn lookup(&self, product_type: &str) -> ScResult<&ProductGeometry> {
        self.entries
            .get(&normalize_id(product_type))
            .ok_or_else(|| StrandCutError::UnknownProductType(product_type.to_string()))
    }

    pub fn product_types(&self) -> Vec<&str> {
        self.entries
            .values()
            .map(|g| g.product_type.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductGeometry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_id(id: &str) -> String {
    id.trim().to_ascii_lowercase()
}

#[allow(clippy::too_many_arguments)]
fn hollow_core(
    product_type: &str,
    description: &str,
    height_in: f64,
    flange_in: f64,
    core_width_in: f64,
    core_height_in: f64,
    core_spacing_in: f64,
    num_cores: usize,
    bottom_corner_radius_in: f64,
    keyway_profile: Vec<KeywayPoint>,
) -> ProductGeometry {
    let full_width_in = 48.0;
    let pitch = core_width_in + core_spacing_in;
    // Cores are laid out symmetrically about the plank centerline.
    let span = pitch * num_cores.saturating_sub(1) as f64;

    ProductGeometry {
        product_type: product_type.to_string(),
        description: description.to_string(),
        full_width_in,
        height_in,
        top_flange_in: flange_in,
        bottom_flange_in: flange_in,
        core_width_in,
        core_height_in,
        edge_to_first_core_in: (full_width_in - span) / 2.0,
        core_spacing_in,
        num_cores,
        bottom_corner_radius_in,
        keyway_profile,
    }
}

fn standard_products() -> Vec<ProductGeometry> {
    use KeywayPoint as P;

    vec![
        hollow_core(
            "hc6",
            "6\" x 48\" hollow core",
            6.0,
            1.25,
            4.75,
            3.5,
            1.75,
            7,
            0.25,
            vec![
                P::new(0.0, 0.75),
                P::new(0.375, 1.25),
                P::new(0.375, 3.5),
                P::new(0.0, 4.0),
                P::new(0.25, 6.0),
            ],
        ),
        hollow_core(
            "hc8",
            "8\" x 48\" hollow core",
            8.0,
            1.25,
            5.5,
            5.5,
            2.25,
            6,
            0.25,
            vec![
                P::new(0.0, 1.0),
                P::new(0.375, 1.5),
                P::new(0.375, 4.5),
                P::new(0.0, 5.25),
                P::new(0.25, 8.0),
            ],
        ),
        hollow_core(
            "hc10",
            "10\" x 48\" hollow core",
            10.0,
            1.5,
            5.75,
            7.0,
            2.0,
            6,
            0.25,
            vec![
                P::new(0.0, 1.25),
                P::new(0.5, 1.875),
                P::new(0.5, 5.75),
                P::new(0.0, 6.625),
                P::new(0.25, 10.0),
            ],
        ),
        hollow_core(
            "hc12",
            "12\" x 48\" hollow core",
            12.0,
            1.5,
            6.0,
            9.0,
            3.0,
            5,
            0.375,
            vec![
                P::new(0.0, 1.5),
                P::new(0.5, 2.25),
                P::new(0.5, 7.0),
                P::new(0.0, 8.0),
                P::new(0.375, 12.0),
            ],
        ),
        hollow_core(
            "hc16",
            "16\" x 48\" hollow core",
            16.0,
            2.0,
            7.0,
            12.0,
            4.0,
            4,
            0.375,
            vec![
                P::new(0.0, 2.0),
                P::new(0.625, 3.0),
                P::new(0.625, 9.5),
                P::new(0.0, 10.75),
                P::new(0.375, 16.0),
            ],
        ),
        ProductGeometry {
            product_type: "ss8".to_string(),
            description: "8\" x 48\" solid slab".to_string(),
            full_width_in: 48.0,
            height_in: 8.0,
            top_flange_in: 4.0,
            bottom_flange_in: 4.0,
            core_width_in: 0.0,
            core_height_in: 0.0,
            edge_to_first_core_in: 0.0,
            core_spacing_in: 0.0,
            num_cores: 0,
            bottom_corner_radius_in: 0.25,
            keyway_profile: vec![
                P::new(0.0, 1.0),
                P::new(0.375, 1.5),
                P::new(0.375, 4.5),
                P::new(0.0, 5.25),
                P::new(0.25, 8.0),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_entries_are_valid() {
        let catalog = ProductCatalog::standard();
        assert_eq!(catalog.len(), 6);
        for geometry in catalog.iter() {
            geometry
                .validate()
                .unwrap_or_else(|e| panic!("{} failed validation: {}", geometry.product_type, e));
        }
    }

    #[test]
    fn test_cores_fit_inside_the_plank() {
        for g in ProductCatalog::standard().iter().filter(|g| g.num_cores > 0) {
            let first_left = g.edge_to_first_core_in - g.core_width_in / 2.0;
            let last_right = g.edge_to_first_core_in
                + g.core_pitch_in() * (g.num_cores - 1) as f64
                + g.core_width_in / 2.0;
            assert!(first_left > 0.0, "{} first core leaves the plank", g.product_type);
            assert!(
                last_right < g.full_width_in,
                "{} last core leaves the plank",
                g.product_type
            );
            assert!(
                (g.bottom_flange_in + g.core_height_in + g.top_flange_in - g.height_in).abs()
                    < 1e-9
            );
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = ProductCatalog::standard();
        assert_eq!(catalog.lookup(" HC8 ").unwrap().height_in, 8.0);
    }
}
