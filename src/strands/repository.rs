use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

use super::pattern::StrandPattern;
use crate::error::{ScResult, StrandCutError};

/// Source of strand patterns. Analysis code receives one of these instead of
/// reaching for a global pattern library.
pub trait PatternRepository {
    fn get(&self, id: &str) -> ScResult<&StrandPattern>;
    fn list(&self) -> Vec<&StrandPattern>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryPatternRepository {
    patterns: BTreeMap<String, StrandPattern>,
}

impl InMemoryPatternRepository {
    /// Validates every pattern; a later duplicate id replaces an earlier one.
    pub fn new(patterns: Vec<StrandPattern>) -> ScResult<Self> {
        let mut map = BTreeMap::new();
        for pattern in patterns {
            pattern.validate()?;
            map.insert(pattern.id.clone(), pattern);
        }
        Ok(Self { patterns: map })
    }

    pub fn from_json(content: &str) -> ScResult<Self> {
        let patterns: Vec<StrandPattern> = serde_json::from_str(content)?;
        Self::new(patterns)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ScResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let repo = Self::from_json(&content)?;
        info!("Loaded {} strand patterns from {}", repo.patterns.len(), path.display());
        Ok(repo)
    }
}

impl PatternRepository for InMemoryPatternRepository {
    fn get(&self, id: &str) -> ScResult<&StrandPattern> {
        self.patterns
            .get(id)
            .ok_or_else(|| StrandCutError::UnknownPattern(id.to_string()))
    }

    fn list(&self) -> Vec<&StrandPattern> {
        self.patterns.values().collect()
    }
}
