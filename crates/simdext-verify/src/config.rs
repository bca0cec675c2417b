//! Verification settings.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use simdext_kernels::SimdCapability;

use crate::error::{Error, Result};

/// Element types the harness can exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    F32,
    F64,
}

impl ElementType {
    pub const ALL: [ElementType; 2] = [ElementType::F32, ElementType::F64];

    pub fn name(&self) -> &'static str {
        match self {
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
        }
    }
}

/// What to verify and with which inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Capability names to exercise; empty means every level available on
    /// this CPU.
    pub capabilities: Vec<String>,
    /// Element types to exercise.
    pub element_types: Vec<ElementType>,
    /// Every variable count in `0..=max_count` is checked.
    pub max_count: usize,
    /// Additional variable counts (large buffers, odd sizes).
    pub extra_counts: Vec<usize>,
    /// Seed for the input generator.
    pub seed: u64,
    /// Mix signed zeros, infinities, subnormals and extremes into the inputs.
    pub special_values: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            capabilities: Vec::new(),
            element_types: ElementType::ALL.to_vec(),
            max_count: 67,
            extra_counts: vec![255, 1000, 4099],
            seed: 0x5eed,
            special_values: true,
        }
    }
}

impl VerifyConfig {
    /// Load a JSON configuration file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let config: VerifyConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<()> {
        if self.element_types.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one element type is required".to_string(),
            ));
        }
        self.resolve_capabilities()?;
        Ok(())
    }

    /// Turn capability names into levels, checking they can run here.
    pub fn resolve_capabilities(&self) -> Result<Vec<SimdCapability>> {
        if self.capabilities.is_empty() {
            return Ok(SimdCapability::available());
        }

        let mut resolved = Vec::with_capacity(self.capabilities.len());
        for name in &self.capabilities {
            let cap = SimdCapability::from_name(name)
                .ok_or_else(|| Error::UnknownCapability(name.clone()))?;
            if !cap.is_available() {
                return Err(simdext_kernels::Error::UnsupportedCapability(cap).into());
            }
            if !resolved.contains(&cap) {
                resolved.push(cap);
            }
        }
        Ok(resolved)
    }

    /// Variable counts to check for a CPU with `lanes` native lanes: the
    /// dense range, the lane boundaries around several multiples, and the
    /// extras. Sorted and deduplicated.
    pub fn variable_counts(&self, lanes: usize) -> Vec<usize> {
        let mut counts: Vec<usize> = (0..=self.max_count).collect();
        for k in [1, 2, 3, 8] {
            let m = k * lanes;
            counts.extend([m.saturating_sub(1), m, m + 1]);
        }
        counts.extend(self.extra_counts.iter().copied());
        counts.sort_unstable();
        counts.dedup();
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_both_types() {
        let config = VerifyConfig::default();
        assert_eq!(config.element_types, vec![ElementType::F32, ElementType::F64]);
        assert!(config.capabilities.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_capabilities_resolve_to_available() {
        let config = VerifyConfig::default();
        assert_eq!(config.resolve_capabilities().unwrap(), SimdCapability::available());
    }

    #[test]
    fn unknown_capability_rejected() {
        let config = VerifyConfig {
            capabilities: vec!["mmx".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            config.resolve_capabilities(),
            Err(Error::UnknownCapability(name)) if name == "mmx"
        ));
    }

    #[test]
    fn duplicate_capabilities_collapse() {
        let config = VerifyConfig {
            capabilities: vec!["scalar".to_string(), "SCALAR".to_string()],
            ..Default::default()
        };
        assert_eq!(config.resolve_capabilities().unwrap(), vec![SimdCapability::Scalar]);
    }

    #[test]
    fn variable_counts_include_lane_boundaries() {
        let config = VerifyConfig {
            max_count: 4,
            extra_counts: vec![1000],
            ..Default::default()
        };
        let counts = config.variable_counts(16);
        for c in [0, 1, 2, 3, 4, 15, 16, 17, 31, 32, 33, 47, 48, 49, 127, 128, 129, 1000] {
            assert!(counts.contains(&c), "missing count {c}");
        }
        assert!(counts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: VerifyConfig = serde_json::from_str(r#"{"max_count": 9, "element_types": ["f64"]}"#).unwrap();
        assert_eq!(config.max_count, 9);
        assert_eq!(config.element_types, vec![ElementType::F64]);
        assert_eq!(config.seed, VerifyConfig::default().seed);
    }

    #[test]
    fn empty_element_types_invalid() {
        let config = VerifyConfig {
            element_types: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
