pub mod attribution;
pub mod punctuation;
pub mod segmentation;
pub mod turns;

pub use attribution::*;
pub use punctuation::*;
pub use segmentation::*;
pub use turns::*;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for all heuristics
///
/// Every section falls back to the built-in keyword sets when omitted from a
/// config file, so a file may override only the stage definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicsConfig {
    /// Cue keywords for speaker attribution
    pub attribution: AttributionConfig,
    /// Question markers for punctuation restoration
    pub punctuation: PunctuationConfig,
    /// Lesson stage definitions
    pub segmentation: SegmentationConfig,
    /// Lexical substitutions applied to the smoothed dialogue
    pub smoothing: SmoothingConfig,
}

impl HeuristicsConfig {
    /// Load from a JSON file, validating the stage definitions
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.segmentation.validate()?;
        Ok(config)
    }
}

/// Ordered find/replace pairs for the smoothed dialogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SmoothingConfig {
    pub replacements: Vec<(String, String)>,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        let pairs = [
            ("U盘", "右盘"),
            ("我们现在的衬", "我们现在的秤"),
            ("怎么乘", "怎么称"),
            ("称像", "称象"),
            ("下课是好", "好，下课"),
            ("老师好好好", "老师好"),
        ];
        Self {
            replacements: pairs
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        }
    }
}
