use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// A named lesson stage and the keywords that evidence it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDefinition {
    pub name: String,
    pub keywords: Vec<String>,
}

impl StageDefinition {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Inclusive index range of subtitle lines belonging to one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRange {
    /// Ordinal of the stage in its definition list
    pub stage: usize,
    pub name: String,
    pub start_index: usize,
    pub end_index: usize,
}

impl StageRange {
    pub fn new(
        stage: usize,
        name: impl Into<String>,
        start_index: usize,
        end_index: usize,
    ) -> Result<Self, InputError> {
        let name = name.into();
        if end_index < start_index {
            return Err(InputError::InvertedRange {
                name,
                start: start_index,
                end: end_index,
            });
        }
        Ok(Self {
            stage,
            name,
            start_index,
            end_index,
        })
    }

    /// Number of lines covered
    pub fn line_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }
}

/// Stage ranges recovered for a lesson, ordered by start index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRanges {
    pub ranges: Vec<StageRange>,
}

impl StageRanges {
    pub fn new(mut ranges: Vec<StageRange>) -> Self {
        ranges.sort_by_key(|r| r.start_index);
        Self { ranges }
    }

    /// Look up the range recorded for a stage name
    pub fn get(&self, name: &str) -> Option<&StageRange> {
        self.ranges.iter().find(|r| r.name == name)
    }

    /// Number of distinct stages recovered
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StageRange> {
        self.ranges.iter()
    }
}
