use std::fmt;

use serde::{Deserialize, Serialize};

/// Speaker role attributed to a subtitle line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Teacher,
    Student,
    /// The whole class speaking in chorus
    Class,
}

impl Speaker {
    /// Label used in rendered transcripts
    pub fn label(self) -> &'static str {
        match self {
            Speaker::Teacher => "老师",
            Speaker::Student => "学生",
            Speaker::Class => "全班",
        }
    }

    /// Whether this role is an individual speaker (not the whole class)
    pub fn is_individual(self) -> bool {
        matches!(self, Speaker::Teacher | Speaker::Student)
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A subtitle text with its attributed speaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledLine {
    pub speaker: Speaker,
    pub text: String,
}

impl LabeledLine {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }
}

impl fmt::Display for LabeledLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}：{}", self.speaker, self.text)
    }
}

/// A maximal run of consecutive lines from the same speaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    /// Line texts joined with the turn separator
    pub text: String,
}
