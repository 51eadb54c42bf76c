use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// A single timed subtitle line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleLine {
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
    /// Line text, trimmed and never empty
    pub text: String,
}

impl SubtitleLine {
    /// Build a validated line. `index` is the entry position in the source,
    /// used only for error reporting.
    pub fn new(index: usize, start: f64, end: f64, text: &str) -> Result<Self, InputError> {
        if !start.is_finite() || start < 0.0 {
            return Err(InputError::MalformedEntry {
                index,
                reason: format!("invalid start time {}", start),
            });
        }
        if !end.is_finite() {
            return Err(InputError::MalformedEntry {
                index,
                reason: format!("invalid end time {}", end),
            });
        }
        if end < start {
            return Err(InputError::InvertedTiming { index, start, end });
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(InputError::EmptyText { index });
        }

        Ok(Self {
            start,
            end,
            text: text.to_string(),
        })
    }

    /// Duration of this line in seconds
    pub fn duration_secs(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Texts of a line sequence, in order
pub fn line_texts(lines: &[SubtitleLine]) -> Vec<&str> {
    lines.iter().map(|l| l.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_text() {
        let line = SubtitleLine::new(0, 1.0, 2.5, "  同学们好 ").unwrap();
        assert_eq!(line.text, "同学们好");
        assert_eq!(line.duration_secs(), 1.5);
    }

    #[test]
    fn test_new_rejects_inverted_timing() {
        let err = SubtitleLine::new(3, 5.0, 4.0, "下课").unwrap_err();
        assert_eq!(
            err,
            InputError::InvertedTiming {
                index: 3,
                start: 5.0,
                end: 4.0
            }
        );
    }

    #[test]
    fn test_new_rejects_blank_text() {
        let err = SubtitleLine::new(1, 0.0, 1.0, "   ").unwrap_err();
        assert_eq!(err, InputError::EmptyText { index: 1 });
    }

    #[test]
    fn test_new_rejects_nan_start() {
        assert!(SubtitleLine::new(0, f64::NAN, 1.0, "a").is_err());
    }
}
