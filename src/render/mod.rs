pub mod dialogue;
pub mod lesson_plan;
pub mod observation_note;
pub mod timecode;

pub use dialogue::*;
pub use lesson_plan::*;
pub use observation_note::*;
pub use timecode::*;

use std::sync::LazyLock;

use regex::Regex;

use crate::heuristics::SegmentationConfig;
use crate::models::{StageRange, StageRanges, SubtitleLine};

static BOOK_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"《([^》]+)》").expect("book title pattern is valid"));
static PARENTHESISED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"（.*?）|\(.*?\)").expect("parenthesis pattern is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Everything the lesson documents are rendered from
#[derive(Debug, Clone, Copy)]
pub struct LessonContext<'a> {
    /// Video title
    pub title: &'a str,
    /// The full subtitle sequence the ranges index into
    pub lines: &'a [SubtitleLine],
    pub ranges: &'a StageRanges,
    pub stages: &'a SegmentationConfig,
}

impl LessonContext<'_> {
    /// Lesson theme derived from the title
    pub fn theme(&self) -> String {
        extract_theme(self.title)
    }

    /// Time label for a stage; see [`stage_label`]
    pub fn label(&self, name: &str) -> String {
        stage_label(self.lines, self.ranges, name)
    }

    /// First two lines of a stage joined with `；`
    pub fn excerpt(&self, range: &StageRange) -> String {
        let end = (range.end_index + 1).min(range.start_index + 2).min(self.lines.len());
        let start = range.start_index.min(end);
        self.lines[start..end]
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("；")
    }
}

/// Extract the lesson theme from a video title
///
/// Text after the first `：` is considered; a `《…》` book title wins,
/// otherwise parenthesised remarks are dropped. Falls back to the title.
pub fn extract_theme(title: &str) -> String {
    let trimmed = title.trim();
    let tail = trimmed
        .split_once('：')
        .map(|(_, rest)| rest)
        .unwrap_or(trimmed);

    if let Some(caps) = BOOK_TITLE.captures(tail) {
        return caps[1].to_string();
    }

    let cleaned = PARENTHESISED.replace_all(tail, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        title.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Remove whitespace and truncate to `max_chars`, marking the cut with `……`
pub fn short_text(text: &str, max_chars: usize) -> String {
    let compact = WHITESPACE.replace_all(text, "");
    if compact.chars().count() <= max_chars {
        return compact.into_owned();
    }
    let mut out: String = compact.chars().take(max_chars).collect();
    out.push_str("……");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_theme() {
        assert_eq!(extract_theme("名师课堂：《曹冲称象》三年级"), "曹冲称象");
        assert_eq!(extract_theme("数学课：等量代换（公开课）"), "等量代换");
        assert_eq!(extract_theme("Lesson (demo) one"), "Lesson  one");
        assert_eq!(extract_theme("（全）"), "（全）");
    }

    #[test]
    fn test_short_text() {
        assert_eq!(short_text("a b\tc", 10), "abc");
        assert_eq!(short_text("一二三四五", 3), "一二三……");
    }

    #[test]
    fn test_excerpt_takes_at_most_two_lines() {
        let lines: Vec<SubtitleLine> = ["甲", "乙", "丙"]
            .iter()
            .enumerate()
            .map(|(i, t)| SubtitleLine {
                start: i as f64,
                end: i as f64 + 1.0,
                text: t.to_string(),
            })
            .collect();
        let ranges = StageRanges::default();
        let stages = SegmentationConfig::default();
        let ctx = LessonContext {
            title: "t",
            lines: &lines,
            ranges: &ranges,
            stages: &stages,
        };

        let all = StageRange::new(0, "a", 0, 2).unwrap();
        assert_eq!(ctx.excerpt(&all), "甲；乙");
        let single = StageRange::new(0, "a", 2, 2).unwrap();
        assert_eq!(ctx.excerpt(&single), "丙");
    }
}
