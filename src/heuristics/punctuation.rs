use serde::{Deserialize, Serialize};

use super::attribution::{contains_any, ends_with_any, to_strings};
use super::turns::TURN_SEPARATOR;

/// Characters stripped from both ends before terminal punctuation is added
const EDGE_PUNCTUATION: &[char] = &['，', '。', '？', '！', '；', '、', ' '];

const QUESTION_MARK: char = '？';
const FULL_STOP: char = '。';

/// Keywords deciding whether a turn reads as a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PunctuationConfig {
    pub question_markers: Vec<String>,
    pub question_endings: Vec<String>,
}

impl Default for PunctuationConfig {
    fn default() -> Self {
        Self {
            question_markers: to_strings(&[
                "吗", "呢", "为什么", "怎么", "谁", "有没有", "对不对", "是不是",
            ]),
            question_endings: to_strings(&["吗", "呢"]),
        }
    }
}

/// Restore terminal punctuation on a turn's text
///
/// Runs of separators collapse to one, edge punctuation is stripped, and a
/// `？` or `。` is appended. Returns an empty string when nothing is left.
pub fn punctuate(text: &str, config: &PunctuationConfig) -> String {
    let collapsed = collapse_separators(text);
    let body = collapsed.trim_matches(EDGE_PUNCTUATION);
    if body.is_empty() {
        return String::new();
    }

    let mark = if contains_any(body, &config.question_markers)
        || ends_with_any(body, &config.question_endings)
    {
        QUESTION_MARK
    } else {
        FULL_STOP
    };

    let mut out = String::with_capacity(body.len() + mark.len_utf8());
    out.push_str(body);
    out.push(mark);
    out
}

fn collapse_separators(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous = None;
    for c in text.chars() {
        if c == TURN_SEPARATOR && previous == Some(TURN_SEPARATOR) {
            continue;
        }
        out.push(c);
        previous = Some(c);
    }
    out
}
