use crate::heuristics::{PunctuationConfig, SmoothingConfig, punctuate};
use crate::models::{LabeledLine, SubtitleLine, Turn};

pub const VERBATIM_TITLE: &str = "【逐字稿增强版（对话体）】";
pub const SMOOTH_TITLE: &str = "【逐字稿增强版（对话体·通顺增强）】";

/// One subtitle text per line
pub fn render_raw(lines: &[SubtitleLine]) -> String {
    lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// One `speaker：text` entry per subtitle line
pub fn render_labeled(labeled: &[LabeledLine]) -> String {
    labeled
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Verbatim dialogue: one punctuated block per turn
pub fn render_verbatim(turns: &[Turn], punctuation: &PunctuationConfig) -> String {
    render_blocks(
        VERBATIM_TITLE,
        turns.iter().map(|t| (t, punctuate(&t.text, punctuation))),
    )
}

/// Smoothed dialogue: substitutions applied before punctuation
pub fn render_smooth(
    turns: &[Turn],
    smoothing: &SmoothingConfig,
    punctuation: &PunctuationConfig,
) -> String {
    render_blocks(
        SMOOTH_TITLE,
        turns
            .iter()
            .map(|t| (t, punctuate(&smooth_text(&t.text, smoothing), punctuation))),
    )
}

/// Apply the substitution table and squash doubled separators
pub fn smooth_text(text: &str, smoothing: &SmoothingConfig) -> String {
    let mut out = text.to_string();
    for (from, to) in &smoothing.replacements {
        if !from.is_empty() {
            out = out.replace(from.as_str(), to);
        }
    }
    for _ in 0..2 {
        out = out.replace("，，", "，").replace("。。", "。");
    }
    out
}

fn render_blocks<'a>(title: &str, blocks: impl Iterator<Item = (&'a Turn, String)>) -> String {
    let mut out = String::from(title);
    for (turn, text) in blocks {
        // nothing left after punctuation cleanup
        if text.is_empty() {
            continue;
        }
        out.push_str("\n\n");
        out.push_str(turn.speaker.label());
        out.push('：');
        out.push_str(&text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Speaker;

    fn turn(speaker: Speaker, text: &str) -> Turn {
        Turn {
            speaker,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_render_verbatim() {
        let turns = vec![
            turn(Speaker::Teacher, "同学们，这是为什么"),
            turn(Speaker::Student, "因为一样重"),
            turn(Speaker::Class, "，，"),
        ];
        let text = render_verbatim(&turns, &PunctuationConfig::default());
        assert_eq!(
            text,
            "【逐字稿增强版（对话体）】\n\n老师：同学们，这是为什么？\n\n学生：因为一样重。"
        );
    }

    #[test]
    fn test_render_smooth_applies_replacements() {
        let turns = vec![turn(Speaker::Teacher, "曹冲称像，，，用U盘")];
        let text = render_smooth(
            &turns,
            &SmoothingConfig::default(),
            &PunctuationConfig::default(),
        );
        assert!(text.starts_with(SMOOTH_TITLE));
        assert!(text.ends_with("老师：曹冲称象，用右盘。"));
    }

    #[test]
    fn test_render_labeled() {
        let labeled = vec![
            LabeledLine::new(Speaker::Teacher, "同学们好"),
            LabeledLine::new(Speaker::Class, "老师好"),
        ];
        assert_eq!(render_labeled(&labeled), "老师：同学们好\n全班：老师好");
    }
}
