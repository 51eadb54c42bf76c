use serde::{Deserialize, Serialize};

use crate::models::{LabeledLine, Speaker};

/// Cue keyword sets driving speaker attribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributionConfig {
    /// Lines containing any of these are spoken by the whole class
    pub class_cues: Vec<String>,
    /// Lines containing any of these are spoken by the teacher
    pub teacher_cues: Vec<String>,
    /// Teacher lines containing any of these expect a student reply
    pub question_cues: Vec<String>,
    /// Teacher lines ending with any of these expect a student reply
    pub question_endings: Vec<String>,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            class_cues: to_strings(&["老师好", "老师再见", "同意吗", "大家一起说"]),
            teacher_cues: to_strings(&[
                "同学们",
                "今天这节课",
                "我们一起",
                "我请",
                "开始吧",
                "大点声音",
                "谁能",
                "谁来",
                "为什么",
                "对不对",
                "下课",
            ]),
            question_cues: to_strings(&["吗", "呢", "谁", "为什么", "怎么", "有没有"]),
            question_endings: to_strings(&["吗", "呢"]),
        }
    }
}

pub(crate) fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Whether `text` contains any of the cue keywords
pub fn contains_any(text: &str, cues: &[String]) -> bool {
    cues.iter().any(|c| text.contains(c.as_str()))
}

/// Whether `text` ends with any of the given endings
pub fn ends_with_any(text: &str, endings: &[String]) -> bool {
    endings.iter().any(|e| text.ends_with(e.as_str()))
}

/// Running state of the attribution machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributionState {
    /// Last confirmed individual speaker (never `Class`)
    pub mode: Speaker,
    /// A teacher question is waiting for a student reply
    pub expect_student: bool,
}

impl Default for AttributionState {
    fn default() -> Self {
        Self {
            mode: Speaker::Teacher,
            expect_student: false,
        }
    }
}

impl AttributionState {
    /// Attribute one line and return the successor state with the speaker.
    ///
    /// Rules, in priority order:
    /// 1. Class cue -> Class (clears the pending reply)
    /// 2. Teacher cue -> Teacher
    /// 3. Pending reply -> Student
    /// 4. Otherwise carry forward the last individual speaker
    pub fn step(self, line: &str, config: &AttributionConfig) -> (Self, Speaker) {
        let mut next = self;

        let speaker = if contains_any(line, &config.class_cues) {
            next.expect_student = false;
            Speaker::Class
        } else if contains_any(line, &config.teacher_cues) {
            Speaker::Teacher
        } else if self.expect_student {
            Speaker::Student
        } else {
            self.mode
        };

        match speaker {
            Speaker::Teacher => {
                // A teacher statement leaves any pending expectation in place
                if ends_with_any(line, &config.question_endings)
                    || contains_any(line, &config.question_cues)
                {
                    next.expect_student = true;
                }
            }
            Speaker::Student | Speaker::Class => next.expect_student = false,
        }

        if speaker.is_individual() {
            next.mode = speaker;
        }

        (next, speaker)
    }
}

/// Attribute a speaker to every line in a single left-to-right pass
pub fn label_speakers<S: AsRef<str>>(lines: &[S], config: &AttributionConfig) -> Vec<LabeledLine> {
    lines
        .iter()
        .scan(AttributionState::default(), |state, line| {
            let line = line.as_ref();
            let (next, speaker) = state.step(line, config);
            *state = next;
            Some(LabeledLine::new(speaker, line))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speakers(lines: &[&str]) -> Vec<Speaker> {
        label_speakers(lines, &AttributionConfig::default())
            .into_iter()
            .map(|l| l.speaker)
            .collect()
    }

    #[test]
    fn test_lesson_opening() {
        let lines = [
            "同学们，今天这节课我们学称象",
            "从前有一头大象",
            "为什么不能直接称呢",
            "因为太重了，称不了",
            "下课",
        ];
        assert_eq!(
            speakers(&lines),
            vec![
                Speaker::Teacher,
                Speaker::Teacher,
                Speaker::Teacher,
                Speaker::Student,
                Speaker::Teacher,
            ]
        );
    }

    #[test]
    fn test_class_cue_wins_over_teacher_cue() {
        // "同学们" is a teacher cue, "老师好" a class cue
        assert_eq!(speakers(&["同学们老师好"]), vec![Speaker::Class]);
    }

    #[test]
    fn test_class_does_not_overwrite_mode() {
        let lines = ["谁来回答一下", "是大象", "老师再见", "还有一个问题"];
        assert_eq!(
            speakers(&lines),
            vec![
                Speaker::Teacher,
                Speaker::Student,
                Speaker::Class,
                // carries forward the student, not the class
                Speaker::Student,
            ]
        );
    }

    #[test]
    fn test_teacher_statement_keeps_pending_reply() {
        let lines = ["你们知道吗", "我们一起看黑板", "是石头"];
        assert_eq!(
            speakers(&lines),
            vec![Speaker::Teacher, Speaker::Teacher, Speaker::Student]
        );
    }

    #[test]
    fn test_student_reply_clears_expectation() {
        let lines = ["他是怎么做的", "用船", "然后再称石头"];
        // the third line carries forward the student mode
        assert_eq!(
            speakers(&lines),
            vec![Speaker::Teacher, Speaker::Student, Speaker::Student]
        );
        let state = lines.iter().fold(AttributionState::default(), |s, l| {
            s.step(l, &AttributionConfig::default()).0
        });
        assert!(!state.expect_student);
        assert_eq!(state.mode, Speaker::Student);
    }

    #[test]
    fn test_uncued_lines_default_to_teacher() {
        assert_eq!(
            speakers(&["从前", "有一个人"]),
            vec![Speaker::Teacher, Speaker::Teacher]
        );
    }

    #[test]
    fn test_labeling_is_deterministic() {
        let lines = [
            "同学们好",
            "老师好",
            "谁能讲讲这个故事",
            "曹冲称象",
            "很好",
            "大家一起说",
            "等量的等量相等",
        ];
        let config = AttributionConfig::default();
        assert_eq!(label_speakers(&lines, &config), label_speakers(&lines, &config));
        assert_eq!(label_speakers(&lines, &config).len(), lines.len());
    }

    #[test]
    fn test_empty_input() {
        let lines: [&str; 0] = [];
        assert!(label_speakers(&lines, &AttributionConfig::default()).is_empty());
    }
}
