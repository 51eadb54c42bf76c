use std::collections::BTreeSet;

use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, info};

use crate::heuristics::{HeuristicsConfig, Segmentation, label_speakers, merge_turns, segment_lesson};
use crate::models::{LabeledLine, Speaker, SubtitleLine, Turn, line_texts};
use crate::render::{
    LessonContext, render_labeled, render_lesson_plan, render_observation_note, render_raw,
    render_smooth, render_verbatim,
};

/// Optional documents beyond the dialogue transcripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Extra {
    LessonPlan,
    ObservationNote,
}

/// Speaker attribution output for a lesson
#[derive(Debug, Clone)]
pub struct Dialogue {
    pub labeled: Vec<LabeledLine>,
    pub turns: Vec<Turn>,
}

impl Dialogue {
    /// Number of lines attributed to `speaker`
    pub fn line_count(&self, speaker: Speaker) -> usize {
        self.labeled.iter().filter(|l| l.speaker == speaker).count()
    }

    /// Number of turns taken by `speaker`
    pub fn turn_count(&self, speaker: Speaker) -> usize {
        self.turns.iter().filter(|t| t.speaker == speaker).count()
    }
}

/// Rendered text artifacts of one lesson
#[derive(Debug, Clone, Default)]
pub struct Artifacts {
    pub raw: String,
    pub speaker_labeled: String,
    pub dialogue_verbatim: String,
    pub dialogue_smooth: String,
    pub lesson_plan: Option<String>,
    pub observation_note: Option<String>,
}

/// Attribute speakers and merge turns
pub fn build_dialogue(lines: &[SubtitleLine], config: &HeuristicsConfig) -> Dialogue {
    let labeled = label_speakers(&line_texts(lines), &config.attribution);
    let turns = merge_turns(&labeled);
    debug!(
        "Attributed {} lines into {} turns",
        labeled.len(),
        turns.len()
    );
    Dialogue { labeled, turns }
}

/// Segment a lesson into stages, logging when the fallback split was used
pub fn build_segmentation(lines: &[SubtitleLine], config: &HeuristicsConfig) -> Segmentation {
    let segmentation = segment_lesson(lines, &config.segmentation);
    if segmentation.used_fallback {
        info!(
            "Keyword evidence recovered fewer than all stages; using proportional split over {} lines",
            lines.len()
        );
    }
    for range in segmentation.ranges.iter() {
        debug!(
            "Stage {} ({}): lines {}..={}",
            range.stage, range.name, range.start_index, range.end_index
        );
    }
    segmentation
}

/// Run the full pipeline over a subtitle track
///
/// 1. Attribute speakers and merge turns
/// 2. Render raw, labeled, verbatim and smoothed transcripts
/// 3. Segment into stages and render requested extras
pub fn process_lesson(
    title: &str,
    lines: &[SubtitleLine],
    extras: &BTreeSet<Extra>,
    config: &HeuristicsConfig,
) -> Artifacts {
    let dialogue = build_dialogue(lines, config);

    let mut artifacts = Artifacts {
        raw: render_raw(lines),
        speaker_labeled: render_labeled(&dialogue.labeled),
        dialogue_verbatim: render_verbatim(&dialogue.turns, &config.punctuation),
        dialogue_smooth: render_smooth(&dialogue.turns, &config.smoothing, &config.punctuation),
        ..Default::default()
    };

    if extras.is_empty() {
        return artifacts;
    }

    let segmentation = build_segmentation(lines, config);
    let ctx = LessonContext {
        title,
        lines,
        ranges: &segmentation.ranges,
        stages: &config.segmentation,
    };

    if extras.contains(&Extra::LessonPlan) {
        artifacts.lesson_plan = Some(render_lesson_plan(&ctx));
    }
    if extras.contains(&Extra::ObservationNote) {
        artifacts.observation_note = Some(render_observation_note(&ctx));
    }

    artifacts
}
