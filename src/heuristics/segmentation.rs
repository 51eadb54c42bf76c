use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::{StageDefinition, StageRange, StageRanges, SubtitleLine};

/// Number of lesson stages a segmentation partitions into
pub const STAGE_COUNT: usize = 5;

/// Cut points of the proportional split used when keyword evidence is thin
pub const FALLBACK_CUTS: [f64; STAGE_COUNT + 1] = [0.0, 0.12, 0.30, 0.62, 0.84, 1.0];

/// Ordered stage definitions used for segmentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentationConfig {
    pub stages: Vec<StageDefinition>,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            stages: vec![
                StageDefinition::new("导入与任务建立", &["今天这节课", "走进", "谁能讲", "上课"]),
                StageDefinition::new(
                    "故事复述与问题聚焦",
                    &["从前", "曹操想称", "他先", "为什么", "直接称"],
                ),
                StageDefinition::new(
                    "探究建模",
                    &["天平", "西瓜", "菠萝", "桃子", "A等于B", "等量"],
                ),
                StageDefinition::new(
                    "迁移练习与表达",
                    &["生活中", "小组", "你们的故事", "总结", "姓名牌"],
                ),
                StageDefinition::new(
                    "回扣称象与总结收束",
                    &["曹冲称象", "分量", "总量", "下课", "老师再见"],
                ),
            ],
        }
    }
}

impl SegmentationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stages.len() != STAGE_COUNT {
            return Err(ConfigError::StageCount {
                expected: STAGE_COUNT,
                actual: self.stages.len(),
            });
        }
        if let Some(index) = self.stages.iter().position(|s| s.name.trim().is_empty()) {
            return Err(ConfigError::EmptyStageName { index });
        }
        Ok(())
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|s| s.name.as_str())
    }
}

/// Full result of segmenting a lesson
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Stage ordinal per line after the monotonic repair
    pub assignments: Vec<usize>,
    /// Final stage ranges
    pub ranges: StageRanges,
    /// Whether the proportional fallback replaced the keyword ranges
    pub used_fallback: bool,
}

/// Count how many keywords of each stage occur in `text`
pub fn score_line(text: &str, stages: &[StageDefinition]) -> Vec<usize> {
    stages
        .iter()
        .map(|s| s.keywords.iter().filter(|k| text.contains(k.as_str())).count())
        .collect()
}

/// Choose the stage a line points to given the previous assignment
///
/// The best-scoring stage wins; ties go to the stage nearest `prev` (the
/// lower ordinal on equal distance). A line with no evidence keeps `prev`.
pub fn candidate_stage(scores: &[usize], prev: usize) -> usize {
    let best = scores.iter().copied().max().unwrap_or(0);
    if best == 0 {
        return prev;
    }
    scores
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s == best)
        .map(|(i, _)| i)
        .min_by_key(|&i| i.abs_diff(prev))
        .unwrap_or(prev)
}

/// Local greedy pass: each line moves the stage pointer by at most one step
pub fn assign_stages(lines: &[SubtitleLine], stages: &[StageDefinition]) -> Vec<usize> {
    let mut assigned = Vec::with_capacity(lines.len());
    let mut prev = 0usize;

    for line in lines {
        let scores = score_line(&line.text, stages);
        let candidate = candidate_stage(&scores, prev);
        let idx = candidate.clamp(prev.saturating_sub(1), prev + 1);
        assigned.push(idx);
        prev = idx;
    }

    assigned
}

/// Repair pass: raise every assignment to at least its predecessor
pub fn enforce_monotonic(mut assigned: Vec<usize>) -> Vec<usize> {
    for i in 1..assigned.len() {
        if assigned[i] < assigned[i - 1] {
            assigned[i] = assigned[i - 1];
        }
    }
    assigned
}

/// Collapse an assignment sequence into one range per stage name
///
/// Runs sharing a stage are merged into a single spanning range.
pub fn collapse_runs(assigned: &[usize], stages: &[StageDefinition]) -> StageRanges {
    let mut ranges: Vec<StageRange> = Vec::new();
    let mut start = 0usize;

    for i in 0..assigned.len() {
        let run_ends = i + 1 == assigned.len() || assigned[i + 1] != assigned[i];
        if !run_ends {
            continue;
        }

        let stage = assigned[i];
        let Some(def) = stages.get(stage) else {
            start = i + 1;
            continue;
        };

        match ranges.iter_mut().find(|r| r.name == def.name) {
            Some(existing) => {
                existing.start_index = existing.start_index.min(start);
                existing.end_index = existing.end_index.max(i);
            }
            None => ranges.push(StageRange {
                stage,
                name: def.name.clone(),
                start_index: start,
                end_index: i,
            }),
        }
        start = i + 1;
    }

    StageRanges::new(ranges)
}

/// Deterministic proportional split of `line_count` lines over the stages
///
/// Stages whose window is empty after flooring are skipped.
pub fn proportional_fallback(line_count: usize, stages: &[StageDefinition]) -> StageRanges {
    let cuts: Vec<usize> = FALLBACK_CUTS
        .iter()
        .map(|&f| (line_count as f64 * f) as usize)
        .collect();

    let ranges = stages
        .iter()
        .take(STAGE_COUNT)
        .enumerate()
        .filter(|&(i, _)| cuts[i] < cuts[i + 1])
        .map(|(i, def)| StageRange {
            stage: i,
            name: def.name.clone(),
            start_index: cuts[i],
            end_index: cuts[i + 1] - 1,
        })
        .collect();

    StageRanges::new(ranges)
}

/// Partition a lesson's subtitle timeline into stages
pub fn segment_lesson(lines: &[SubtitleLine], config: &SegmentationConfig) -> Segmentation {
    if lines.is_empty() {
        return Segmentation {
            assignments: Vec::new(),
            ranges: StageRanges::default(),
            used_fallback: false,
        };
    }

    let assignments = enforce_monotonic(assign_stages(lines, &config.stages));
    let ranges = collapse_runs(&assignments, &config.stages);

    if ranges.len() < STAGE_COUNT {
        return Segmentation {
            assignments,
            ranges: proportional_fallback(lines.len(), &config.stages),
            used_fallback: true,
        };
    }

    Segmentation {
        assignments,
        ranges,
        used_fallback: false,
    }
}

/// Stage ranges for a lesson; see [`segment_lesson`]
pub fn split_stage_ranges(lines: &[SubtitleLine], config: &SegmentationConfig) -> StageRanges {
    segment_lesson(lines, config).ranges
}
