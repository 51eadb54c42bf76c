pub mod bilibili;
pub mod error;
pub mod heuristics;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod render;

pub use bilibili::{BilibiliClient, BilibiliConfig, FetchedLesson, parse_bvid};
pub use error::{BilibiliError, ConfigError, InputError};
pub use heuristics::{
    HeuristicsConfig, label_speakers, merge_turns, punctuate, segment_lesson, split_stage_ranges,
};
pub use io::{
    ArtifactPaths, RunReport, lesson_dir, parse_subtitle_file, parse_subtitle_json,
    write_artifacts,
};
pub use models::{LabeledLine, Speaker, StageRange, StageRanges, SubtitleLine, Turn};
pub use pipeline::{Artifacts, Dialogue, Extra, build_dialogue, build_segmentation, process_lesson};
